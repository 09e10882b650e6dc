/*
This file is part of the Hazard Zone Tool
Copyright (C) 2022 Novel-T

The Hazard Zone Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use gdal::raster::rasterize as gdal_rasterize;
use gdal::spatial_ref::SpatialRef;
use gdal::vector::Geometry;
use gdal::DriverManager;
use log::debug;

use crate::errors::{Result, ZoneError};
use crate::raster::{Raster, RasterStats, NO_DATA};
use crate::vector::ZoneLayer;

/// Burns the zone of every feature into a grid covering the layer's extent.
///
/// The grid starts at (xmin, ymax) with square cells of `pixel_size` layer units.  The number of
/// columns and rows is truncated, so a partial cell at the right or bottom edge is left out.
/// Features are burned in layer order and a later feature overwrites an earlier one.
///
/// Coordinates are burned as they are; `output_srs` is only written as the grid's projection.
pub fn rasterize(layer: &ZoneLayer, pixel_size: f64, output_srs: &SpatialRef) -> Result<Raster> {

    if !(pixel_size.is_finite() && pixel_size > 0.0) {
        return Err(ZoneError::Rasterization(format!("Pixel size must be positive, got {}", pixel_size)));
    }

    let extent = layer.extent()
        .ok_or_else(|| ZoneError::Rasterization("Layer has no geometry to rasterize".to_string()))?;

    let num_cols = grid_dimension(extent.width(), pixel_size, "columns")?;
    let num_rows = grid_dimension(extent.height(), pixel_size, "rows")?;

    let stats = RasterStats {
        origin_x: extent.xmin,
        origin_y: extent.ymax,
        pixel_width: pixel_size,
        pixel_height: -pixel_size,
        num_rows,
        num_cols,
        no_data_value: NO_DATA as f64,
        projection: output_srs.to_wkt()?,
    };

    debug!("Rasterizing {} features, extent {}\n{}", layer.len(), extent, stats);

    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut dataset = driver.create_with_band_type::<i16, _>("", num_cols, num_rows, 1)
        .map_err(|e| ZoneError::Rasterization(format!(
            "Unable to allocate {} x {} grid: {}", num_cols, num_rows, e)))?;

    dataset.set_geo_transform(&stats.geo_transform())?;
    dataset.set_spatial_ref(output_srs)?;

    {
        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(NO_DATA as f64))?;
        band.fill(NO_DATA as f64, None)?;
    }

    let (geometries, burn_values): (Vec<Geometry>, Vec<f64>) = layer.features.iter()
        .filter(|f| !f.is_empty())
        .filter_map(|f| f.zone.map(|z| (f.geometry.clone(), z.value() as f64)))
        .unzip();

    if geometries.len() < layer.len() {
        debug!("Skipping {} empty or unclassified features", layer.len() - geometries.len());
    }

    if !geometries.is_empty() {
        gdal_rasterize(&mut dataset, &[1], &geometries, &burn_values, None)
            .map_err(|e| ZoneError::Rasterization(format!("Burning zones failed: {}", e)))?;
    }

    let band = dataset.rasterband(1)?;
    let data = band.read_as::<i16>((0, 0), (num_cols, num_rows), (num_cols, num_rows), None)?
        .to_array()?;

    Raster::new(stats, data)
}

/// Whole cells covering `span`, truncated
fn grid_dimension(span: f64, pixel_size: f64, what: &str) -> Result<usize> {
    let cells = (span / pixel_size).trunc();

    if !(cells >= 1.0) {
        return Err(ZoneError::Rasterization(format!(
            "Extent of {} with pixel size {} gives {} {}", span, pixel_size, cells, what)));
    }

    if cells > i32::MAX as f64 {
        return Err(ZoneError::Rasterization(format!("{} {} is too large", cells, what)));
    }

    Ok(cells as usize)
}

#[cfg(test)]
mod rasterizer_test {
    use super::*;
    use crate::util::test_util::{square, square_layer, utm_33n};
    use crate::vector::{wgs84, ZoneFeature};
    use crate::zone::Zone;

    fn classified(layer: &mut ZoneLayer, zones: &[Zone]) {
        for (f, z) in layer.features.iter_mut().zip(zones.iter()) {
            f.zone = Some(*z);
        }
    }

    #[test]
    fn test_grid_definition() {
        let mut layer = square_layer(utm_33n(), &[(1050.0, 2050.0, 100.0)]);
        classified(&mut layer, &[Zone::Original]);

        // 100 wide with 30 unit cells truncates to 3 cells
        let raster = rasterize(&layer, 30.0, &wgs84().unwrap()).unwrap();

        assert_eq!(raster.stats.num_cols, 3);
        assert_eq!(raster.stats.num_rows, 3);
        assert_eq!(raster.stats.geo_transform(), [1000.0, 30.0, 0.0, 2100.0, 0.0, -30.0]);
        assert_eq!(raster.stats.no_data_value, 0.0);
        assert_eq!(SpatialRef::from_wkt(&raster.stats.projection).unwrap().auth_code().unwrap(), 4326);

        assert!(raster.data.iter().all(|v| *v == 1));
    }

    #[test]
    fn test_coverage_and_burn_order() {
        let mut layer = square_layer(utm_33n(), &[
            (50.0, 50.0, 100.0),
            (50.0, 50.0, 40.0),
            (85.0, 85.0, 10.0),
        ]);
        // later features overwrite earlier ones
        classified(&mut layer, &[Zone::Far, Zone::Near, Zone::Original]);
        layer.features.push(ZoneFeature::new(square(10.0, 10.0, 10.0), vec![]));

        let raster = rasterize(&layer, 10.0, &utm_33n()).unwrap();

        assert_eq!(raster.stats.num_cells(), 100);

        let counts = raster.count_values();
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&16));
        assert_eq!(counts.get(&3), Some(&83));
        assert_eq!(counts.get(&0), None);
        assert_eq!(counts.values().sum::<usize>(), raster.stats.num_cells());

        assert_eq!(raster.value_at(50.0 - 5.0, 50.0 + 5.0), Some(2));
        assert_eq!(raster.value_at(85.0, 85.0), Some(1));
    }

    #[test]
    fn test_no_data_outside_features() {
        let mut layer = square_layer(utm_33n(), &[(0.0, 0.0, 20.0), (90.0, 90.0, 20.0)]);
        classified(&mut layer, &[Zone::Original, Zone::Original]);

        let raster = rasterize(&layer, 10.0, &utm_33n()).unwrap();
        assert_eq!(raster.stats.num_cells(), 110 * 110 / 100);

        let counts = raster.count_values();
        assert_eq!(counts.get(&1), Some(&8));
        assert_eq!(counts.get(&0), Some(&(121 - 8)));
    }

    #[test]
    fn test_degenerate_extent() {
        let mut layer = square_layer(utm_33n(), &[(0.0, 0.0, 0.5)]);
        classified(&mut layer, &[Zone::Original]);

        assert!(matches!(rasterize(&layer, 1.0, &utm_33n()), Err(ZoneError::Rasterization(_))));
        assert!(matches!(rasterize(&layer, 0.0, &utm_33n()), Err(ZoneError::Rasterization(_))));
        assert!(matches!(rasterize(&layer, f64::NAN, &utm_33n()), Err(ZoneError::Rasterization(_))));

        let empty = ZoneLayer::new(utm_33n(), vec![]);
        assert!(matches!(rasterize(&empty, 1.0, &utm_33n()), Err(ZoneError::Rasterization(_))));
    }
}
