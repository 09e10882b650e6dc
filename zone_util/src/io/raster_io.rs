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
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{Dataset, DriverManager};
use log::{debug, info};
use std::path::Path;

use crate::errors::{Result, ZoneError};
use crate::raster::{Raster, RasterStats, NO_DATA};
use crate::util::remove_dataset;

/// Writes a single band Int16 GeoTIFF, DEFLATE compressed, no data 0.
///
/// The output must not exist.  If writing fails part way the file is removed.
pub fn write_raster(raster: &Raster, path: &Path) -> Result<()> {
    if path.exists() {
        return Err(ZoneError::InvalidInput(format!("Output {:?} already exists", path)));
    }

    if let Err(e) = write_raster_file(raster, path) {
        debug!("Writing {:?} failed, removing partial output", path);
        remove_dataset(path)?;
        return Err(e);
    }

    info!("Wrote {} x {} raster to {:?}", raster.stats.num_cols, raster.stats.num_rows, path);

    Ok(())
}

fn write_raster_file(raster: &Raster, path: &Path) -> Result<()> {
    let stats = &raster.stats;

    let driver = DriverManager::get_driver_by_name("GTiff")?;

    let mut options = RasterCreationOptions::new();
    options.set_name_value("COMPRESS", "DEFLATE")?;

    let mut dataset = driver.create_with_band_type_with_options::<i16, _>(
        path, stats.num_cols, stats.num_rows, 1, &options)?;

    dataset.set_geo_transform(&stats.geo_transform())?;
    dataset.set_projection(&stats.projection)?;

    {
        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(NO_DATA as f64))?;

        let mut buffer = Buffer::from(raster.data.clone());
        band.write((0, 0), (stats.num_cols, stats.num_rows), &mut buffer)?;
    }

    dataset.close()?;

    Ok(())
}

/// Reads band 1 of a raster as Int16
pub fn read_raster(path: &Path) -> Result<Raster> {
    let dataset = Dataset::open(path)
        .map_err(|e| ZoneError::InvalidInput(format!("Unable to open {:?}: {}", path, e)))?;

    if dataset.raster_count() == 0 {
        return Err(ZoneError::InvalidInput(format!("{:?} has no raster bands", path)));
    }

    let band = dataset.rasterband(1)?;
    let (num_cols, num_rows) = dataset.raster_size();

    let stats = RasterStats::from_geo_transform(
        &dataset.geo_transform()?,
        num_cols,
        num_rows,
        band.no_data_value().unwrap_or(NO_DATA as f64),
        dataset.projection(),
    );

    let data = band.read_as::<i16>((0, 0), (num_cols, num_rows), (num_cols, num_rows), None)?
        .to_array()?;

    debug!("Read {:?}\n{}", path, stats);

    Raster::new(stats, data)
}
