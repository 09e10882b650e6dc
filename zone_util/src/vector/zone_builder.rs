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
use gdal::vector::Geometry;
use log::{debug, info};
use std::time::Instant;

use crate::config::ZoneConfig;
use crate::errors::{geometry_err, Result, ZoneError};
use crate::util::format_duration;
use crate::vector::{to_multi_polygon, union_all, UtmProj, ZoneFeature, ZoneLayer};
use crate::zone::Zone;

/// Builds the zone layer: the original polygons (zone 1), a near ring (zone 2) and a far ring (zone 3)
/// per input feature.
///
/// Buffering happens in the UTM zone of the layer's center so distances are in meters, the result
/// is transformed back to the layer's CRS.  Rings are disjoint: the near ring has the union of all
/// originals removed, the far ring the union of all originals and all near rings.
///
/// Output order is every zone 1 feature, then every zone 2, then every zone 3, each in input order.
pub fn build_zones(layer: &ZoneLayer, config: &ZoneConfig) -> Result<ZoneLayer> {
    let now = Instant::now();

    config.validate()?;

    if layer.is_empty() {
        return Err(ZoneError::Geometry("Cannot build zones for a layer without features".to_string()));
    }

    let utm = UtmProj::estimate(layer)?;
    let utm_srs = utm.get_spatial_ref()?;

    info!("Buffering {} features in {}", layer.len(), utm);

    let projected = layer.reproject(&utm_srs)?;

    let originals: Vec<ZoneFeature> = projected.features.iter()
        .map(|f| f.derive(f.geometry.clone(), Zone::Original))
        .collect();

    let original_union = union_all(originals.iter().map(|f| &f.geometry))?;

    let near_rings = build_rings(&originals, config.near_distance, config.quad_segs,
                                 &original_union, Zone::Near)?;

    let near_union = union_all(near_rings.iter().map(|f| &f.geometry))?;
    let inner_union = near_union.union(&original_union)
        .ok_or_else(|| ZoneError::Geometry("Union of near rings and originals failed".to_string()))?;

    let far_rings = build_rings(&originals, config.far_distance, config.quad_segs,
                                &inner_union, Zone::Far)?;

    let mut combined = projected.empty_like();
    combined.features.extend(originals);

    for rings in vec![near_rings, far_rings] {
        if config.keep_empty_rings {
            combined.features.extend(rings);
        } else {
            let num_rings = rings.len();
            let before = combined.len();
            combined.features.extend(rings.into_iter().filter(|f| !f.is_empty()));
            debug!("Dropped {} empty rings", num_rings - (combined.len() - before));
        }
    }

    let zones = combined.reproject(&layer.srs)?;

    debug!("Built {} zone 1, {} zone 2, {} zone 3 features in {}",
           zones.count_in_zone(Zone::Original),
           zones.count_in_zone(Zone::Near),
           zones.count_in_zone(Zone::Far),
           format_duration(now.elapsed()));

    Ok(zones)
}

/// One ring per feature: the feature buffered by `distance` minus `inner`
fn build_rings(
    originals: &[ZoneFeature],
    distance: f64,
    quad_segs: u32,
    inner: &Geometry,
    zone: Zone,
) -> Result<Vec<ZoneFeature>> {

    let mut rings = Vec::with_capacity(originals.len());

    for feature in originals.iter() {
        let ring = if feature.is_empty() {
            to_multi_polygon(&feature.geometry)?
        } else {
            let buffered = feature.geometry.buffer(distance, quad_segs)
                .map_err(|e| geometry_err("Buffer", e))?;

            let diff = buffered.difference(inner)
                .ok_or_else(|| ZoneError::Geometry(format!("Difference failed for {} ring", zone)))?;

            to_multi_polygon(&diff)?
        };

        rings.push(feature.derive(ring, zone));
    }

    Ok(rings)
}

#[cfg(test)]
mod zone_builder_test {
    use super::*;
    use crate::util::test_util::{point, square_layer, utm_33n};
    use crate::vector::{srs_from_epsg, wgs84};
    use gdal::vector::FieldValue;
    use float_cmp::approx_eq;

    const CX: f64 = 500_000.0;
    const CY: f64 = 5_000_000.0;

    fn zones_containing(zones: &ZoneLayer, x: f64, y: f64) -> Vec<Zone> {
        let p = point(x, y);
        zones.features.iter()
            .filter(|f| !f.is_empty() && f.geometry.contains(&p))
            .filter_map(|f| f.zone)
            .collect()
    }

    #[test]
    fn test_ring_distances() {
        let layer = square_layer(utm_33n(), &[(CX, CY, 1000.0)]);

        let zones = build_zones(&layer, &ZoneConfig::default()).unwrap();

        assert_eq!(zones.len(), 3);

        let right_edge = CX + 500.0;

        assert_eq!(zones_containing(&zones, CX, CY), vec![Zone::Original]);
        assert_eq!(zones_containing(&zones, right_edge + 1000.0, CY), vec![Zone::Near]);
        assert_eq!(zones_containing(&zones, right_edge + 3000.0, CY), vec![Zone::Far]);
        assert!(zones_containing(&zones, right_edge + 5000.0, CY).is_empty());

        // below the square as well
        assert_eq!(zones_containing(&zones, CX, CY - 500.0 - 1999.0), vec![Zone::Near]);
        assert_eq!(zones_containing(&zones, CX, CY - 500.0 - 2001.0), vec![Zone::Far]);
    }

    #[test]
    fn test_rings_are_disjoint() {
        // two overlapping squares and one on its own
        let layer = square_layer(utm_33n(), &[
            (CX, CY, 1000.0),
            (CX + 600.0, CY + 300.0, 1000.0),
            (CX + 9000.0, CY, 500.0),
        ]);

        let zones = build_zones(&layer, &ZoneConfig::default()).unwrap();
        assert_eq!(zones.len(), 9);

        let zone1 = union_all(zones.features_in_zone(Zone::Original).map(|f| &f.geometry)).unwrap();
        let zone2 = union_all(zones.features_in_zone(Zone::Near).map(|f| &f.geometry)).unwrap();
        let zone12 = zone1.union(&zone2).unwrap();

        for f in zones.features_in_zone(Zone::Near) {
            let area = f.geometry.intersection(&zone1).map(|g| g.area()).unwrap_or(0.0);
            assert!(area <= 1e-6, "zone 2 overlaps zone 1 by {}", area);
        }

        for f in zones.features_in_zone(Zone::Far) {
            let area = f.geometry.intersection(&zone12).map(|g| g.area()).unwrap_or(0.0);
            assert!(area <= 1e-6, "zone 3 overlaps zones 1/2 by {}", area);
        }
    }

    #[test]
    fn test_order_and_attributes() {
        let mut layer = square_layer(utm_33n(), &[(CX, CY, 1000.0), (CX + 20_000.0, CY, 1000.0)]);
        for (i, f) in layer.features.iter_mut().enumerate() {
            f.attributes.push(("name".to_string(), Some(FieldValue::StringValue(format!("storm {}", i)))));
        }

        let zones = build_zones(&layer, &ZoneConfig::default()).unwrap();

        let order: Vec<Zone> = zones.features.iter().filter_map(|f| f.zone).collect();
        assert_eq!(order, vec![Zone::Original, Zone::Original, Zone::Near, Zone::Near, Zone::Far, Zone::Far]);

        let names: Vec<Option<FieldValue>> = zones.features.iter()
            .map(|f| f.attributes[0].1.clone())
            .collect();
        for (i, name) in names.iter().enumerate() {
            assert_eq!(*name, Some(FieldValue::StringValue(format!("storm {}", i % 2))));
        }

        // squares are far apart, the near ring is the rounded 2 km band around the first one
        let near = zones.features_in_zone(Zone::Near).next().unwrap();
        let expected = 4.0 * 1000.0 * 2000.0 + std::f64::consts::PI * 2000.0 * 2000.0;
        assert!((near.geometry.area() - expected).abs() / expected < 0.02);
    }

    #[test]
    fn test_empty_rings_kept_or_dropped() {
        // the small square's rings lie entirely inside the large one
        let layer = square_layer(utm_33n(), &[(CX, CY, 20_000.0), (CX, CY, 100.0)]);

        let zones = build_zones(&layer, &ZoneConfig::default()).unwrap();
        assert_eq!(zones.len(), 6);
        assert_eq!(zones.features.iter().filter(|f| f.is_empty()).count(), 2);
        assert_eq!(zones.count_in_zone(Zone::Near), 2);

        let config = ZoneConfig { keep_empty_rings: false, ..Default::default() };
        let zones = build_zones(&layer, &config).unwrap();
        assert_eq!(zones.len(), 4);
        assert_eq!(zones.count_in_zone(Zone::Original), 2);
        assert_eq!(zones.count_in_zone(Zone::Near), 1);
        assert_eq!(zones.count_in_zone(Zone::Far), 1);
    }

    #[test]
    fn test_geographic_input_returns_in_original_crs() {
        let wgs84 = wgs84().unwrap();
        let mut layer = ZoneLayer::new(wgs84.clone(), vec![]);
        layer.features.push(ZoneFeature::new(
            Geometry::from_wkt("POLYGON ((-90.10 30.00, -90.00 30.00, -90.00 30.10, -90.10 30.10, -90.10 30.00))").unwrap(),
            vec![]));

        let zones = build_zones(&layer, &ZoneConfig::default()).unwrap();

        assert!(zones.srs == wgs84);

        let original = zones.features_in_zone(Zone::Original).next().unwrap();
        assert!(approx_eq!(f64, original.geometry.area(), 0.01, epsilon = 1e-6));

        // 4 km is roughly 0.036 degrees of latitude
        let far = zones.features_in_zone(Zone::Far).next().unwrap();
        let env = far.geometry.envelope();
        assert!(env.MaxY > 30.13 && env.MaxY < 30.14, "far ring top at {}", env.MaxY);

        // center is just west of -90, zone 15N
        let utm = UtmProj::estimate(&layer).unwrap();
        assert_eq!(utm.epsg(), 32615);
        assert!(utm.get_spatial_ref().unwrap() == srs_from_epsg(32615).unwrap());
    }

    #[test]
    fn test_errors() {
        let layer = ZoneLayer::new(utm_33n(), vec![]);
        assert!(matches!(build_zones(&layer, &ZoneConfig::default()), Err(ZoneError::Geometry(_))));

        let layer = square_layer(utm_33n(), &[(CX, CY, 1000.0)]);
        let config = ZoneConfig { far_distance: 1000.0, ..Default::default() };
        assert!(matches!(build_zones(&layer, &config), Err(ZoneError::Config(_))));
    }
}
