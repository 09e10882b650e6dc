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
use gdal::spatial_ref::AxisMappingStrategy;
use gdal::vector::{Geometry, LayerAccess, OGRwkbGeometryType};
use gdal::Dataset;
use itertools::Itertools;
use log::{debug, info, warn};
use std::convert::TryFrom;
use std::path::Path;

use crate::errors::{Result, ZoneError};
use crate::vector::{to_multi_polygon, FieldSchema, ZoneFeature, ZoneLayer};
use crate::zone::{Zone, ZONE_FIELD};

/// Reads the first layer of a vector dataset.
///
/// Geometries become valid MultiPolygons.  A `zone` column, if present, is read into
/// [`ZoneFeature::zone`] instead of the attributes, so a layer written by the builder can be
/// loaded again for rasterizing.
pub fn load(path: &Path) -> Result<ZoneLayer> {

    let dataset = Dataset::open(path)
        .map_err(|e| ZoneError::InvalidInput(format!("Unable to open {:?}: {}", path, e)))?;

    let layer_count = dataset.layer_count();
    if layer_count == 0 {
        return Err(ZoneError::InvalidInput(format!("{:?} has no vector layers", path)));
    }
    if layer_count > 1 {
        warn!("{:?} has {} layers, only the first is used", path, layer_count);
    }

    let mut layer = dataset.layer(0)?;

    let mut srs = layer.spatial_ref()
        .ok_or_else(|| ZoneError::InvalidInput(format!("Layer {} in {:?} has no CRS", layer.name(), path)))?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let mut zone_field_name = None;
    let mut fields = Vec::new();

    for field in layer.defn().fields() {
        let name = field.name();
        if name.eq_ignore_ascii_case(ZONE_FIELD) {
            zone_field_name = Some(name);
            continue;
        }
        fields.push(FieldSchema {
            name,
            field_type: field.field_type(),
        });
    }

    debug!("Layer {} fields: [{}]", layer.name(), fields.iter().map(|f| &f.name).join(", "));

    let mut features = Vec::new();

    for (idx, feature) in layer.features().enumerate() {

        let geometry = match feature.geometry() {
            Some(geom) => {
                let multi = to_multi_polygon(geom)?;
                if multi.is_empty() && !geom.is_empty() {
                    return Err(ZoneError::InvalidInput(format!(
                        "Feature {} in {:?} is a {}, not a polygon", idx, path, geom.geometry_name())));
                }
                multi
            }
            None => {
                warn!("Feature {} in {:?} has no geometry", idx, path);
                Geometry::empty(OGRwkbGeometryType::wkbMultiPolygon)?
            }
        };

        let attributes = feature.fields()
            .filter(|(name, _)| Some(name) != zone_field_name.as_ref())
            .collect();

        // a null zone stays unclassified, any other value must be a zone
        let zone = match &zone_field_name {
            Some(name) => match feature.field_as_integer64_by_name(name)? {
                Some(v) => Some(Zone::try_from(v).map_err(|_| ZoneError::InvalidInput(format!(
                    "Feature {} in {:?} has {} value {}, expected 1, 2 or 3", idx, path, name, v)))?),
                None => None,
            },
            None => None,
        };

        features.push(ZoneFeature { geometry, attributes, zone });
    }

    if features.is_empty() {
        return Err(ZoneError::InvalidInput(format!("{:?} has no features", path)));
    }

    info!("Loaded {} features from {:?}", features.len(), path);

    Ok(ZoneLayer { srs, fields, features })
}
