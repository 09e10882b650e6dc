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
use gdal::vector::{Feature, FieldDefn, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType};
use gdal::DriverManager;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{Result, ZoneError};
use crate::util::remove_dataset;
use crate::vector::ZoneLayer;
use crate::zone::ZONE_FIELD;

/// Writes the layer as MultiPolygons with its attribute columns plus an integer `zone` column.
///
/// The output must not exist.  If writing fails part way the files written so far are removed.
pub fn write_layer(layer: &ZoneLayer, path: &Path, driver_name: &str) -> Result<()> {
    if path.exists() {
        return Err(ZoneError::InvalidInput(format!("Output {:?} already exists", path)));
    }

    if let Err(e) = write_layer_files(layer, path, driver_name) {
        debug!("Writing {:?} failed, removing partial output", path);
        remove_dataset(path)?;
        return Err(e);
    }

    info!("Wrote {} features to {:?}", layer.len(), path);

    Ok(())
}

fn write_layer_files(layer: &ZoneLayer, path: &Path, driver_name: &str) -> Result<()> {
    let driver = DriverManager::get_driver_by_name(driver_name)?;
    let mut dataset = driver.create_vector_only(path)?;

    let layer_name = path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(ZONE_FIELD);

    {
        let output_layer = dataset.create_layer(LayerOptions {
            name: layer_name,
            srs: Some(&layer.srs),
            ty: OGRwkbGeometryType::wkbMultiPolygon,
            options: None,
        })?;

        for field in layer.fields.iter() {
            FieldDefn::new(&field.name, field.field_type)?.add_to_layer(&output_layer)?;
        }
        FieldDefn::new(ZONE_FIELD, OGRFieldType::OFTInteger)?.add_to_layer(&output_layer)?;

        // Drivers may shorten or rename fields (shapefiles keep 10 characters), fields are
        // created in order so the first ones match the schema
        let created_names: Vec<String> = output_layer.defn().fields().map(|f| f.name()).collect();
        let output_names: HashMap<&str, &str> = layer.fields.iter()
            .zip(created_names.iter())
            .map(|(field, created)| (field.name.as_str(), created.as_str()))
            .collect();

        for (field, created) in layer.fields.iter().zip(created_names.iter()) {
            if field.name != *created {
                warn!("Field {} written as {}", field.name, created);
            }
        }

        let zone_name = created_names.last().map(|s| s.as_str()).unwrap_or(ZONE_FIELD);

        for zone_feature in layer.features.iter() {
            let mut ft = Feature::new(output_layer.defn())?;

            ft.set_geometry(zone_feature.geometry.clone())?;

            // Copy fields over
            for (name, value) in zone_feature.attributes.iter() {
                let name = output_names.get(name.as_str()).copied().unwrap_or(name.as_str());
                match value {
                    Some(v) => ft.set_field(name, v)?,
                    None => ft.set_field_null(name)?,
                }
            }

            if let Some(zone) = zone_feature.zone {
                ft.set_field_integer(zone_name, zone.value() as i32)?;
            }

            ft.create(&output_layer)?;
        }
    }

    dataset.close()?;

    Ok(())
}
