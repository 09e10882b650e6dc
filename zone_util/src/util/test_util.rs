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
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldDefn, FieldValue, Geometry, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType};
use gdal::DriverManager;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::vector::{srs_from_epsg, ZoneFeature, ZoneLayer};

/// Path to `file_name` in a fresh directory under the system temp dir
pub fn get_temp_filename(file_name: &str) -> PathBuf {
    let dir: PathBuf = [std::env::temp_dir(), PathBuf::from("zone_util_test"), PathBuf::from(Uuid::new_v4().to_string())]
        .iter().collect();

    create_dir_all(&dir).unwrap();

    dir.join(file_name)
}

pub fn utm_33n() -> SpatialRef {
    srs_from_epsg(32633).unwrap()
}

/// Axis aligned square polygon centered on cx,cy
pub fn square(cx: f64, cy: f64, side: f64) -> Geometry {
    let h = side / 2.0;
    Geometry::from_wkt(&format!(
        "POLYGON (({x0} {y0}, {x1} {y0}, {x1} {y1}, {x0} {y1}, {x0} {y0}))",
        x0 = cx - h, x1 = cx + h, y0 = cy - h, y1 = cy + h
    )).unwrap()
}

pub fn point(x: f64, y: f64) -> Geometry {
    Geometry::from_wkt(&format!("POINT ({} {})", x, y)).unwrap()
}

/// Layer with one square feature per (cx, cy, side)
pub fn square_layer(srs: SpatialRef, squares: &[(f64, f64, f64)]) -> ZoneLayer {
    let mut layer = ZoneLayer::new(srs, vec![]);
    for &(cx, cy, side) in squares {
        layer.features.push(ZoneFeature::new(square(cx, cy, side), vec![]));
    }
    layer
}

/// Writes a polygon shapefile with a `name` string field straight through GDAL
pub fn write_test_shapefile(path: &Path, srs: Option<&SpatialRef>, geometries: &[Geometry]) {
    let features: Vec<(Geometry, Option<i32>)> = geometries.iter().map(|g| (g.clone(), None)).collect();
    write_test_layer(path, srs, OGRwkbGeometryType::wkbPolygon, &features);
}

/// Writes a shapefile of `ty` geometries with a `name` field, plus an integer `zone` field when
/// any feature carries a zone value
pub fn write_test_layer(path: &Path, srs: Option<&SpatialRef>, ty: OGRwkbGeometryType::Type,
                        features: &[(Geometry, Option<i32>)]) {
    let driver = DriverManager::get_driver_by_name("ESRI Shapefile").unwrap();
    let mut dataset = driver.create_vector_only(path).unwrap();

    let with_zone = features.iter().any(|(_, z)| z.is_some());

    {
        let layer = dataset.create_layer(LayerOptions {
            name: "hazard",
            srs,
            ty,
            ..Default::default()
        }).unwrap();

        FieldDefn::new("name", OGRFieldType::OFTString).unwrap().add_to_layer(&layer).unwrap();
        if with_zone {
            FieldDefn::new("zone", OGRFieldType::OFTInteger).unwrap().add_to_layer(&layer).unwrap();
        }

        for (i, (geom, zone)) in features.iter().enumerate() {
            let mut feature = gdal::vector::Feature::new(layer.defn()).unwrap();
            feature.set_geometry(geom.clone()).unwrap();
            feature.set_field("name", &FieldValue::StringValue(format!("outlook {}", i))).unwrap();
            if let Some(z) = zone {
                feature.set_field_integer("zone", *z).unwrap();
            }
            feature.create(&layer).unwrap();
        }
    }

    dataset.close().unwrap();
}
