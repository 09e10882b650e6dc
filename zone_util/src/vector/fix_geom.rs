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
use gdal::cpl::CslStringList;
use gdal::vector::{geometry_type_to_name, Geometry, OGRwkbGeometryType};
use log::debug;

use crate::errors::{geometry_err, Result};

/// Returns a valid 2D MultiPolygon holding the polygonal parts of `geom`.
///
/// Polygons are wrapped, collections keep only their polygons (buffer differences and
/// make_valid can leave lines or points behind).  Anything without a polygonal part
/// comes back as an empty MultiPolygon.
pub fn to_multi_polygon(geom: &Geometry) -> Result<Geometry> {

    let mut geom = geom.clone();
    geom.flatten_to_2d();

    if !geom.is_empty() && !geom.is_valid() {
        debug!("Repairing invalid {}", geom.geometry_name());
        geom = geom.make_valid(&CslStringList::new())
            .map_err(|e| geometry_err("make_valid", e))?;
    }

    let mut multi = Geometry::empty(OGRwkbGeometryType::wkbMultiPolygon)
        .map_err(|e| geometry_err("Creating multipolygon", e))?;

    add_polygons(&geom, &mut multi)?;

    Ok(multi)
}

fn add_polygons(geom: &Geometry, multi: &mut Geometry) -> Result<()> {
    if geom.is_empty() {
        return Ok(());
    }

    match geom.geometry_type() {
        OGRwkbGeometryType::wkbPolygon => {
            multi.add_geometry(geom.clone())
                .map_err(|e| geometry_err("Adding polygon", e))?;
        }
        OGRwkbGeometryType::wkbMultiPolygon | OGRwkbGeometryType::wkbGeometryCollection => {
            for i in 0..geom.geometry_count() {
                let sub_geom = geom.get_geometry(i);
                add_polygons(&sub_geom, multi)?;
            }
        }
        other => {
            debug!("Dropping non polygonal part {}", geometry_type_to_name(other));
        }
    }

    Ok(())
}
