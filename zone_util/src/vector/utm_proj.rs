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
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use std::fmt;
use num_traits::{Float, NumCast};
use log::{debug, warn};

use crate::errors::{geometry_err, Result, ZoneError};
use crate::vector::{srs_from_epsg, wgs84, ZoneLayer};

const NUM_UTM_ZONES: i32 = 60;

// Beyond these latitudes UTM distortion gets large (polar stereographic territory)
const MAX_UTM_LAT: f64 = 84.0;
const MIN_UTM_LAT: f64 = -80.0;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct UtmProj {
    zone: u8,
    is_north: bool
}

impl UtmProj {

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn is_north(&self) -> bool {
        self.is_north
    }

    /// WGS 84 / UTM EPSG code, 326xx north and 327xx south
    pub fn epsg(&self) -> u32 {
        let base = if self.is_north { 32600 } else { 32700 };
        base + self.zone as u32
    }

    pub fn get_spatial_ref(&self) -> Result<SpatialRef> {
        srs_from_epsg(self.epsg())
    }

    pub fn find_utm<F: Float>(x_lon: F, y_lat: F) -> Result<UtmProj> {

        let (lon, lat) = match (<f64 as NumCast>::from(x_lon), <f64 as NumCast>::from(y_lat)) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => (lon, lat),
            _ => return Err(ZoneError::Geometry("Cannot pick a UTM zone for a non finite coordinate".to_string())),
        };

        let utm_zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;

        // 180 degrees falls on the edge of the last zone
        let utm_zone = utm_zone.max(1).min(NUM_UTM_ZONES);

        Ok(UtmProj {
            zone: utm_zone as u8,
            is_north: lat >= 0.0
        })
    }

    /// UTM zone at the center of the layer's extent
    pub fn estimate(layer: &ZoneLayer) -> Result<UtmProj> {
        let extent = layer.extent()
            .ok_or_else(|| ZoneError::Geometry("Cannot estimate a UTM zone for a layer without geometry".to_string()))?;

        let (cx, cy) = extent.center();

        let geographic = wgs84()?;

        let (lon, lat) = if layer.srs == geographic {
            (cx, cy)
        } else {
            let transform = CoordTransform::new(&layer.srs, &geographic)
                .map_err(|e| geometry_err("Creating transform to WGS84", e))?;

            let mut xs = [cx];
            let mut ys = [cy];
            transform.transform_coords(&mut xs, &mut ys, &mut [])
                .map_err(|e| geometry_err("Transforming layer center to WGS84", e))?;

            (xs[0], ys[0])
        };

        if lat > MAX_UTM_LAT || lat < MIN_UTM_LAT {
            warn!("Layer center latitude {} is outside the UTM range, buffers will be distorted", lat);
        }

        let utm = UtmProj::find_utm(lon, lat)?;

        debug!("Layer center {},{} (lon/lat {},{}) is in {}", cx, cy, lon, lat, utm);

        Ok(utm)
    }
}

impl fmt::Display for UtmProj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTM Zone: {}, North? {} (EPSG:{})", self.zone, self.is_north, self.epsg())
    }
}
