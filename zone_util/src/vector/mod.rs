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
use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};

use crate::errors::Result;

mod layer;
mod fix_geom;
mod utm_proj;
mod zone_builder;

pub use layer::*;
pub use fix_geom::*;
pub use utm_proj::*;
pub use zone_builder::*;

pub const WGS84_EPSG: u32 = 4326;

/// Spatial ref from an EPSG code, always x = easting / longitude
pub fn srs_from_epsg(epsg: u32) -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_epsg(epsg)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

pub fn wgs84() -> Result<SpatialRef> {
    srs_from_epsg(WGS84_EPSG)
}
