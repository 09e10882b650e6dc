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
//! Hazard zone buffering, rasterization and risk score remapping.
//!
//! A polygon layer goes through three stages: [`vector::build_zones`] adds a near and a far
//! ring around every feature, [`raster::rasterize`] burns the zone numbers into a grid and
//! [`raster::remap`] turns zone numbers into risk scores.  [`pipeline::run_pipeline`] chains
//! them and writes each result to disk.

pub mod config;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod util;
pub mod vector;
pub mod zone;
