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
use serde::Deserialize;
use std::fmt;
use std::fs::read_to_string;
use std::path::Path;
use log::debug;

use crate::errors::{Result, ZoneError};

/// Buffer ring settings, distances are in meters of the local UTM projection
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ZoneConfig {
    pub near_distance: f64,
    pub far_distance: f64,

    //segments per quarter circle when buffering
    pub quad_segs: u32,

    //rings with an empty difference are kept as features with an empty geometry
    pub keep_empty_rings: bool,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfig {
            near_distance: 2000.0,
            far_distance: 4000.0,
            quad_segs: 16,
            keep_empty_rings: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RasterConfig {
    /// Cell size in units of the zone layer's CRS
    pub pixel_size: f64,

    /// Projection written to the zone and remapped rasters
    pub output_epsg: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        RasterConfig {
            pixel_size: 0.005,
            output_epsg: 4326,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    /// OGR driver used for the buffered zones
    pub vector_driver: String,
    pub buffered_zones: String,
    pub zone_raster: String,
    pub remapped_zones: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            vector_driver: "ESRI Shapefile".to_string(),
            buffered_zones: "buffered_zones.shp".to_string(),
            zone_raster: "zone_raster.tif".to_string(),
            remapped_zones: "remapped_zones.tif".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineConfig {
    pub zones: ZoneConfig,
    pub raster: RasterConfig,
    pub output: OutputConfig,
}

impl PipelineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<PipelineConfig> {
        let config: PipelineConfig = toml::from_str(toml_str)
            .map_err(|e| ZoneError::Config(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<PipelineConfig> {
        debug!("Reading config {:?}", path);

        let toml_str = read_to_string(path)
            .map_err(|e| ZoneError::Config(format!("Unable to read {:?}: {}", path, e)))?;

        PipelineConfig::from_toml_str(&toml_str)
    }

    /// Config from the file if given, otherwise the defaults
    pub fn from_optional_file(path: Option<&Path>) -> Result<PipelineConfig> {
        match path {
            Some(p) => PipelineConfig::from_file(p),
            None => Ok(PipelineConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.zones.validate()?;
        self.raster.validate()?;

        let names = [
            &self.output.buffered_zones,
            &self.output.zone_raster,
            &self.output.remapped_zones,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ZoneError::Config("Output file names must not be empty".to_string()));
        }

        Ok(())
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.near_distance.is_finite() && self.near_distance > 0.0) {
            return Err(ZoneError::Config(format!(
                "near_distance must be positive, got {}", self.near_distance)));
        }
        if !(self.far_distance.is_finite() && self.far_distance > self.near_distance) {
            return Err(ZoneError::Config(format!(
                "far_distance {} must be greater than near_distance {}",
                self.far_distance, self.near_distance)));
        }
        if self.quad_segs == 0 {
            return Err(ZoneError::Config("quad_segs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl RasterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.pixel_size.is_finite() && self.pixel_size > 0.0) {
            return Err(ZoneError::Config(format!(
                "pixel_size must be positive, got {}", self.pixel_size)));
        }
        Ok(())
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rings: {} m / {} m ({} quad segs, keep empty: {})\nPixel size: {} EPSG: {}\nOutputs: {}, {}, {} ({})",
               self.zones.near_distance,
               self.zones.far_distance,
               self.zones.quad_segs,
               self.zones.keep_empty_rings,
               self.raster.pixel_size,
               self.raster.output_epsg,
               self.output.buffered_zones,
               self.output.zone_raster,
               self.output.remapped_zones,
               self.output.vector_driver
        )
    }
}
