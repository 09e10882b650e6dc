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
use itertools::Itertools;
use log::{info, warn};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{OutputConfig, PipelineConfig};
use crate::errors::{Result, ZoneError};
use crate::io::{load, write_layer, write_raster};
use crate::raster::{rasterize, remap, RemapTable};
use crate::util::{format_duration, remove_dataset};
use crate::vector::{build_zones, srs_from_epsg};
use crate::zone::Zone;

/// Files written by one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub buffered_zones: PathBuf,
    pub zone_raster: PathBuf,
    pub remapped_zones: PathBuf,
}

impl PipelineOutputs {
    pub fn new(output_dir: &Path, config: &OutputConfig) -> Self {
        PipelineOutputs {
            buffered_zones: output_dir.join(&config.buffered_zones),
            zone_raster: output_dir.join(&config.zone_raster),
            remapped_zones: output_dir.join(&config.remapped_zones),
        }
    }

    pub fn paths(&self) -> [&Path; 3] {
        [&self.buffered_zones, &self.zone_raster, &self.remapped_zones]
    }
}

/// Loads `input`, builds the zones, rasterizes and remaps them, writing all three outputs to
/// `output_dir`.
///
/// Either every output is written or none is: on failure the files this run wrote are removed.
/// Existing outputs are removed first when `clean` is set, otherwise they fail the run before
/// any work is done.
pub fn run_pipeline(input: &Path, output_dir: &Path, config: &PipelineConfig, clean: bool) -> Result<PipelineOutputs> {
    config.validate()?;

    let outputs = PipelineOutputs::new(output_dir, &config.output);

    for path in outputs.paths().iter() {
        if clean {
            remove_dataset(path)?;
        } else if path.exists() {
            return Err(ZoneError::InvalidInput(format!(
                "Output {:?} already exists, use clean to replace it", path)));
        }
    }

    create_dir_all(output_dir)?;

    let now = Instant::now();

    if let Err(e) = run_stages(input, &outputs, config) {
        for path in outputs.paths().iter() {
            if let Err(rm_err) = remove_dataset(path) {
                warn!("Unable to remove partial output {:?}: {}", path, rm_err);
            }
        }
        return Err(e);
    }

    info!("Pipeline finished in {}", format_duration(now.elapsed()));

    Ok(outputs)
}

fn run_stages(input: &Path, outputs: &PipelineOutputs, config: &PipelineConfig) -> Result<()> {
    let input_id = input.display().to_string();

    let layer = run_stage("load", &input_id, || load(input))?;

    let zones = run_stage("build_zones", &input_id, || build_zones(&layer, &config.zones))?;

    info!("Zone feature counts: {}",
          Zone::ALL.iter().map(|z| format!("{}: {}", z, zones.count_in_zone(*z))).join(", "));

    run_stage("write_zones", &input_id,
              || write_layer(&zones, &outputs.buffered_zones, &config.output.vector_driver))?;

    let zone_raster = run_stage("rasterize", &input_id, || {
        let output_srs = srs_from_epsg(config.raster.output_epsg)?;
        rasterize(&zones, config.raster.pixel_size, &output_srs)
    })?;

    run_stage("write_zone_raster", &input_id, || write_raster(&zone_raster, &outputs.zone_raster))?;

    let remapped = run_stage("remap", &input_id, || remap(&zone_raster, &RemapTable::zone_risk_scores()))?;

    run_stage("write_remapped_zones", &input_id, || write_raster(&remapped, &outputs.remapped_zones))?;

    Ok(())
}

fn run_stage<T, F>(stage: &'static str, input_id: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    info!("Starting {}", stage);
    let now = Instant::now();

    let result = f().map_err(|e| e.in_stage(stage, input_id))?;

    info!("Finished {} in {}", stage, format_duration(now.elapsed()));

    Ok(result)
}
