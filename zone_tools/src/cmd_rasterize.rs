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
use anyhow::Result;
use log::debug;
use std::path::PathBuf;
use std::time::Instant;
use structopt::StructOpt;
use zone_util::config::PipelineConfig;
use zone_util::io::{load, write_raster};
use zone_util::raster::rasterize;
use zone_util::util::format_duration;
use zone_util::vector::srs_from_epsg;

use crate::output_args::{prepare_output, print_written};

#[derive(StructOpt)]
pub struct RasterizeArgs {
    #[structopt(parse(from_os_str), long, help="Zone layer with an integer zone field, as written by build-zones")]
    input: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output: PathBuf,

    #[structopt(long, help="Cell size in layer units, overrides the configured value")]
    pixel_size: Option<f64>,

    #[structopt(long)]
    clean: bool,
}

pub fn run_rasterize(args: &RasterizeArgs, config: &PipelineConfig) -> Result<()> {
    let now = Instant::now();

    prepare_output(&args.output, args.clean)?;

    let pixel_size = args.pixel_size.unwrap_or(config.raster.pixel_size);
    let output_srs = srs_from_epsg(config.raster.output_epsg)?;

    let layer = load(&args.input)?;
    let raster = rasterize(&layer, pixel_size, &output_srs)?;

    debug!("Cell counts {:?}", raster.count_values());

    write_raster(&raster, &args.output)?;

    print_written(&[&args.output]);

    debug!("Finished in {}", format_duration(now.elapsed()));

    Ok(())
}
