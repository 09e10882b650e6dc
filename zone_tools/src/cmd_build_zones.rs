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
use zone_util::io::{load, write_layer};
use zone_util::util::format_duration;
use zone_util::vector::build_zones;

use crate::output_args::{prepare_output, print_written};

#[derive(StructOpt)]
pub struct BuildZonesArgs {
    #[structopt(parse(from_os_str), long)]
    input: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output: PathBuf,

    #[structopt(long)]
    clean: bool,
}

pub fn run_build_zones(args: &BuildZonesArgs, config: &PipelineConfig) -> Result<()> {
    let now = Instant::now();

    prepare_output(&args.output, args.clean)?;

    let layer = load(&args.input)?;
    let zones = build_zones(&layer, &config.zones)?;

    write_layer(&zones, &args.output, &config.output.vector_driver)?;

    print_written(&[&args.output]);

    debug!("Finished in {}", format_duration(now.elapsed()));

    Ok(())
}
