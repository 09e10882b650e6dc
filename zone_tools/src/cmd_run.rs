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
use std::path::PathBuf;
use structopt::StructOpt;
use zone_util::config::PipelineConfig;
use zone_util::pipeline::run_pipeline;

use crate::output_args::print_written;

#[derive(StructOpt)]
pub struct RunArgs {
    #[structopt(parse(from_os_str), long)]
    input: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output_dir: PathBuf,

    #[structopt(long, help="Replace outputs left by an earlier run")]
    clean: bool,
}

pub fn run_all(args: &RunArgs, config: &PipelineConfig) -> Result<()> {
    let outputs = run_pipeline(&args.input, &args.output_dir, config, args.clean)?;

    print_written(&[&outputs.buffered_zones, &outputs.zone_raster, &outputs.remapped_zones]);

    Ok(())
}
