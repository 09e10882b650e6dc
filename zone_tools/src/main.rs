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
use gdal::version_info;
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use crate::cmd_build_zones::{run_build_zones, BuildZonesArgs};
use crate::cmd_rasterize::{run_rasterize, RasterizeArgs};
use crate::cmd_remap::{run_remap, RemapArgs};
use crate::cmd_run::{run_all, RunArgs};
use crate::config_args::ConfigArgs;

mod cmd_build_zones;
mod cmd_rasterize;
mod cmd_remap;
mod cmd_run;
mod config_args;
mod output_args;

#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(flatten)]
    config: ConfigArgs,

    #[structopt(subcommand)]
    cmd: Command
}

#[derive(StructOpt)]
enum Command {
    #[structopt(help="Buffers every polygon into an original zone, a near ring and a far ring")]
    BuildZones(BuildZonesArgs),

    #[structopt(help="Burns the zone field of a zone layer into an Int16 GeoTIFF")]
    Rasterize(RasterizeArgs),

    #[structopt(help="Replaces zone numbers with risk scores 100/50/25")]
    Remap(RemapArgs),

    #[structopt(help="Runs build-zones, rasterize and remap, writing all three outputs")]
    Run(RunArgs),
}

fn run() -> Result<()> {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    debug!("GDAL version: {}", version_info("--version"));

    let config = args.config.load()?;
    debug!("Configuration\n{}", config);

    match &args.cmd {
        Command::BuildZones(r) => {
            run_build_zones(r, &config)?;
        }
        Command::Rasterize(r) => {
            run_rasterize(r, &config)?;
        }
        Command::Remap(r) => {
            run_remap(r)?;
        }
        Command::Run(r) => {
            run_all(r, &config)?;
        }
    }

    Ok(())
}

fn main() {
    run().unwrap();
}
