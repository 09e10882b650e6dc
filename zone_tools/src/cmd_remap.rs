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
use structopt::StructOpt;
use zone_util::io::{read_raster, write_raster};
use zone_util::raster::{remap, RemapTable};

use crate::output_args::{prepare_output, print_written};

#[derive(StructOpt)]
pub struct RemapArgs {
    #[structopt(parse(from_os_str), long, help="Zone raster with values 0 to 3")]
    input: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output: PathBuf,

    #[structopt(long)]
    clean: bool,
}

pub fn run_remap(args: &RemapArgs) -> Result<()> {
    prepare_output(&args.output, args.clean)?;

    let table = RemapTable::zone_risk_scores();
    debug!("Remapping {:?} with {}", &args.input, table);

    let raster = read_raster(&args.input)?;
    let remapped = remap(&raster, &table)?;

    write_raster(&remapped, &args.output)?;

    print_written(&[&args.output]);

    Ok(())
}
