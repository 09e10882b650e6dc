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

#[derive(StructOpt)]
pub struct ConfigArgs {
    #[structopt(parse(from_os_str), long, help="TOML file with [zones], [raster] and [output] sections, defaults are used when omitted")]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<PipelineConfig> {
        Ok(PipelineConfig::from_optional_file(self.config.as_deref())?)
    }
}
