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
use std::path::{Path, PathBuf};
use zone_util::util::remove_dataset;

/// Removes the output when `clean` is set, fails when it exists otherwise
pub fn prepare_output(path: &Path, clean: bool) -> Result<()> {
    if clean {
        debug!("Removing/cleaning Output {:?}", path);
        remove_dataset(path)?;
    }

    if path.exists() {
        anyhow::bail!("Output {:?} already exists, use --clean to replace it", path);
    }

    Ok(())
}

pub fn print_written(paths: &[&PathBuf]) {
    for path in paths {
        println!("Wrote {}", path.display());
    }
}
