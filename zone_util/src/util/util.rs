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
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::fs::remove_file;
use log::debug;

use crate::errors::Result;

pub fn format_duration(d: Duration) -> String {
    let mut secs = d.as_secs();
    let hours = secs / 3600;
    secs = secs % 3600;
    let minutes = secs / 60;
    secs = secs % 60;

    let ms = d.as_millis() % 1000;

    format!("{}h {}m {}s {}ms", hours, minutes, secs, ms )
}

// Side files a shapefile writer creates next to the .shp
const SHAPEFILE_SIDECARS: [&str; 5] = ["shx", "dbf", "prj", "cpg", "qix"];

/// The file itself plus, for shapefiles, the sidecar files written with it
pub fn dataset_files(path: &Path) -> Vec<PathBuf> {
    let mut files = vec![path.to_path_buf()];

    let is_shapefile = path.extension()
        .map(|e| e.eq_ignore_ascii_case("shp"))
        .unwrap_or(false);

    if is_shapefile {
        files.extend(SHAPEFILE_SIDECARS.iter().map(|ext| path.with_extension(ext)));
    }

    files
}

/// Removes a dataset and its sidecar files, missing files are ignored
pub fn remove_dataset(path: &Path) -> Result<()> {
    for file in dataset_files(path) {
        if file.exists() {
            debug!("Removing {:?}", &file);
            remove_file(&file)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        let d = Duration::from_millis(3_723_045);
        assert_eq!(format_duration(d), "1h 2m 3s 45ms");
    }

    #[test]
    fn test_dataset_files() {
        let files = dataset_files(Path::new("/tmp/out/buffered_zones.shp"));
        assert_eq!(files.len(), 6);
        assert!(files.contains(&PathBuf::from("/tmp/out/buffered_zones.dbf")));

        let files = dataset_files(Path::new("/tmp/out/zone_raster.tif"));
        assert_eq!(files, vec![PathBuf::from("/tmp/out/zone_raster.tif")]);
    }
}
