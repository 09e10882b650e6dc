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
use gdal::errors::GdalError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZoneError>;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Rasterization error: {0}")]
    Rasterization(String),

    #[error("Value {value} at row {row} col {col} is not in the remap table")]
    UnmappedValue {
        value: i16,
        row: usize,
        col: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stage '{stage}' failed for input '{input}': {source}")]
    Stage {
        stage: &'static str,
        input: String,
        #[source]
        source: Box<ZoneError>,
    },
}

impl ZoneError {
    /// Wraps the error with the pipeline stage and the input it was working on
    pub fn in_stage(self, stage: &'static str, input: &str) -> ZoneError {
        ZoneError::Stage {
            stage,
            input: input.to_string(),
            source: Box::new(self),
        }
    }

    /// Error with any [`ZoneError::Stage`] wrappers removed
    pub fn root(&self) -> &ZoneError {
        match self {
            ZoneError::Stage { source, .. } => source.root(),
            e => e,
        }
    }
}

/// Message for a GDAL call that failed inside a geometry operation
pub(crate) fn geometry_err(op: &str, e: GdalError) -> ZoneError {
    ZoneError::Geometry(format!("{} failed: {}", op, e))
}

#[cfg(test)]
mod errors_test {
    use super::*;

    #[test]
    fn test_stage_wrapping() {
        let err = ZoneError::Rasterization("0 columns".to_string())
            .in_stage("rasterize", "buffered_zones.shp");

        let msg = err.to_string();
        assert!(msg.contains("rasterize"));
        assert!(msg.contains("buffered_zones.shp"));
        assert!(msg.contains("0 columns"));

        assert!(matches!(err.root(), ZoneError::Rasterization(_)));
    }

    #[test]
    fn test_unmapped_message() {
        let err = ZoneError::UnmappedValue { value: 25, row: 3, col: 7 };
        assert_eq!(err.to_string(), "Value 25 at row 3 col 7 is not in the remap table");
    }
}
