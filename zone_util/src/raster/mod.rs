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
use ndarray::Array2;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::collections::BTreeMap;

use crate::errors::{Result, ZoneError};

mod raster_stats;
mod rasterizer;
mod remap;

pub use raster_stats::*;
pub use rasterizer::*;
pub use remap::*;

/// Cell value outside every zone
pub const NO_DATA: i16 = 0;

/// Single band Int16 grid held in memory, indexed [row, col]
#[derive(Debug, Clone)]
pub struct Raster
{
    pub stats: RasterStats,
    pub data: Array2<i16>,
}

impl Raster {
    pub fn new(stats: RasterStats, data: Array2<i16>) -> Result<Raster> {
        if data.dim() != (stats.num_rows, stats.num_cols) {
            return Err(ZoneError::Rasterization(format!(
                "Data shape {:?} does not match {} rows x {} cols",
                data.dim(), stats.num_rows, stats.num_cols)));
        }

        Ok(Raster { stats, data })
    }

    /// Value of the cell holding the coordinate
    pub fn value_at(&self, x_coord: f64, y_coord: f64) -> Option<i16> {
        self.stats.cell_of(x_coord, y_coord)
            .map(|(row, col)| self.data[[row, col]])
    }

    /// Number of cells per value
    pub fn count_values(&self) -> BTreeMap<i16, usize> {
        self.data.par_iter().fold(BTreeMap::new, |mut acc, v| {
            *acc.entry(*v).or_insert(0) += 1;
            acc
        }).reduce(BTreeMap::new, |mut a, b| {
            for (k, v) in b {
                *a.entry(k).or_insert(0) += v;
            }
            a
        })
    }
}
