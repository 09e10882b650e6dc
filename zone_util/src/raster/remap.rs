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
use core::fmt;
use itertools::Itertools;
use ndarray::Zip;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::BTreeMap;
use log::debug;

use crate::errors::{Result, ZoneError};
use crate::raster::{Raster, NO_DATA};

/// Risk score of each zone: original polygon 100, near ring 50, far ring 25
pub const ZONE_RISK_SCORES: [(i16, i16); 3] = [(1, 100), (2, 50), (3, 25)];

/// Closed mapping from cell value to output value; no data is never looked up
#[derive(Debug, Clone, PartialEq)]
pub struct RemapTable {
    table: BTreeMap<i16, i16>,
}

impl RemapTable {
    pub fn new(pairs: &[(i16, i16)]) -> Result<RemapTable> {
        let mut table = BTreeMap::new();

        for &(from, to) in pairs {
            if from == NO_DATA {
                return Err(ZoneError::Config(format!("No data value {} cannot be remapped", NO_DATA)));
            }
            if table.insert(from, to).is_some() {
                return Err(ZoneError::Config(format!("Value {} is mapped twice", from)));
            }
        }

        Ok(RemapTable { table })
    }

    pub fn zone_risk_scores() -> RemapTable {
        RemapTable {
            table: ZONE_RISK_SCORES.iter().cloned().collect(),
        }
    }

    #[inline]
    pub fn get(&self, value: i16) -> Option<i16> {
        if value == NO_DATA {
            return Some(NO_DATA);
        }
        self.table.get(&value).copied()
    }
}

impl fmt::Display for RemapTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.table.iter().map(|(k, v)| format!("{}->{}", k, v)).join(", "))
    }
}

/// Applies `table` to every cell.  No data passes through, any other value missing from the
/// table is an error naming the first such cell in row major order.
///
/// The output has the same grid and projection as the input.
pub fn remap(raster: &Raster, table: &RemapTable) -> Result<Raster> {

    let unmapped = Zip::indexed(&raster.data)
        .into_par_iter()
        .filter(|(_, v)| table.get(**v).is_none())
        .map(|((row, col), v)| (row, col, *v))
        .min_by_key(|&(row, col, _)| (row, col));

    if let Some((row, col, value)) = unmapped {
        return Err(ZoneError::UnmappedValue { value, row, col });
    }

    let mut data = raster.data.clone();
    data.par_map_inplace(|v| {
        *v = table.get(*v).unwrap_or(NO_DATA);
    });

    debug!("Remapped {} cells with {}", data.len(), table);

    Raster::new(raster.stats.clone(), data)
}

#[cfg(test)]
mod remap_test {
    use super::*;
    use crate::raster::RasterStats;
    use ndarray::{arr2, Array2};

    fn raster(data: Array2<i16>) -> Raster {
        let (num_rows, num_cols) = data.dim();
        let stats = RasterStats {
            origin_y: 46.0,
            origin_x: 6.0,
            pixel_height: -0.005,
            pixel_width: 0.005,
            num_rows,
            num_cols,
            no_data_value: 0.0,
            projection: "GEOGCS[\"WGS 84\"]".to_string(),
        };
        Raster::new(stats, data).unwrap()
    }

    #[test]
    fn test_zone_scores() {
        let input = raster(arr2(&[[0, 1, 2], [3, 2, 0]]));

        let output = remap(&input, &RemapTable::zone_risk_scores()).unwrap();

        assert_eq!(output.data, arr2(&[[0, 100, 50], [25, 50, 0]]));
        assert_eq!(output.stats, input.stats);
    }

    #[test]
    fn test_remapped_values_are_rejected() {
        let input = raster(arr2(&[[0, 1, 2], [3, 2, 0]]));
        let table = RemapTable::zone_risk_scores();

        let output = remap(&input, &table).unwrap();

        match remap(&output, &table) {
            Err(ZoneError::UnmappedValue { value, row, col }) => {
                assert_eq!((value, row, col), (100, 0, 1));
            }
            other => panic!("Expected unmapped value, got {:?}", other.map(|r| r.data)),
        }
    }

    #[test]
    fn test_first_unmapped_cell_reported() {
        let mut data = Array2::<i16>::from_elem((50, 40), 1);
        data[[30, 5]] = 7;
        data[[12, 39]] = -3;
        data[[12, 2]] = 4;

        let err = remap(&raster(data), &RemapTable::zone_risk_scores()).unwrap_err();
        assert!(matches!(err, ZoneError::UnmappedValue { value: 4, row: 12, col: 2 }));
    }

    #[test]
    fn test_substitute_table() {
        let table = RemapTable::new(&[(1, 10), (2, 20), (3, 30)]).unwrap();
        let output = remap(&raster(arr2(&[[3, 0], [1, 2]])), &table).unwrap();
        assert_eq!(output.data, arr2(&[[30, 0], [10, 20]]));

        assert_eq!(table.to_string(), "{1->10, 2->20, 3->30}");

        assert!(RemapTable::new(&[(0, 5)]).is_err());
        assert!(RemapTable::new(&[(1, 5), (1, 6)]).is_err());
    }

    #[test]
    fn test_all_no_data() {
        let output = remap(&raster(Array2::zeros((4, 4))), &RemapTable::zone_risk_scores()).unwrap();
        assert!(output.data.iter().all(|v| *v == NO_DATA));
    }
}
