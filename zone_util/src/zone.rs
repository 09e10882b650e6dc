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
use std::convert::TryFrom;
use std::fmt;

use crate::errors::ZoneError;

/// Name of the integer field holding the zone in written layers
pub const ZONE_FIELD: &str = "zone";

/// Hazard severity tier of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    /// The hazard polygon itself
    Original = 1,
    /// Ring between the polygon and the near buffer distance
    Near = 2,
    /// Ring between the near and far buffer distances
    Far = 3,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Original, Zone::Near, Zone::Far];

    pub fn value(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i64> for Zone {
    type Error = ZoneError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Zone::Original),
            2 => Ok(Zone::Near),
            3 => Ok(Zone::Far),
            _ => Err(ZoneError::InvalidInput(format!("{} is not a zone value", value))),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Original => "original",
            Zone::Near => "near ring",
            Zone::Far => "far ring",
        };
        write!(f, "{} ({})", self.value(), name)
    }
}

#[cfg(test)]
mod zone_test {
    use super::*;

    #[test]
    fn test_zone_values() {
        let values: Vec<i16> = Zone::ALL.iter().map(|z| z.value()).collect();
        assert_eq!(values, vec![1, 2, 3]);

        assert_eq!(Zone::try_from(2).unwrap(), Zone::Near);
        assert!(Zone::try_from(0).is_err());
        assert!(Zone::try_from(4).is_err());
    }
}
