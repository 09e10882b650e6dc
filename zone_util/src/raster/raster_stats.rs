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
use gdal::GeoTransform;

/// Helper struct to hold the grid definition of a raster
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterStats {
    pub origin_y: f64,
    pub origin_x: f64,
    pub pixel_height: f64,
    pub pixel_width: f64,
    pub num_rows: usize,
    pub num_cols: usize,
    pub no_data_value: f64,

    //WKT projection string
    pub projection: String
}

pub const MEDIUM_EPSILON: f64 = 1e-10;

// In lat/lon this is less than a meter
pub const LARGE_EPSILON: f64 = 1e-6;

pub fn assert_float_within_eps(a: f64, b: f64, eps: f64, msg: &str) {
    let diff =  (a-b).abs();
    if diff > eps {
        let message = format!("{} Val 1: {} Val 2: {} Abs. Difference: {}  Eps: {}", msg,
                              a, b, diff, eps);
        panic!("{}", message);
    }
}

impl fmt::Display for RasterStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        write!(f, "Origin X,Y: {}, {}\nRight/Bottom: {},{}\nPixel Width/Height: {},{}\nRows: {} Cols: {}\nNo data value: {}\nProjection: {}",
               self.origin_x,
               self.origin_y,
            self.right_x_coord(),
            self.bottom_y_coord(),
               self.pixel_width,
                self.pixel_height,
            self.num_rows,
            self.num_cols,
            self.no_data_value,
            &self.projection
        )
    }
}

impl RasterStats {

    /// North up grid, no rotation
    pub fn from_geo_transform(geo_transform: &GeoTransform, num_cols: usize, num_rows: usize,
                              no_data_value: f64, projection: String) -> Self {
        RasterStats {
            origin_x: geo_transform[0],
            pixel_width: geo_transform[1],
            origin_y: geo_transform[3],
            pixel_height: geo_transform[5],
            num_rows,
            num_cols,
            no_data_value,
            projection
        }
    }

    pub fn geo_transform(&self) -> GeoTransform {
        [self.origin_x, self.pixel_width, 0.0, self.origin_y, 0.0, self.pixel_height]
    }

    pub fn num_cells(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Calculates the left side
    /// Calculates projected x coordinate from raster_x
    pub fn calc_x_coord(&self, raster_x: usize) -> f64 {
        self.origin_x + self.pixel_width * raster_x as f64
    }
    pub fn right_x_coord(&self) -> f64 {
        self.calc_x_coord(self.num_cols)
    }
    ///calculates the top side
    /// Note pixel height is negative
    pub fn calc_y_coord(&self, raster_y: usize) -> f64 {
        self.origin_y + self.pixel_height * raster_y as f64
    }
    pub fn bottom_y_coord(&self) -> f64 {
        self.calc_y_coord(self.num_rows)
    }

    //Converts projected coordinate to raster_x
    pub fn calc_x(&self, x_coord: f64) -> i64 {
        ((x_coord - self.origin_x) / self.pixel_width).floor() as _
    }
    pub fn calc_y(&self, y_coord: f64) -> i64 {
        ((y_coord - self.origin_y) / self.pixel_height).floor() as _
    }

    /// Row and column holding the coordinate, None when outside the grid
    pub fn cell_of(&self, x_coord: f64, y_coord: f64) -> Option<(usize, usize)> {
        let col = self.calc_x(x_coord);
        let row = self.calc_y(y_coord);

        if col < 0 || row < 0 || col >= self.num_cols as i64 || row >= self.num_rows as i64 {
            return None;
        }

        Some((row as usize, col as usize))
    }

    /// Same grid, ignores the no data value
    pub fn assert_equals_except_no_data(&self, rhs: &Self) {

        assert_eq!(self.num_cols, rhs.num_cols);
        assert_eq!(self.num_rows, rhs.num_rows);
        assert_float_within_eps(self.origin_x, rhs.origin_x, LARGE_EPSILON, "Origin X");
        assert_float_within_eps(self.origin_y, rhs.origin_y, LARGE_EPSILON, "Origin Y");

        assert_float_within_eps(self.pixel_height, rhs.pixel_height, MEDIUM_EPSILON, "pixel height");
        assert_float_within_eps(self.pixel_width, rhs.pixel_width, MEDIUM_EPSILON, "pixel width");

    }
}
