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
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::vector::{FieldValue, Geometry, OGRFieldType, OGRwkbGeometryType};
use log::debug;

use crate::errors::{geometry_err, Result, ZoneError};
use crate::zone::Zone;

/// Name and OGR type of an attribute column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: OGRFieldType::Type,
}

/// A (multi)polygon with its attributes, the zone is set once the builder has classified it
#[derive(Debug, Clone)]
pub struct ZoneFeature {
    pub geometry: Geometry,
    pub attributes: Vec<(String, Option<FieldValue>)>,
    pub zone: Option<Zone>,
}

/// Ordered features sharing one CRS and one attribute schema
#[derive(Debug, Clone)]
pub struct ZoneLayer {
    pub srs: SpatialRef,
    pub fields: Vec<FieldSchema>,
    pub features: Vec<ZoneFeature>,
}

/// Bounding box as (xmin, xmax, ymin, ymax), same order as OGR layer extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    fn merge(&self, rhs: &Extent) -> Extent {
        Extent {
            xmin: self.xmin.min(rhs.xmin),
            xmax: self.xmax.max(rhs.xmax),
            ymin: self.ymin.min(rhs.ymin),
            ymax: self.ymax.max(rhs.ymax),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X: {} to {} Y: {} to {}", self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

impl ZoneFeature {
    pub fn new(geometry: Geometry, attributes: Vec<(String, Option<FieldValue>)>) -> Self {
        ZoneFeature {
            geometry,
            attributes,
            zone: None,
        }
    }

    /// Same attributes, new geometry and zone
    pub fn derive(&self, geometry: Geometry, zone: Zone) -> Self {
        ZoneFeature {
            geometry,
            attributes: self.attributes.clone(),
            zone: Some(zone),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

impl ZoneLayer {
    pub fn new(srs: SpatialRef, fields: Vec<FieldSchema>) -> Self {
        ZoneLayer {
            srs,
            fields,
            features: Vec::new(),
        }
    }

    /// Same CRS and schema, no features
    pub fn empty_like(&self) -> Self {
        ZoneLayer::new(self.srs.clone(), self.fields.clone())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features_in_zone(&self, zone: Zone) -> impl Iterator<Item = &ZoneFeature> {
        self.features.iter().filter(move |f| f.zone == Some(zone))
    }

    pub fn count_in_zone(&self, zone: Zone) -> usize {
        self.features_in_zone(zone).count()
    }

    /// Envelope of every non empty geometry, None if there are none
    pub fn extent(&self) -> Option<Extent> {
        self.features
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| {
                let env = f.geometry.envelope();
                Extent {
                    xmin: env.MinX,
                    xmax: env.MaxX,
                    ymin: env.MinY,
                    ymax: env.MaxY,
                }
            })
            .fold(None, |acc: Option<Extent>, e| match acc {
                Some(a) => Some(a.merge(&e)),
                None => Some(e),
            })
    }

    /// Copy of the layer with every geometry transformed to `target`
    pub fn reproject(&self, target: &SpatialRef) -> Result<ZoneLayer> {
        if self.srs == *target {
            debug!("Layer already in target CRS, skipping transform");
            let mut copy = self.clone();
            copy.srs = target.clone();
            return Ok(copy);
        }

        let transform = CoordTransform::new(&self.srs, target)
            .map_err(|e| geometry_err("Creating coordinate transform", e))?;

        let mut features = Vec::with_capacity(self.features.len());

        for feature in self.features.iter() {
            let geometry = if feature.is_empty() {
                feature.geometry.clone()
            } else {
                feature.geometry.transform(&transform)
                    .map_err(|e| geometry_err("Reprojecting geometry", e))?
            };

            features.push(ZoneFeature {
                geometry,
                attributes: feature.attributes.clone(),
                zone: feature.zone,
            });
        }

        Ok(ZoneLayer {
            srs: target.clone(),
            fields: self.fields.clone(),
            features,
        })
    }
}

/// Union of all the geometries, an empty multipolygon if there are none.
///
/// Geometries are unioned one at a time, so the cost grows quadratically with the count.  Meant
/// for hazard outlook layers of at most a few hundred polygons.
pub fn union_all<'a, I>(geometries: I) -> Result<Geometry>
where
    I: IntoIterator<Item = &'a Geometry>,
{
    let mut acc = Geometry::empty(OGRwkbGeometryType::wkbMultiPolygon)
        .map_err(|e| geometry_err("Creating empty union", e))?;

    for geom in geometries.into_iter().filter(|g| !g.is_empty()) {
        acc = acc.union(geom)
            .ok_or_else(|| ZoneError::Geometry("Union returned no geometry".to_string()))?;
    }

    Ok(acc)
}
