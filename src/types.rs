use crate::error::{Error, Result};
use itertools::{Itertools, MinMaxResult};
use nalgebra as na;
use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Largest value the host's extent fields accept.
pub const MAX_FIELD_EXTENT: f64 = 50.0;
/// Angle fields are exchanged in degrees within this symmetric range.
pub const MAX_FIELD_ANGLE: f64 = 180.0;

/// Axis-aligned (min corner, max corner) pair, as returned by a host extent query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingExtent {
    pub min: na::Point3<f64>,
    pub max: na::Point3<f64>,
}

impl BoundingExtent {
    pub fn new(min: na::Point3<f64>, max: na::Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest extent enclosing all finite `points`, or `None` when there are none.
    ///
    /// Points with a NaN or infinite coordinate are skipped.
    pub fn from_points(
        points: impl IntoIterator<Item = impl Borrow<na::Point3<f64>>>,
    ) -> Option<Self> {
        let points: Vec<na::Point3<f64>> = points
            .into_iter()
            .map(|p| *p.borrow())
            .filter(|p| p.coords.iter().all(|c| c.is_finite()))
            .collect();

        let axis = |index: usize| -> Option<(f64, f64)> {
            match points.iter().map(|p| r64(p[index])).minmax() {
                MinMaxResult::NoElements => None,
                MinMaxResult::OneElement(value) => Some((value.raw(), value.raw())),
                MinMaxResult::MinMax(min, max) => Some((min.raw(), max.raw())),
            }
        };

        let (min_x, max_x) = axis(0)?;
        let (min_y, max_y) = axis(1)?;
        let (min_z, max_z) = axis(2)?;

        Some(Self {
            min: na::Point3::new(min_x, min_y, min_z),
            max: na::Point3::new(max_x, max_y, max_z),
        })
    }

    pub fn midpoint(&self) -> na::Point3<f64> {
        na::center(&self.min, &self.max)
    }
}

/// Distances from the box center to each of its six faces, in the box's local frame.
///
/// The pairs need not be equal: after manual edits a box is usually not
/// centered within its own extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HalfExtents {
    /// `l1`, toward the -X face.
    pub neg_x: f64,
    /// `l2`, toward the +X face.
    pub pos_x: f64,
    /// `l3`, toward the -Y face.
    pub neg_y: f64,
    /// `l4`, toward the +Y face.
    pub pos_y: f64,
    /// `l5`, toward the -Z face.
    pub neg_z: f64,
    /// `l6`, toward the +Z face.
    pub pos_z: f64,
}

impl HalfExtents {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(neg_x: f64, pos_x: f64, neg_y: f64, pos_y: f64, neg_z: f64, pos_z: f64) -> Self {
        Self {
            neg_x,
            pos_x,
            neg_y,
            pos_y,
            neg_z,
            pos_z,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Values in `l1..l6` order.
    pub fn to_array(self) -> [f64; 6] {
        [
            self.neg_x, self.pos_x, self.neg_y, self.pos_y, self.neg_z, self.pos_z,
        ]
    }

    pub fn from_array([neg_x, pos_x, neg_y, pos_y, neg_z, pos_z]: [f64; 6]) -> Self {
        Self::new(neg_x, pos_x, neg_y, pos_y, neg_z, pos_z)
    }

    /// Every face pushed outward by `distance`.
    pub fn grown(self, distance: f64) -> Self {
        Self::from_array(self.to_array().map(|l| l + distance))
    }

    /// Rounds every extent to `decimals` places; `None` leaves them untouched.
    pub fn round_to(self, decimals: Option<u32>) -> Self {
        let Some(decimals) = decimals else {
            return self;
        };
        let scale = 10f64.powi(decimals as i32);
        Self::from_array(self.to_array().map(|l| (l * scale).round() / scale))
    }

    /// Edge lengths along the local X, Y and Z axes.
    pub fn sizes(&self) -> na::Vector3<f64> {
        na::Vector3::new(
            self.neg_x + self.pos_x,
            self.neg_y + self.pos_y,
            self.neg_z + self.pos_z,
        )
    }
}

/// The eight values a box editor shows: six extents and two angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayedFields {
    pub extents: HalfExtents,
    pub angle1_deg: f64,
    pub angle2_deg: f64,
}

impl DisplayedFields {
    pub fn new(extents: HalfExtents, angle1_deg: f64, angle2_deg: f64) -> Self {
        Self {
            extents,
            angle1_deg,
            angle2_deg,
        }
    }

    /// Checks the fields against the ranges the editor enforces.
    ///
    /// The geometry operations never call this; it is offered to the layer
    /// that reads raw user input.
    pub fn validate(&self) -> Result<()> {
        const EXTENT_NAMES: [&str; 6] = ["l1", "l2", "l3", "l4", "l5", "l6"];

        for (field, value) in EXTENT_NAMES.into_iter().zip(self.extents.to_array()) {
            check_range(field, value, 0.0, MAX_FIELD_EXTENT)?;
        }
        check_range("angle1", self.angle1_deg, -MAX_FIELD_ANGLE, MAX_FIELD_ANGLE)?;
        check_range("angle2", self.angle2_deg, -MAX_FIELD_ANGLE, MAX_FIELD_ANGLE)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::FieldOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
