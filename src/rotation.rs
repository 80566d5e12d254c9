use nalgebra as na;
use serde::{Deserialize, Serialize};

/// The two sequential rotations applied to a search box.
///
/// `angle1` turns the box about its horizontal (X) axis, `angle2` then turns
/// it about the resulting vertical (Y) axis. Both are radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxRotation {
    pub angle1: f64,
    pub angle2: f64,
}

impl BoxRotation {
    pub const IDENTITY: Self = Self::new(0.0, 0.0);

    pub const fn new(angle1: f64, angle2: f64) -> Self {
        Self { angle1, angle2 }
    }

    pub fn from_degrees(angle1: f64, angle2: f64) -> Self {
        Self::new(angle1.to_radians(), angle2.to_radians())
    }

    pub fn to_degrees(self) -> (f64, f64) {
        (self.angle1.to_degrees(), self.angle2.to_degrees())
    }

    /// Rotates a point given in box-local coordinates (relative to the center).
    ///
    /// Each output coordinate is spelled out instead of going through a
    /// matrix product so the sign convention of every term stays visible.
    pub fn rotate(&self, local: &na::Vector3<f64>) -> na::Vector3<f64> {
        let (s1, c1) = self.angle1.sin_cos();
        let (s2, c2) = self.angle2.sin_cos();
        let (x, y, z) = (local.x, local.y, local.z);

        na::Vector3::new(
            x * c2 - y * s1 * s2 + z * c1 * s2,
            y * c1 + z * s1,
            -x * s2 - y * s1 * c2 + z * c1 * c2,
        )
    }

    /// The same rotation as a matrix, `Ry(angle2) * Rx(-angle1)`.
    pub fn to_rotation(self) -> na::Rotation3<f64> {
        let (s1, c1) = self.angle1.sin_cos();
        let (s2, c2) = self.angle2.sin_cos();

        #[rustfmt::skip]
        let matrix = na::Matrix3::new(
            c2,  -s1 * s2, c1 * s2,
            0.0,  c1,      s1,
            -s2, -s1 * c2, c1 * c2,
        );
        na::Rotation3::from_matrix_unchecked(matrix)
    }

    /// Undoes [`BoxRotation::rotate`].
    pub fn unrotate(&self, world: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.to_rotation().inverse() * world
    }
}
