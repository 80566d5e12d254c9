//! Corner labeling, the corner formula, and the fixed box connectivity.

use crate::{rotation::BoxRotation, types::HalfExtents};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Which face of an axis a corner sits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Negative,
    Positive,
}

/// The eight corners of a search box.
///
/// `V1` is the all-negative corner. It anchors the three axis markers and is
/// never emitted as a labeled vertex of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexLabel {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
}

impl VertexLabel {
    pub const ALL: [Self; 8] = [
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
    ];

    /// Corners that are drawn as named vertices.
    pub const EMITTED: [Self; 7] = [
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
    ];

    /// The origin corner plus its three axis neighbours, enough to span the box.
    pub const SPANNING: [Self; 4] = [Self::V1, Self::V2, Self::V3, Self::V4];

    pub fn name(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::V4 => "v4",
            Self::V5 => "v5",
            Self::V6 => "v6",
            Self::V7 => "v7",
            Self::V8 => "v8",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Side taken on the local X, Y and Z axes.
    pub fn sides(self) -> [Side; 3] {
        use Side::{Negative as N, Positive as P};

        match self {
            Self::V1 => [N, N, N],
            Self::V2 => [P, N, N],
            Self::V3 => [N, P, N],
            Self::V4 => [N, N, P],
            Self::V5 => [P, P, N],
            Self::V6 => [P, N, P],
            Self::V7 => [N, P, P],
            Self::V8 => [P, P, P],
        }
    }

    /// Offset of this corner from the center before rotation.
    pub fn local_offset(self, extents: &HalfExtents) -> na::Vector3<f64> {
        let pick = |side: Side, negative: f64, positive: f64| match side {
            Side::Negative => -negative,
            Side::Positive => positive,
        };
        let [sx, sy, sz] = self.sides();

        na::Vector3::new(
            pick(sx, extents.neg_x, extents.pos_x),
            pick(sy, extents.neg_y, extents.pos_y),
            pick(sz, extents.neg_z, extents.pos_z),
        )
    }
}

/// World position of one corner.
pub fn corner(
    center: &na::Point3<f64>,
    extents: &HalfExtents,
    rotation: &BoxRotation,
    label: VertexLabel,
) -> na::Point3<f64> {
    center + rotation.rotate(&label.local_offset(extents))
}

/// Box edges between emitted vertices.
pub const EDGES: [(VertexLabel, VertexLabel); 9] = {
    use VertexLabel::*;
    [
        (V3, V7),
        (V2, V6),
        (V5, V8),
        (V2, V5),
        (V4, V6),
        (V4, V7),
        (V3, V5),
        (V6, V8),
        (V7, V8),
    ]
};

/// Local axis indicated by one of the three marker edges leaving `v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisMarker {
    X,
    Y,
    Z,
}

impl AxisMarker {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// The corner at the far end of the marker edge.
    pub fn target(self) -> VertexLabel {
        match self {
            Self::X => VertexLabel::V2,
            Self::Y => VertexLabel::V3,
            Self::Z => VertexLabel::V4,
        }
    }

    /// Names of the marker's two endpoint objects, origin first.
    pub fn endpoint_names(self) -> (&'static str, &'static str) {
        match self {
            Self::X => ("v1x", "v2x"),
            Self::Y => ("v1y", "v3y"),
            Self::Z => ("v1z", "v4z"),
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            Self::X => "red",
            Self::Y => "forest",
            Self::Z => "blue",
        }
    }
}

/// Edges from `v1` marking the local axes.
pub const AXIS_EDGES: [(VertexLabel, VertexLabel); 3] = [
    (VertexLabel::V1, VertexLabel::V2),
    (VertexLabel::V1, VertexLabel::V3),
    (VertexLabel::V1, VertexLabel::V4),
];

/// All eight corners computed from one parameter tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxVertices {
    points: [na::Point3<f64>; 8],
}

impl BoxVertices {
    pub fn compute(
        center: &na::Point3<f64>,
        extents: &HalfExtents,
        rotation: &BoxRotation,
    ) -> Self {
        Self {
            points: VertexLabel::ALL.map(|label| corner(center, extents, rotation, label)),
        }
    }

    pub fn get(&self, label: VertexLabel) -> na::Point3<f64> {
        self.points[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexLabel, na::Point3<f64>)> + '_ {
        VertexLabel::ALL.into_iter().zip(self.points.iter().copied())
    }

    pub fn points(&self) -> &[na::Point3<f64>; 8] {
        &self.points
    }

    /// Endpoint positions of the nine box edges.
    pub fn edge_segments(&self) -> impl Iterator<Item = (na::Point3<f64>, na::Point3<f64>)> + '_ {
        EDGES.iter().map(|&(a, b)| (self.get(a), self.get(b)))
    }
}
