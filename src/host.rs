//! Capabilities borrowed from the visualization host.
//!
//! The geometry never talks to the host directly. Callers pass an
//! [`ExtentSource`] to obtain bounding extents and a [`Representation`] to
//! draw the box as named pseudo-vertices joined by bonds.

use crate::{
    types::BoundingExtent,
    vertex::{AxisMarker, BoxVertices, VertexLabel, EDGES},
};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Answers bounding-extent queries over the loaded structure.
pub trait ExtentSource {
    /// Extent of the named selection, if that selection currently exists.
    fn selection_extent(&self, selection: &str) -> Option<BoundingExtent>;

    /// Extent of everything loaded.
    fn whole_extent(&self) -> BoundingExtent;

    /// Extent a full reset should start from: the selection when present,
    /// otherwise everything.
    fn extent_for_reset(&self, selection: &str) -> BoundingExtent {
        self.selection_extent(selection)
            .unwrap_or_else(|| self.whole_extent())
    }

    /// Extent a redraw may follow. Absent when nothing is selected.
    fn extent_for_redraw(&self, selection: &str) -> Option<BoundingExtent> {
        self.selection_extent(selection)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgb([f32; 3]),
    Named(String),
}

impl Color {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Object the grid preview is drawn into.
pub const GRID_OBJECT: &str = "grid";

/// Coloring of the three axis-marker pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkerColors {
    /// Red, forest and blue for X, Y and Z.
    #[default]
    Axes,
    /// Every marker in one color.
    Uniform(Color),
}

impl MarkerColors {
    fn color_for(&self, marker: AxisMarker) -> Color {
        match self {
            Self::Axes => Color::named(marker.color_name()),
            Self::Uniform(color) => color.clone(),
        }
    }
}

/// Named-object drawing primitives of the host.
pub trait Representation {
    /// `(vertex name, color)` of every vertex in `object`; empty when it does not exist.
    fn vertex_colors(&self, object: &str) -> Vec<(String, Color)>;

    fn delete(&mut self, object: &str);

    fn add_vertex(&mut self, object: &str, name: &str, position: na::Point3<f64>, color: Color);

    fn bond(&mut self, object: &str, from: &str, to: &str);
}

/// Replaces `object` with a fresh drawing of `vertices`.
///
/// Colors of `v2..v8` found on the previous drawing survive; new vertices get
/// `neutral`. Axis markers are colored by `markers`.
pub fn draw_box<R>(
    host: &mut R,
    object: &str,
    vertices: &BoxVertices,
    neutral: &Color,
    markers: &MarkerColors,
) where
    R: Representation + ?Sized,
{
    let preserved: HashMap<String, Color> = host.vertex_colors(object).into_iter().collect();
    host.delete(object);

    for label in VertexLabel::EMITTED {
        let color = preserved
            .get(label.name())
            .cloned()
            .unwrap_or_else(|| neutral.clone());
        host.add_vertex(object, label.name(), vertices.get(label), color);
    }

    for (from, to) in EDGES {
        host.bond(object, from.name(), to.name());
    }

    for marker in AxisMarker::ALL {
        let (origin_name, target_name) = marker.endpoint_names();
        let color = markers.color_for(marker);

        host.add_vertex(object, origin_name, vertices.get(VertexLabel::V1), color.clone());
        host.add_vertex(object, target_name, vertices.get(marker.target()), color);
        host.bond(object, origin_name, target_name);
        trace!(?marker, "axis marker drawn");
    }

    debug!(object, preserved = preserved.len(), "search box drawn");
}

/// Draws the grid preview in [`GRID_OBJECT`], every vertex and marker white.
///
/// Earlier colors are not kept.
pub fn draw_grid<R>(host: &mut R, vertices: &BoxVertices)
where
    R: Representation + ?Sized,
{
    let white = Color::named("white");
    host.delete(GRID_OBJECT);
    draw_box(host, GRID_OBJECT, vertices, &white, &MarkerColors::Uniform(white.clone()));
}

pub fn erase_box<R>(host: &mut R, object: &str)
where
    R: Representation + ?Sized,
{
    host.delete(object);
    debug!(object, "search box erased");
}
