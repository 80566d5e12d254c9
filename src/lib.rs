//! Geometry of the oriented search box used to bound a cavity search.
//!
//! A [`SearchBox`] is a center, six independent distances to its faces and
//! two rotation angles. From those it derives the eight labeled corners
//! drawn in the viewer and the probe-grown corners written into the
//! detector's parameter file.
//!
//! ```
//! use nalgebra as na;
//! use search_box3d::{BoundingExtent, SearchBox, VertexLabel};
//!
//! let extent = BoundingExtent::new(na::Point3::new(-5.0, -5.0, -5.0), na::Point3::new(5.0, 5.0, 5.0));
//! let search_box = SearchBox::from_extent(&extent, 2.0);
//!
//! assert_eq!(search_box.vertices().get(VertexLabel::V2), na::Point3::new(7.0, -7.0, -7.0));
//! ```

mod config;
mod error;
mod expanded;
mod grid;
mod host;
mod rotation;
mod search_box;
mod types;
mod vertex;

pub use crate::{
    config::{SearchBoxConfig, MAX_PADDING},
    error::{Error, Result},
    expanded::{emit_box_settings, EmissionSettings, ExpandedCorners, GridSpacing},
    grid::{grid_extent, grid_preview},
    host::{
        draw_box, draw_grid, erase_box, Color, ExtentSource, MarkerColors, Representation,
        GRID_OBJECT,
    },
    rotation::BoxRotation,
    search_box::{Reconciliation, SearchBox},
    types::{BoundingExtent, DisplayedFields, HalfExtents, MAX_FIELD_ANGLE, MAX_FIELD_EXTENT},
    vertex::{corner, AxisMarker, BoxVertices, Side, VertexLabel, AXIS_EDGES, EDGES},
};
