//! Corners handed to the cavity search: the visible box and the probe-grown internal box.

use crate::{
    error::{Error, Result},
    rotation::BoxRotation,
    search_box::SearchBox,
    types::HalfExtents,
    vertex::{corner, VertexLabel},
};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Four spanning corners (`v1..v4`) of two boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpandedCorners {
    /// `bP1..bP4`: unrotated, unpadded by the probe.
    pub visible: [na::Point3<f64>; 4],
    /// `P1..P4`: every face pushed out by the probe radius, at the box's angles.
    pub internal: [na::Point3<f64>; 4],
}

impl ExpandedCorners {
    pub fn compute(
        center: &na::Point3<f64>,
        extents: &HalfExtents,
        rotation: &BoxRotation,
        probe_radius: f64,
    ) -> Self {
        let grown = extents.grown(probe_radius);

        Self {
            visible: VertexLabel::SPANNING
                .map(|label| corner(center, extents, &BoxRotation::IDENTITY, label)),
            internal: VertexLabel::SPANNING.map(|label| corner(center, &grown, rotation, label)),
        }
    }

    /// The `[SETTINGS.visiblebox]` and `[SETTINGS.internalbox]` tables, two decimals per coordinate.
    pub fn to_settings_fragment(&self) -> String {
        let mut out = String::new();

        let mut section = |name: &str, comment: &str, points: &[na::Point3<f64>; 4]| {
            out.push_str(&format!("\n\t[SETTINGS.{name}]\n\t# {comment}\n"));
            for (index, point) in points.iter().enumerate() {
                out.push_str(&format!(
                    "\n\t[SETTINGS.{name}.p{}]\n\tx = {:.2}\n\ty = {:.2}\n\tz = {:.2}\n",
                    index + 1,
                    point.x,
                    point.y,
                    point.z
                ));
            }
        };

        section(
            "visiblebox",
            "Coordinates of the vertices that define the visible 3D grid. Only four points are required to define the search space.",
            &self.visible,
        );
        section(
            "internalbox",
            "Coordinates of the internal 3D grid. Used for calculations.",
            &self.internal,
        );
        out
    }
}

/// How the cavity search spaces its grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSpacing {
    /// Preset voxel volume chosen by the detector.
    #[default]
    Low,
    Medium,
    High,
    /// Explicit step size in angstroms.
    StepSize(f64),
}

impl GridSpacing {
    /// Grid step in angstroms. Presets map to the detector's fixed steps.
    pub fn step(&self) -> f64 {
        match *self {
            Self::Low => 0.6,
            Self::Medium => 0.5,
            Self::High => 0.25,
            Self::StepSize(step) => step,
        }
    }
}

/// Inputs to settings emission that bear on the search box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionSettings {
    pub probe_out: f64,
    pub spacing: GridSpacing,
}

impl EmissionSettings {
    pub fn validate(&self) -> Result<()> {
        if let GridSpacing::StepSize(step) = self.spacing {
            if step.is_nan() || step <= 0.0 {
                return Err(Error::ZeroStepSize(step));
            }
        }
        if self.probe_out.is_nan() || self.probe_out < 0.0 {
            return Err(Error::NegativeProbe(self.probe_out));
        }
        Ok(())
    }
}

/// Validates `settings` and renders the box tables for the detector's parameter file.
///
/// Without a box the search covers the whole structure and every corner
/// input is zero.
pub fn emit_box_settings(search_box: Option<&SearchBox>, settings: &EmissionSettings) -> Result<String> {
    settings.validate()?;

    let corners = match search_box {
        Some(search_box) => search_box.expanded_corners(settings.probe_out),
        None => SearchBox::new().expanded_corners(settings.probe_out),
    };

    debug!(
        box_mode = search_box.is_some(),
        probe_out = settings.probe_out,
        "emitting search box settings"
    );
    Ok(corners.to_settings_fragment())
}
