//! Preview of the detector's grid: the structure's extent snapped to the grid
//! step and grown by the snapped probe radius.

use crate::{
    error::{Error, Result},
    expanded::EmissionSettings,
    rotation::BoxRotation,
    types::{BoundingExtent, HalfExtents},
    vertex::BoxVertices,
};
use tracing::debug;

fn round_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Extent the detector's grid covers for `extent` under `settings`.
///
/// Each lower bound drops to a multiple of the step and each upper bound
/// rises past the next one. Both then move out by the probe radius, itself
/// snapped down to the step.
pub fn grid_extent(extent: &BoundingExtent, settings: &EmissionSettings) -> Result<BoundingExtent> {
    settings.validate()?;

    let step = settings.spacing.step();
    let probe_step = round_places(step, 4);
    if probe_step <= 0.0 {
        return Err(Error::ZeroStepSize(step));
    }

    let probe = round_places(
        settings.probe_out - round_places(settings.probe_out, 4).rem_euclid(probe_step),
        1,
    );
    let min = extent
        .min
        .map(|c| round_places(c - c.rem_euclid(step), 1) - probe);
    let max = extent
        .max
        .map(|c| round_places(c - c.rem_euclid(step) + step, 1) + probe);

    debug!(step, probe, ?min, ?max, "grid extent snapped");
    Ok(BoundingExtent::new(min, max))
}

/// Unrotated corners of the grid preview for `extent`.
pub fn grid_preview(extent: &BoundingExtent, settings: &EmissionSettings) -> Result<BoxVertices> {
    let grid = grid_extent(extent, settings)?;
    let center = grid.midpoint();
    let to_min = center - grid.min;
    let to_max = grid.max - center;
    let extents = HalfExtents::new(to_min.x, to_max.x, to_min.y, to_max.y, to_min.z, to_max.z);

    Ok(BoxVertices::compute(&center, &extents, &BoxRotation::IDENTITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expanded::GridSpacing, vertex::VertexLabel};
    use approx::assert_relative_eq;
    use nalgebra as na;

    fn point(x: f64, y: f64, z: f64) -> na::Point3<f64> {
        na::Point3::new(x, y, z)
    }

    fn settings(spacing: GridSpacing, probe_out: f64) -> EmissionSettings {
        EmissionSettings { probe_out, spacing }
    }

    #[test]
    fn negative_coordinates_snap_down() {
        let extent = BoundingExtent::new(point(-3.7, -1.2, 0.3), point(2.2, 4.0, 1.0));
        let grid = grid_extent(&extent, &settings(GridSpacing::Medium, 0.0)).unwrap();

        assert_relative_eq!(grid.min, point(-4.0, -1.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(grid.max, point(2.5, 4.5, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn probe_snaps_down_to_step() {
        let origin = BoundingExtent::new(na::Point3::origin(), na::Point3::origin());

        let grid = grid_extent(&origin, &settings(GridSpacing::Low, 4.0)).unwrap();
        assert_relative_eq!(grid.min, point(-3.6, -3.6, -3.6), epsilon = 1e-12);
        assert_relative_eq!(grid.max, point(4.2, 4.2, 4.2), epsilon = 1e-12);

        let grid = grid_extent(&origin, &settings(GridSpacing::High, 4.1)).unwrap();
        assert_relative_eq!(grid.min, point(-4.0, -4.0, -4.0), epsilon = 1e-12);
        assert_relative_eq!(grid.max, point(4.25, 4.25, 4.25), epsilon = 1e-12);
    }

    #[test]
    fn zero_step_is_rejected() {
        let extent = BoundingExtent::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0));

        assert!(matches!(
            grid_preview(&extent, &settings(GridSpacing::StepSize(0.0), 4.0)),
            Err(Error::ZeroStepSize(_))
        ));
        assert!(matches!(
            grid_preview(&extent, &settings(GridSpacing::StepSize(0.00001), 4.0)),
            Err(Error::ZeroStepSize(_))
        ));
    }

    #[test]
    fn preview_spans_grid_extent_without_rotation() {
        let extent = BoundingExtent::new(point(-3.7, -1.2, 0.3), point(2.2, 4.0, 1.0));
        let settings = settings(GridSpacing::Medium, 1.0);
        let grid = grid_extent(&extent, &settings).unwrap();
        let vertices = grid_preview(&extent, &settings).unwrap();

        assert_relative_eq!(vertices.get(VertexLabel::V1), grid.min, epsilon = 1e-12);
        assert_relative_eq!(vertices.get(VertexLabel::V8), grid.max, epsilon = 1e-12);
        assert_relative_eq!(vertices.get(VertexLabel::V2), point(3.5, -2.5, -1.0), epsilon = 1e-12);
    }
}
