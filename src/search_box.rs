use crate::{
    config::SearchBoxConfig,
    expanded::ExpandedCorners,
    rotation::BoxRotation,
    types::{BoundingExtent, DisplayedFields, HalfExtents},
    vertex::BoxVertices,
};
use approx::abs_diff_eq;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Tolerance under which a displayed field counts as unchanged.
const FIELD_EPSILON: f64 = 1e-9;

/// Which source a [`SearchBox::redraw`] followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Displayed fields differed from the stored ones and were adopted verbatim.
    DirectEdit,
    /// Center and extents were recomputed from a bounding extent.
    Remeasured,
    /// No extent was available; the stored box was re-padded in place.
    Repadded,
    /// Nothing changed.
    Unchanged,
}

/// A rotatable search box with independent distances to each of its six faces.
///
/// The box only stores its parameters. Vertices are always derived from the
/// current parameters on request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchBox {
    center: na::Point3<f64>,
    extents: HalfExtents,
    rotation: BoxRotation,
    padding: f64,
    /// Extent applied by the latest reset or remeasure.
    source: Option<BoundingExtent>,
    /// Decimal places kept when deriving extents from a bounding extent.
    extent_precision: Option<u32>,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    /// An empty box: zero center, extents, angles and padding.
    pub fn new() -> Self {
        Self {
            center: na::Point3::origin(),
            extents: HalfExtents::ZERO,
            rotation: BoxRotation::IDENTITY,
            padding: 0.0,
            source: None,
            extent_precision: None,
        }
    }

    pub fn with_config(config: &SearchBoxConfig) -> Self {
        Self::new().with_extent_precision(config.extent_precision)
    }

    /// Round extent-derived half-extents to `decimals` places.
    pub fn with_extent_precision(mut self, decimals: Option<u32>) -> Self {
        self.extent_precision = decimals;
        self
    }

    /// A box initialized from `extent` grown by `padding` on every face.
    pub fn from_extent(extent: &BoundingExtent, padding: f64) -> Self {
        let mut this = Self::new();
        this.reset(extent, padding);
        this
    }

    pub fn center(&self) -> na::Point3<f64> {
        self.center
    }

    pub fn half_extents(&self) -> HalfExtents {
        self.extents
    }

    pub fn rotation(&self) -> BoxRotation {
        self.rotation
    }

    /// `(angle1, angle2)` in degrees.
    pub fn angles_deg(&self) -> (f64, f64) {
        self.rotation.to_degrees()
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn source(&self) -> Option<&BoundingExtent> {
        self.source.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.extents == HalfExtents::ZERO
    }

    /// What an editor bound to this box should display.
    pub fn displayed_fields(&self) -> DisplayedFields {
        let (angle1_deg, angle2_deg) = self.angles_deg();
        DisplayedFields::new(self.extents, angle1_deg, angle2_deg)
    }

    /// Reinitialize from a freshly queried extent. Angles go back to zero.
    pub fn reset(&mut self, extent: &BoundingExtent, padding: f64) {
        self.center = extent.midpoint();
        self.extents = self.padded_extents(extent, &self.center, padding);
        self.rotation = BoxRotation::IDENTITY;
        self.padding = padding;
        self.source = Some(*extent);

        debug!(
            center = ?self.center,
            extents = ?self.extents,
            padding,
            "search box reset"
        );
    }

    /// Zero every parameter. Padding and rounding settings are kept.
    pub fn clear(&mut self) {
        self.center = na::Point3::origin();
        self.extents = HalfExtents::ZERO;
        self.rotation = BoxRotation::IDENTITY;
        self.source = None;

        debug!("search box cleared");
    }

    /// Merge user edits and a possibly fresh extent into the box.
    ///
    /// Edits to any of the eight displayed fields win over the extent. Without
    /// edits, a changed padding or extent re-derives center and extents while
    /// keeping the angles.
    pub fn redraw(
        &mut self,
        displayed: &DisplayedFields,
        extent: Option<&BoundingExtent>,
        padding: f64,
    ) -> Reconciliation {
        let outcome = if self.is_edited(displayed) {
            self.extents = displayed.extents;
            self.rotation = BoxRotation::from_degrees(displayed.angle1_deg, displayed.angle2_deg);
            Reconciliation::DirectEdit
        } else if let Some(extent) = extent {
            if differs(self.padding, padding) || self.source.as_ref() != Some(extent) {
                self.remeasure(displayed, extent, padding);
                Reconciliation::Remeasured
            } else {
                Reconciliation::Unchanged
            }
        } else if differs(self.padding, padding) {
            self.repad(displayed, padding);
            Reconciliation::Repadded
        } else {
            Reconciliation::Unchanged
        };

        debug!(
            ?outcome,
            center = ?self.center,
            extents = ?self.extents,
            padding = self.padding,
            "search box redrawn"
        );
        outcome
    }

    pub fn vertices(&self) -> BoxVertices {
        BoxVertices::compute(&self.center, &self.extents, &self.rotation)
    }

    /// Corners reported to the cavity search, with the internal box grown by `probe_radius`.
    pub fn expanded_corners(&self, probe_radius: f64) -> ExpandedCorners {
        ExpandedCorners::compute(&self.center, &self.extents, &self.rotation, probe_radius)
    }

    pub fn volume(&self) -> f64 {
        self.extents.sizes().product()
    }

    fn is_edited(&self, displayed: &DisplayedFields) -> bool {
        let (angle1_deg, angle2_deg) = self.angles_deg();
        let stored = self.extents.to_array();
        let shown = displayed.extents.to_array();

        stored.iter().zip(&shown).any(|(&a, &b)| differs(a, b))
            || differs(angle1_deg, displayed.angle1_deg)
            || differs(angle2_deg, displayed.angle2_deg)
    }

    fn remeasure(&mut self, displayed: &DisplayedFields, extent: &BoundingExtent, padding: f64) {
        let center = extent.midpoint();
        let fresh = self.padded_extents(extent, &center, padding).to_array();
        let stored = self.extents.to_array();
        let shown = displayed.extents.to_array();

        // Keep whatever residual the editor carried on top of the stored values.
        let merged: [f64; 6] = std::array::from_fn(|i| fresh[i] + (shown[i] - stored[i]));

        trace!(?center, ?fresh, ?merged, "remeasured from bounding extent");

        self.center = center;
        self.extents = HalfExtents::from_array(merged);
        self.padding = padding;
        self.source = Some(*extent);
    }

    fn repad(&mut self, displayed: &DisplayedFields, padding: f64) {
        let old = self.padding;
        let l = displayed.extents;

        // Bounds with the old padding stripped, taken relative to the box rather
        // than to world space.
        let unpadded = BoundingExtent::new(
            na::Point3::new(old - l.neg_x, old - l.neg_y, old - l.neg_z),
            na::Point3::new(l.pos_x - old, l.pos_y - old, l.pos_z - old),
        );
        let center = unpadded.midpoint();

        trace!(?unpadded, ?center, old, padding, "re-padding without extent");

        self.center = center;
        self.extents = self.padded_extents(&unpadded, &center, padding);
        self.padding = padding;
        self.source = None;
    }

    fn padded_extents(
        &self,
        extent: &BoundingExtent,
        center: &na::Point3<f64>,
        padding: f64,
    ) -> HalfExtents {
        let negative = center - (extent.min - na::Vector3::repeat(padding));
        let positive = (extent.max + na::Vector3::repeat(padding)) - center;

        HalfExtents::new(negative.x, positive.x, negative.y, positive.y, negative.z, positive.z)
            .round_to(self.extent_precision)
    }
}

fn differs(a: f64, b: f64) -> bool {
    !abs_diff_eq!(a, b, epsilon = FIELD_EPSILON)
}
