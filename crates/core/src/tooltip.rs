//! Tooltip Positioner for inline help anchors.
//!
//! # Invariants
//!
//! 1. An anchor whose top edge is closer to the viewport top than the flip threshold shows its
//!    popover below; otherwise above.
//! 2. An anchor that cannot be measured shows its popover above.
//! 3. Pointer leave hides the popover immediately, whatever the placement.
//! 4. The popover never receives pointer events, so leaving the anchor always hides it.
//!
//! Each anchor owns one [`Tooltip`]; instances share no state.

use crate::constants::TOOLTIP_FLIP_THRESHOLD_PX;
use serde::{Deserialize, Serialize};

/// Vertical side of the anchor the popover renders on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Above,
    Below,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

/// Chooses a placement from the anchor's distance to the viewport top.
///
/// `anchor_top` is `None` when the anchor is not mounted.
pub fn choose_placement(anchor_top: Option<f64>, threshold_px: f64) -> Placement {
    match anchor_top {
        Some(top) if top < threshold_px => Placement::Below,
        Some(_) => Placement::Above,
        None => Placement::Above,
    }
}

/// One anchor/popover pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    id: String,
    label: String,
    detail: String,
    threshold_px: f64,
    visible: bool,
    placement: Placement,
}

impl Tooltip {
    /// Creates a hidden tooltip using the fixed flip threshold.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: detail.into(),
            threshold_px: TOOLTIP_FLIP_THRESHOLD_PX,
            visible: false,
            placement: Placement::Above,
        }
    }

    /// Overrides the flip threshold.
    #[must_use]
    pub fn threshold(mut self, threshold_px: f64) -> Self {
        self.threshold_px = threshold_px;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The anchor text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The popover text.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Pointer entered the anchor whose top edge is `anchor_top` pixels below the viewport top.
    pub fn pointer_enter(&mut self, anchor_top: Option<f64>) {
        self.placement = choose_placement(anchor_top, self.threshold_px);
        self.visible = true;
        tracing::debug!(
            "tooltip '{}' shown {} (anchor_top={:?})",
            self.id,
            self.placement.as_str(),
            anchor_top
        );
    }

    /// Pointer left the anchor.
    pub fn pointer_leave(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip() -> Tooltip {
        Tooltip::new("adime", "ADIME", "Assessment, Diagnosis, Intervention, Monitoring, Evaluation")
    }

    #[test]
    fn starts_hidden_above() {
        let t = tip();
        assert!(!t.is_visible());
        assert_eq!(t.placement(), Placement::Above);
    }

    #[test]
    fn near_top_flips_below() {
        let mut t = tip();
        t.pointer_enter(Some(12.0));
        assert!(t.is_visible());
        assert_eq!(t.placement(), Placement::Below);
    }

    #[test]
    fn threshold_boundary_is_above() {
        assert_eq!(
            choose_placement(Some(TOOLTIP_FLIP_THRESHOLD_PX), TOOLTIP_FLIP_THRESHOLD_PX),
            Placement::Above
        );
        assert_eq!(
            choose_placement(
                Some(TOOLTIP_FLIP_THRESHOLD_PX - 0.5),
                TOOLTIP_FLIP_THRESHOLD_PX
            ),
            Placement::Below
        );
        assert_eq!(choose_placement(Some(900.0), 160.0), Placement::Above);
    }

    #[test]
    fn negative_offset_scrolled_past_top_is_below() {
        assert_eq!(choose_placement(Some(-40.0), 160.0), Placement::Below);
    }

    #[test]
    fn unmeasured_anchor_defaults_above() {
        let mut t = tip();
        t.pointer_enter(Some(5.0));
        t.pointer_leave();
        t.pointer_enter(None);
        assert_eq!(t.placement(), Placement::Above);
        assert!(t.is_visible());
    }

    #[test]
    fn leave_hides_regardless_of_placement() {
        for top in [Some(0.0), Some(500.0), None] {
            let mut t = tip();
            t.pointer_enter(top);
            t.pointer_leave();
            assert!(!t.is_visible());
        }
    }

    #[test]
    fn custom_threshold() {
        let mut t = tip().threshold(40.0);
        t.pointer_enter(Some(100.0));
        assert_eq!(t.placement(), Placement::Above);
        t.pointer_enter(Some(39.0));
        assert_eq!(t.placement(), Placement::Below);
    }

    #[test]
    fn instances_are_independent() {
        let mut a = tip();
        let mut b = Tooltip::new("must", "MUST", "Malnutrition Universal Screening Tool");
        a.pointer_enter(Some(10.0));
        b.pointer_enter(Some(400.0));
        a.pointer_leave();
        assert!(!a.is_visible());
        assert!(b.is_visible());
        assert_eq!(b.placement(), Placement::Above);
    }
}
