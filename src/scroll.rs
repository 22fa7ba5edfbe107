//! Pure scroll-sync decisions.
//!
//! The header and body are two independently-scrollable containers that
//! must report the same horizontal offset. The decision logic lives here
//! so it can be tested natively; the DOM wiring (event listeners, RAF
//! throttling, `ResizeObserver`) is in `viewer::scroll`.

/// Differences at or below this are treated as already-in-sync.
///
/// Browsers report fractional `scrollLeft` under zoom; mirroring those
/// sub-pixel echoes back and forth creates an infinite correction loop.
pub const SCROLL_SYNC_EPSILON: f64 = 0.5;

/// Tolerance for "at the edge" checks when deriving scroll flags.
pub const SCROLL_EDGE_TOLERANCE: f64 = 1.0;

/// Default step for arrow-button navigation, in pixels.
pub const SCROLL_STEP: f64 = 160.0;

/// Decide whether a scroll position should be mirrored to the other
/// container. Returns the position to write, or `None` when the two are
/// already within the sub-pixel threshold.
pub fn mirror_target(source_left: f64, target_left: f64) -> Option<f64> {
    if (source_left - target_left).abs() > SCROLL_SYNC_EPSILON {
        Some(source_left)
    } else {
        None
    }
}

/// Derived flags recomputed at most once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollFlags {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    /// True when the content overflows at all, regardless of position.
    pub show_scroll_indicator: bool,
}

impl ScrollFlags {
    /// Compute flags from a container's scroll metrics.
    pub fn compute(scroll_left: f64, client_width: f64, scroll_width: f64) -> Self {
        let max_scroll = (scroll_width - client_width).max(0.0);
        let overflows = max_scroll > SCROLL_EDGE_TOLERANCE;
        Self {
            can_scroll_left: overflows && scroll_left > SCROLL_EDGE_TOLERANCE,
            can_scroll_right: overflows && scroll_left < max_scroll - SCROLL_EDGE_TOLERANCE,
            show_scroll_indicator: overflows,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn mirror_skips_subpixel_difference() {
        assert_eq!(mirror_target(100.0, 100.4), None);
        assert_eq!(mirror_target(100.4, 100.0), None);
    }

    #[test]
    fn mirror_copies_real_difference() {
        assert_eq!(mirror_target(120.0, 100.0), Some(120.0));
        assert_eq!(mirror_target(0.0, 3.0), Some(0.0));
    }

    #[test]
    fn flags_at_left_edge() {
        let flags = ScrollFlags::compute(0.0, 400.0, 1000.0);
        assert!(!flags.can_scroll_left);
        assert!(flags.can_scroll_right);
        assert!(flags.show_scroll_indicator);
    }

    #[test]
    fn flags_at_right_edge() {
        let flags = ScrollFlags::compute(600.0, 400.0, 1000.0);
        assert!(flags.can_scroll_left);
        assert!(!flags.can_scroll_right);
    }

    #[test]
    fn flags_without_overflow() {
        let flags = ScrollFlags::compute(0.0, 1000.0, 1000.0);
        assert_eq!(flags, ScrollFlags::default());
    }

    #[test]
    fn edge_tolerance_absorbs_fractional_positions() {
        // 0.8px from the end still counts as "at the edge"
        let flags = ScrollFlags::compute(599.2, 400.0, 1000.0);
        assert!(!flags.can_scroll_right);
    }
}
