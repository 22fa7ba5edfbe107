//! CSS grid template generation.
//!
//! Header and body grids must render the exact same template string for
//! the same inputs or the two containers visually de-sync under scroll, so
//! the formatting here is fully deterministic: tracks are emitted in
//! column order and pixel values use plain `Display` formatting (no locale,
//! no rounding drift).

use super::ComputedColumn;

/// Build the `grid-template-columns` value for a header or body grid.
///
/// Sticky columns get fixed pixel tracks (or `minmax(min, max)` when both
/// bounds are present) so the pinned region never flexes; scrollable
/// columns get `minmax(min, Nfr)` tracks so spare width distributes by
/// flex ratio.
pub fn generate_grid_template(sticky: &[ComputedColumn], scrollable: &[ComputedColumn]) -> String {
    let mut tracks = Vec::with_capacity(sticky.len() + scrollable.len());

    for col in sticky {
        let c = &col.config;
        match (c.min_width, c.max_width) {
            (Some(min), Some(max)) => tracks.push(format!("minmax({min}px, {max}px)")),
            _ => tracks.push(format!("{}px", c.width)),
        }
    }

    for col in scrollable {
        let c = &col.config;
        let min = c.min_width.unwrap_or(c.width);
        let ratio = c.flex_ratio.unwrap_or(1.0);
        tracks.push(format!("minmax({min}px, {ratio}fr)"));
    }

    tracks.join(" ")
}
