//! Scoring module - placement points and combo-scaled line bonuses
//!
//! A placement earns `BLOCK_POINTS` per block. Clearing lines adds
//! `cleared * LINE_POINTS * (1 + combo * 1/2)` where `combo` is the combo count
//! *after* this placement. The sum is rounded once, as a whole, half up.

use crate::types::{BLOCK_POINTS, COMBO_DENOMINATOR, COMBO_NUMERATOR, LINE_POINTS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the blocks placed.
    pub base: u32,
    /// Line bonus, i.e. `total - base`.
    pub line_bonus: u32,
    pub total: u32,
}

/// Points for placing a piece of `block_count` blocks
pub fn calculate_base_score(block_count: u32) -> u32 {
    block_count.saturating_mul(BLOCK_POINTS)
}

/// Combo count after a placement that cleared `cleared` lines
pub fn next_combo(combo: u32, cleared: u32) -> u32 {
    if cleared > 0 {
        combo.saturating_add(1)
    } else {
        0
    }
}

/// Calculate the points added by one placement.
///
/// Works in units of `1 / COMBO_DENOMINATOR` so the total is rounded exactly
/// once, matching `round(base + cleared * LINE_POINTS * (1 + combo * 0.5))`.
pub fn calculate_score(block_count: u32, cleared: u32, combo_after: u32) -> ScoreResult {
    let base = calculate_base_score(block_count);
    if cleared == 0 {
        return ScoreResult {
            base,
            line_bonus: 0,
            total: base,
        };
    }

    let multiplier = COMBO_DENOMINATOR.saturating_add(combo_after.saturating_mul(COMBO_NUMERATOR));
    let scaled = base
        .saturating_mul(COMBO_DENOMINATOR)
        .saturating_add(cleared.saturating_mul(LINE_POINTS).saturating_mul(multiplier));
    let total = scaled.saturating_add(COMBO_DENOMINATOR / 2) / COMBO_DENOMINATOR;

    ScoreResult {
        base,
        line_bonus: total - base,
        total,
    }
}
