//! Scoring module - classic line-clear scoring and level progression
//!
//! - A line clear scores `LINE_SCORES[lines] * (level + 1)`.
//! - A hard drop adds two points per row fallen, in the same settle event.
//! - The level is one per ten lines, and gravity speeds up by 50ms per level down to 50ms.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
    MIN_DROP_MS,
};

/// Score for clearing `lines` rows at once while at `level`.
///
/// At most four rows can fill from one placement; anything outside `0..=4` scores nothing.
pub fn score_for_clear(lines: usize, level: u32) -> u32 {
    let Some(&base) = LINE_SCORES.get(lines) else {
        return 0;
    };
    base.saturating_mul(level.saturating_add(1))
}

/// Bonus for a hard drop that fell `rows` rows
pub fn hard_drop_bonus(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn level_for(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level (in milliseconds)
///
/// Decreases by 50ms per level and holds at 50ms from level 19 on.
pub fn drop_interval_for(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(MIN_DROP_MS)
}
