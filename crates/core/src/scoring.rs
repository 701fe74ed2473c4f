//! Scoring module - cascade scoring, meter charge, and level pacing
//!
//! All functions are pure. The cascade resolver computes its per-cycle
//! numbers here and applies them to session state itself.
//!
//! Compatibility note:
//! These formulas match the original Candy Mon tuning. In particular the
//! meter charges before the cycle score is applied, so a fever that starts
//! mid-cascade already doubles the cycle that triggered it.

use tui_candymon_types::{
    Kind, CELL_SCORE, FEVER_MULTIPLIER, GOAL_GROWTH_DEN, GOAL_GROWTH_NUM, KIND_COUNT,
    METER_GAIN_CAP, METER_GAIN_PER_CELL, METER_GAIN_PER_COMBO,
};

/// Score for one cascade cycle
///
/// `cleared` counts the cells of matched groups; cells swept by line or bomb
/// blasts do not score. `combo` is 1 for the first cycle of a cascade.
pub fn cycle_score(cleared: u32, combo: u32, fever: bool) -> u32 {
    let mult = if fever { FEVER_MULTIPLIER } else { 1 };
    cleared * CELL_SCORE * combo * mult
}

/// Meter charge for one cascade cycle, capped per cycle
pub fn meter_gain(cleared: u32, combo: u32) -> u32 {
    (cleared * METER_GAIN_PER_CELL + (combo - 1) * METER_GAIN_PER_COMBO).min(METER_GAIN_CAP)
}

/// Next score goal after a level up (x1.7, floored)
pub fn next_goal(goal: u32) -> u32 {
    (goal as u64 * GOAL_GROWTH_NUM / GOAL_GROWTH_DEN) as u32
}

/// Number of piece kinds in play at a level
///
/// Starts at 5 kinds for level 1 and ramps by one per level up to the full
/// palette of 8.
pub fn active_kind_count(level: u32) -> Kind {
    (4 + level.min(64)).clamp(5, KIND_COUNT as u32) as Kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_score() {
        // First cycle, basic triple
        assert_eq!(cycle_score(3, 1, false), 30);
        // Combo multiplies linearly
        assert_eq!(cycle_score(3, 2, false), 60);
        assert_eq!(cycle_score(4, 3, false), 120);
        // Fever doubles the whole cycle
        assert_eq!(cycle_score(3, 1, true), 60);
        assert_eq!(cycle_score(5, 3, true), 300);
    }

    #[test]
    fn test_meter_gain() {
        assert_eq!(meter_gain(3, 1), 18);
        assert_eq!(meter_gain(5, 1), 30);
        assert_eq!(meter_gain(3, 2), 22);
        // Cap at 40 per cycle
        assert_eq!(meter_gain(10, 1), 40);
        assert_eq!(meter_gain(6, 2), 40);
        assert_eq!(meter_gain(7, 1), 40);
    }

    #[test]
    fn test_next_goal_chain() {
        assert_eq!(next_goal(500), 850);
        assert_eq!(next_goal(850), 1445);
        assert_eq!(next_goal(1445), 2456);
        assert_eq!(next_goal(2456), 4175);
    }

    #[test]
    fn test_active_kind_count_ramp() {
        assert_eq!(active_kind_count(0), 5);
        assert_eq!(active_kind_count(1), 5);
        assert_eq!(active_kind_count(2), 6);
        assert_eq!(active_kind_count(3), 7);
        assert_eq!(active_kind_count(4), 8);
        assert_eq!(active_kind_count(5), 8);
        assert_eq!(active_kind_count(100), 8);
    }
}
