//! Scoring module - line clear and soft drop points
//!
//! Line clears use the classic table (40/100/300/1200) multiplied by
//! `level + 1`. Soft drop awards one point per cell, independent of level.
//! There are no combo, back-to-back or T-spin bonuses.

use crate::types::{LINE_SCORES, SOFT_DROP_POINTS_PER_CELL};

/// Points for clearing `lines` rows at `level`
///
/// Returns 0 for any line count outside 1-4; a negative level counts as 0.
pub fn calculate_line_clear_score(lines: i32, level: i32) -> u32 {
    if !(1..=4).contains(&lines) {
        return 0;
    }
    let multiplier = level.max(0).unsigned_abs() + 1;
    LINE_SCORES[lines as usize].saturating_mul(multiplier)
}

/// Points for descending `cells` rows with soft drop
pub fn calculate_soft_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(SOFT_DROP_POINTS_PER_CELL)
}

/// Running score for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    pub total_score: u32,
    pub lines_cleared: u32,
    pub tetrises: u32,
    pub soft_drop_cells: u32,
    pub soft_drop_score: u32,
    pub high_score: u32,
}

impl Score {
    /// Fresh score carrying a previously recorded high score
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// Score after a lock that cleared `lines` rows at `level`
    ///
    /// Line counts outside 1-4 leave the score unchanged.
    pub fn add_line_clear_score(&self, lines: u32, level: u32) -> Self {
        if !(1..=4).contains(&lines) {
            return *self;
        }
        let points = calculate_line_clear_score(lines as i32, level.min(i32::MAX as u32) as i32);
        let total_score = self.total_score.saturating_add(points);
        Self {
            total_score,
            lines_cleared: self.lines_cleared.saturating_add(lines),
            tetrises: self.tetrises.saturating_add(u32::from(lines == 4)),
            high_score: self.high_score.max(total_score),
            ..*self
        }
    }

    /// Score after descending `cells` rows with soft drop
    pub fn add_soft_drop_score(&self, cells: u32) -> Self {
        let points = calculate_soft_drop_score(cells);
        let total_score = self.total_score.saturating_add(points);
        Self {
            total_score,
            soft_drop_cells: self.soft_drop_cells.saturating_add(cells),
            soft_drop_score: self.soft_drop_score.saturating_add(points),
            high_score: self.high_score.max(total_score),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_clear_score(1, 0), 40);
        assert_eq!(calculate_line_clear_score(2, 0), 100);
        assert_eq!(calculate_line_clear_score(3, 0), 300);
        assert_eq!(calculate_line_clear_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_clear_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_clear_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_scores_scale_with_level() {
        for level in [0, 1, 9, 18, 29, 99] {
            for lines in 1..=4 {
                assert_eq!(
                    calculate_line_clear_score(lines, level),
                    calculate_line_clear_score(lines, 0) * (level as u32 + 1)
                );
            }
        }
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(calculate_line_clear_score(0, 3), 0);
        assert_eq!(calculate_line_clear_score(5, 3), 0);
        assert_eq!(calculate_line_clear_score(-1, 3), 0);
        assert_eq!(calculate_line_clear_score(2, -7), 100);
    }

    #[test]
    fn test_soft_drop_is_level_independent() {
        assert_eq!(calculate_soft_drop_score(10), 10);
        let s = Score::default().add_soft_drop_score(3).add_soft_drop_score(2);
        assert_eq!(s.total_score, 5);
        assert_eq!(s.soft_drop_cells, 5);
        assert_eq!(s.soft_drop_score, 5);
    }

    #[test]
    fn test_add_line_clear_tracks_counters() {
        let s = Score::default()
            .add_line_clear_score(4, 0)
            .add_line_clear_score(1, 2);
        assert_eq!(s.total_score, 1200 + 120);
        assert_eq!(s.lines_cleared, 5);
        assert_eq!(s.tetrises, 1);
        assert_eq!(s.high_score, 1320);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let s = Score::with_high_score(50).add_soft_drop_score(7);
        assert_eq!(s.add_line_clear_score(0, 4), s);
        assert_eq!(s.add_line_clear_score(9, 4), s);
    }

    #[test]
    fn test_injected_high_score_is_compared() {
        let s = Score::with_high_score(1000).add_line_clear_score(2, 0);
        assert_eq!(s.high_score, 1000);
        let s = s.add_line_clear_score(4, 0);
        assert_eq!(s.total_score, 1300);
        assert_eq!(s.high_score, 1300);
    }

    #[test]
    fn test_counters_saturate() {
        let s = Score {
            total_score: u32::MAX - 10,
            lines_cleared: u32::MAX - 1,
            tetrises: u32::MAX,
            ..Score::default()
        }
        .add_line_clear_score(4, 98);
        assert_eq!(s.total_score, u32::MAX);
        assert_eq!(s.lines_cleared, u32::MAX);
        assert_eq!(s.tetrises, u32::MAX);
        assert_eq!(s.high_score, u32::MAX);
    }
}
