//! Progression module - score, lines, level and gravity speed
//!
//! Scoring is the classic per-clear table scaled by the current level. Level
//! goals grow by `10 * new_level` lines after each level-up.

use crate::types::{DROP_INTERVALS, LINE_SCORES, MAX_LEVEL, MIN_LEVEL};

/// Read-only score view handed to renderers and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreState {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

/// Outcome of scoring one simultaneous clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    pub rows: u32,
    pub points: u32,
    /// New level, if this clear reached the level goal and the cap allowed it.
    pub level_up: Option<u32>,
}

/// Points for clearing `rows` rows at once on `level`.
pub fn line_score(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[rows].saturating_mul(level)
}

/// Gravity interval for a level (milliseconds per row), capped at the table end.
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = (level.max(MIN_LEVEL) - MIN_LEVEL) as usize;
    DROP_INTERVALS[idx.min(DROP_INTERVALS.len() - 1)]
}

/// Lines needed for the first level-up when starting at `start_level`.
pub fn initial_level_goal(start_level: u32) -> u32 {
    if start_level < 10 {
        start_level * 10
    } else {
        (start_level * 10).saturating_sub(50).max(100)
    }
}

/// Score/lines/level tracker for one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    level_goal: u32,
    start_level: u32,
}

impl Progression {
    /// Fresh progression starting at `start_level` (clamped to the valid range).
    pub fn new(start_level: u32) -> Self {
        let start_level = start_level.clamp(MIN_LEVEL, MAX_LEVEL);
        Self {
            score: 0,
            lines: 0,
            level: start_level,
            level_goal: initial_level_goal(start_level),
            start_level,
        }
    }

    /// Back to the starting state (new game).
    pub fn reset(&mut self) {
        *self = Self::new(self.start_level);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_goal(&self) -> u32 {
        self.level_goal
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn score_state(&self) -> ScoreState {
        ScoreState {
            score: self.score,
            lines: self.lines,
            level: self.level,
        }
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Score a clear of `rows` simultaneous rows.
    ///
    /// Points use the level in effect before any level-up from this clear.
    pub fn apply_clear(&mut self, rows: usize) -> ClearScore {
        if rows == 0 {
            return ClearScore::default();
        }

        let points = line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);

        let mut level_up = None;
        if self.lines >= self.level_goal {
            let new_level = (self.level + 1).min(MAX_LEVEL);
            if new_level != self.level {
                level_up = Some(new_level);
            }
            self.level = new_level;
            self.level_goal = self.level_goal.saturating_add(10 * new_level);
        }

        ClearScore {
            rows: rows as u32,
            points,
            level_up,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(MIN_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_score(0, 1), 0);
        assert_eq!(line_score(1, 1), 100);
        assert_eq!(line_score(2, 1), 300);
        assert_eq!(line_score(3, 1), 500);
        assert_eq!(line_score(4, 1), 800);
        assert_eq!(line_score(4, 3), 2400);
        assert_eq!(line_score(5, 1), 0);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 800);
        assert_eq!(drop_interval_ms(MAX_LEVEL), 65);
        assert_eq!(drop_interval_ms(MAX_LEVEL + 10), 65);
        assert_eq!(drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_initial_goal_branches() {
        assert_eq!(initial_level_goal(1), 10);
        assert_eq!(initial_level_goal(9), 90);
        assert_eq!(initial_level_goal(10), 100);
        assert_eq!(initial_level_goal(16), 110);
    }

    #[test]
    fn test_level_up_grows_goal() {
        let mut p = Progression::new(1);
        for _ in 0..9 {
            assert_eq!(p.apply_clear(1).level_up, None);
        }
        let result = p.apply_clear(1);
        assert_eq!(result.level_up, Some(2));
        assert_eq!(p.level(), 2);
        assert_eq!(p.level_goal(), 30);
    }

    #[test]
    fn test_level_capped() {
        let mut p = Progression::new(MAX_LEVEL);
        let goal = p.level_goal();
        let result = p.apply_clear(4);
        assert_eq!(p.lines(), 4);
        assert!(goal > 4);
        assert_eq!(result.level_up, None);

        while p.lines() < goal {
            p.apply_clear(4);
        }
        assert_eq!(p.level(), MAX_LEVEL);
    }

    #[test]
    fn test_reset_keeps_start_level() {
        let mut p = Progression::new(5);
        p.apply_clear(4);
        p.reset();
        assert_eq!(p.score_state(), ScoreState { score: 0, lines: 0, level: 5 });
        assert_eq!(p.level_goal(), 50);
    }
}
