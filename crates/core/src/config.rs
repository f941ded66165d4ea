//! Runtime game configuration.
//!
//! Defaults mirror the constants in `blockfall_types`. A config is validated
//! once when a session is created.

use thiserror::Error;

use crate::line_clear::PhaseDurations;
use crate::types::{
    BOARD_WIDTH, COLLAPSE_FRAMES, DISSOLVE_FRAMES, HIGHLIGHT_FRAMES, MASK_SIZE, MAX_LEVEL,
    MIN_LEVEL, SPAWN_X, SPAWN_Y,
};

/// Highest row (most negative y) a piece may spawn at.
pub const MIN_SPAWN_Y: i8 = -(MASK_SIZE as i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub start_level: u32,
    pub spawn_x: i8,
    pub spawn_y: i8,
    pub highlight_frames: u32,
    pub dissolve_frames: u32,
    pub collapse_frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start level {0} outside {min}..={max}", min = MIN_LEVEL, max = MAX_LEVEL)]
    StartLevel(u32),
    #[error("spawn column {0} does not fit a {size}-wide mask on the board", size = MASK_SIZE)]
    SpawnColumn(i8),
    #[error("spawn row {0} must be between {min} and 0", min = MIN_SPAWN_Y)]
    SpawnRow(i8),
    #[error("{0} phase must last at least one frame")]
    ZeroDuration(&'static str),
}

impl GameConfig {
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.start_level) {
            return Err(ConfigError::StartLevel(self.start_level));
        }
        let max_x = BOARD_WIDTH as i8 - MASK_SIZE as i8;
        if !(0..=max_x).contains(&self.spawn_x) {
            return Err(ConfigError::SpawnColumn(self.spawn_x));
        }
        if !(MIN_SPAWN_Y..=0).contains(&self.spawn_y) {
            return Err(ConfigError::SpawnRow(self.spawn_y));
        }
        if self.highlight_frames == 0 {
            return Err(ConfigError::ZeroDuration("highlight"));
        }
        if self.dissolve_frames == 0 {
            return Err(ConfigError::ZeroDuration("dissolve"));
        }
        if self.collapse_frames == 0 {
            return Err(ConfigError::ZeroDuration("collapse"));
        }
        Ok(())
    }

    pub fn phase_durations(&self) -> PhaseDurations {
        PhaseDurations {
            highlight: self.highlight_frames,
            dissolve: self.dissolve_frames,
            collapse: self.collapse_frames,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: MIN_LEVEL,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            highlight_frames: HIGHLIGHT_FRAMES,
            dissolve_frames: DISSOLVE_FRAMES,
            collapse_frames: COLLAPSE_FRAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let base = GameConfig::default();
        assert_eq!(
            base.with_start_level(0).validate(),
            Err(ConfigError::StartLevel(0))
        );
        assert_eq!(
            GameConfig { spawn_x: 7, ..base }.validate(),
            Err(ConfigError::SpawnColumn(7))
        );
        assert_eq!(
            GameConfig { spawn_y: 1, ..base }.validate(),
            Err(ConfigError::SpawnRow(1))
        );
        assert_eq!(
            GameConfig { dissolve_frames: 0, ..base }.validate(),
            Err(ConfigError::ZeroDuration("dissolve"))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::StartLevel(42).to_string(),
            "start level 42 outside 1..=20"
        );
    }
}
