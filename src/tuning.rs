//! Data-driven game balance
//!
//! Every constant the simulation consults lives here so balance can be
//! tweaked from a JSON file without touching the sim.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::GemKind;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// One row of the difficulty curve: spawn counts up to `max_spawn_count`
/// draw from the first `kinds` gem kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTier {
    pub max_spawn_count: u32,
    pub kinds: usize,
}

/// Default difficulty curve; anything past the last row uses every kind
pub const DEFAULT_KIND_TIERS: [KindTier; 3] = [
    KindTier { max_spawn_count: 10, kinds: 2 },
    KindTier { max_spawn_count: 15, kinds: 3 },
    KindTier { max_spawn_count: 20, kinds: 4 },
];

/// Game balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    /// Top-left corner of the spawn rectangle
    pub board_min: Vec2,
    /// Bottom-right corner of the spawn rectangle
    pub board_max: Vec2,
    /// Marker side length; doubles as the minimum center separation
    pub marker_size: f32,
    /// Upper bound on markers per spawn
    pub max_markers: u32,
    /// Samples per marker before giving up on it
    pub max_placement_attempts: u32,
    /// Difficulty curve, ordered by `max_spawn_count`
    pub kind_tiers: Vec<KindTier>,

    // === Timing ===
    pub hold_threshold_ms: u64,
    pub round_banner_ms: u64,
    pub game_over_delay_ms: u64,

    // === Economy ===
    pub start_turns: i32,
    pub start_spawn_count: u32,
    pub tap_points: u64,
    pub pair_points_per_marker: u64,
    pub triangle_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_min: Vec2::new(BOARD_MIN_X, BOARD_MIN_Y),
            board_max: Vec2::new(BOARD_MAX_X, BOARD_MAX_Y),
            marker_size: MARKER_SIZE,
            max_markers: MAX_MARKERS,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            kind_tiers: DEFAULT_KIND_TIERS.to_vec(),

            hold_threshold_ms: HOLD_THRESHOLD_MS,
            round_banner_ms: ROUND_BANNER_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,

            start_turns: START_TURNS,
            start_spawn_count: START_SPAWN_COUNT,
            tap_points: TAP_POINTS,
            pair_points_per_marker: PAIR_POINTS_PER_MARKER,
            triangle_points: TRIANGLE_POINTS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string (missing fields use defaults)
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.marker_size > 0.0) {
            return Err(invalid("marker_size", "must be positive"));
        }
        if self.board_max.x <= self.board_min.x || self.board_max.y <= self.board_min.y {
            return Err(invalid("board_max", "must lie below and right of board_min"));
        }
        if self.max_markers == 0 {
            return Err(invalid("max_markers", "must be at least 1"));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid("max_placement_attempts", "must be at least 1"));
        }
        if self.start_spawn_count == 0 {
            return Err(invalid("start_spawn_count", "must be at least 1"));
        }
        if self.start_turns <= 0 {
            return Err(invalid("start_turns", "must be positive"));
        }
        for pair in self.kind_tiers.windows(2) {
            if pair[1].max_spawn_count <= pair[0].max_spawn_count {
                return Err(invalid("kind_tiers", "rows must be sorted by max_spawn_count"));
            }
        }
        if let Some(tier) = self
            .kind_tiers
            .iter()
            .find(|t| t.kinds == 0 || t.kinds > GemKind::ALL.len())
        {
            return Err(TuningError::Invalid {
                field: "kind_tiers",
                reason: format!(
                    "tier up to {} names {} kinds (expected 1..={})",
                    tier.max_spawn_count,
                    tier.kinds,
                    GemKind::ALL.len()
                ),
            });
        }
        Ok(())
    }

    /// Gem kinds in play for a board of `spawn_count` markers
    pub fn active_kinds(&self, spawn_count: u32) -> &'static [GemKind] {
        let count = self
            .kind_tiers
            .iter()
            .find(|t| spawn_count <= t.max_spawn_count)
            .map(|t| t.kinds)
            .unwrap_or(GemKind::ALL.len());
        &GemKind::ALL[..count.clamp(1, GemKind::ALL.len())]
    }
}

fn invalid(field: &'static str, reason: &str) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
