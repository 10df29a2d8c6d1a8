//! Gemlink - connect-the-gems puzzle core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, connector, shape classifier, resolver, economy)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue vocabulary handed to the audio collaborator
//!
//! Rendering, asset loading, music playback and menus live outside this crate.
//! The host feeds pointer events and frame ticks in and drains `sim::GameEvent`s out.

pub mod audio;
pub mod sim;
pub mod tuning;

pub use audio::SoundCue;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Host frame step used by the demo driver (60 Hz)
    pub const FRAME_MS: u64 = 16;

    /// Playfield rectangle (board coordinates, right of the sidebar)
    pub const BOARD_MIN_X: f32 = 400.0;
    pub const BOARD_MAX_X: f32 = 1900.0;
    pub const BOARD_MIN_Y: f32 = 20.0;
    pub const BOARD_MAX_Y: f32 = 1060.0;

    /// Visual marker size; also the minimum center separation `D_min`
    pub const MARKER_SIZE: f32 = 720.0 * 0.07;
    /// Hard cap on markers per spawn
    pub const MAX_MARKERS: u32 = 50;
    /// Position samples per marker before placement is skipped
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

    /// Press duration separating a tap from a drag
    pub const HOLD_THRESHOLD_MS: u64 = 150;
    /// "Well done" banner hold before the next board spawns
    pub const ROUND_BANNER_MS: u64 = 2500;
    /// Delay between turn exhaustion and the game over banner
    pub const GAME_OVER_DELAY_MS: u64 = 1500;

    /// Economy starting values
    pub const START_TURNS: i32 = 15;
    pub const START_SPAWN_COUNT: u32 = 6;

    /// Score awards
    pub const TAP_POINTS: u64 = 100;
    pub const PAIR_POINTS_PER_MARKER: u64 = 200;
    pub const TRIANGLE_POINTS: u64 = 900;
}

/// Twice the signed area of triangle (a, b, c); positive when counter-clockwise
#[inline]
pub fn cross2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Check whether `p` lies in the axis-aligned square of side `size` centered on `center`
#[inline]
pub fn square_contains(center: Vec2, size: f32, p: Vec2) -> bool {
    let half = size / 2.0;
    (p.x - center.x).abs() <= half && (p.y - center.y).abs() <= half
}
