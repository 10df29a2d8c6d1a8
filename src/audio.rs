//! Sound cue vocabulary
//!
//! The sim never plays audio itself. It emits fire-and-forget cues that the
//! audio layer maps to loaded clips.

use serde::{Deserialize, Serialize};

/// Looping background track started with every new game
pub const MUSIC_TRACK: &str = "gameMusic";

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    /// Drag started or a segment locked onto a gem
    Connect,
    /// Pair (or plain triangle) cleared
    Match,
    /// Single gem tapped away
    TapRemove,
    /// Triangle swallowed gems and paid out extra turns
    TriangleBonus,
    /// Board cleared, next round incoming
    RoundClear,
    /// Turns ran out
    TurnExhausted,
    /// Menu/button feedback (restart)
    Ui,
}

impl SoundCue {
    /// Asset key of the clip the audio layer should play
    pub fn asset_key(&self) -> &'static str {
        match self {
            SoundCue::Connect => "jewelSound",
            SoundCue::Match => "jewelClearSound",
            SoundCue::TapRemove => "jewelClearSound",
            SoundCue::TriangleBonus => "extraTurns",
            SoundCue::RoundClear => "wellDoneSound",
            SoundCue::TurnExhausted => "gameOver",
            SoundCue::Ui => "UI-sound",
        }
    }

    /// Relative playback volume (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        match self {
            SoundCue::RoundClear => 0.75,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_serializes_kebab_case() {
        let json = serde_json::to_string(&SoundCue::TriangleBonus).unwrap();
        assert_eq!(json, "\"triangle-bonus\"");
        let json = serde_json::to_string(&SoundCue::TurnExhausted).unwrap();
        assert_eq!(json, "\"turn-exhausted\"");
    }

    #[test]
    fn test_round_clear_is_quieter() {
        assert!(SoundCue::RoundClear.volume() < SoundCue::Match.volume());
        assert_eq!(SoundCue::Connect.asset_key(), "jewelSound");
    }
}
