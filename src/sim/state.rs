//! Game state and core simulation types
//!
//! `GameState` owns everything the sim mutates: the board, the connector,
//! the economy, pending timers and the outbound event queue.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::connector::{Connector, Segment};
use super::economy::Economy;
use super::timers::Timers;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Stable marker identity (never reused within a game)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

/// Gem types, in the order the difficulty curve unlocks them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemKind {
    Ruby,
    Sapphire,
    Emerald,
    Topaz,
    Amethyst,
}

impl GemKind {
    pub const ALL: [GemKind; 5] = [
        GemKind::Ruby,
        GemKind::Sapphire,
        GemKind::Emerald,
        GemKind::Topaz,
        GemKind::Amethyst,
    ];

    /// Texture key for the render layer
    pub fn asset_key(&self) -> &'static str {
        match self {
            GemKind::Ruby => "gem1",
            GemKind::Sapphire => "gem2",
            GemKind::Emerald => "gem3",
            GemKind::Topaz => "gem4",
            GemKind::Amethyst => "gem5",
        }
    }
}

/// A gem on the board. Only live markers are stored, so presence on the
/// board is the alive flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub pos: Vec2,
    pub kind: GemKind,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting gestures
    Playing,
    /// Board cleared, banner up, respawn pending
    RoundTransition,
    /// Turns exhausted; only restart is accepted
    GameOver,
}

/// Full-screen banners the UI layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    RoundClear,
    GameOver,
}

impl Banner {
    pub fn asset_key(&self) -> &'static str {
        match self {
            Banner::RoundClear => "wellDone",
            Banner::GameOver => "gameOver",
        }
    }
}

/// Outbound notifications for the render/audio/UI/scene collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    MarkerAdded { id: MarkerId, pos: Vec2, kind: GemKind },
    MarkerRemoved { id: MarkerId },
    /// Locked segments followed by the in-progress one (empty = clear the lines)
    PathChanged { segments: Vec<Segment> },
    Cue { cue: SoundCue },
    ScoreChanged { score: u64 },
    /// Displayed turn counter (never below 0)
    TurnsChanged { turns: u32 },
    RoundChanged { round: u32 },
    BannerShown { banner: Banner },
    BannerHidden { banner: Banner },
    MusicStarted,
    MusicStopped,
    /// Scene layer should restart the game scene
    Restart,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance knobs this run was started with
    pub tuning: Tuning,
    /// Simulation clock (ms since start)
    pub now_ms: u64,
    pub phase: GamePhase,
    /// Live markers
    pub board: Board,
    /// Pointer gesture tracker
    pub connector: Connector,
    pub economy: Economy,
    pub timers: Timers,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game and spawn the first board
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            economy: Economy::new(&tuning),
            board: Board::new(&tuning),
            tuning,
            now_ms: 0,
            phase: GamePhase::Playing,
            connector: Connector::default(),
            timers: Timers::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };

        log::info!("New game (seed {})", seed);
        state.emit(GameEvent::MusicStarted);
        state.notify_economy();
        state.emit(GameEvent::RoundChanged {
            round: state.economy.round,
        });
        state.spawn_board();
        state
    }

    /// Queue an event for the collaborators
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Cue { cue });
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued but not yet drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Spawn a board sized by the economy's current spawn count
    pub fn spawn_board(&mut self) {
        let count = self.economy.spawn_count;
        let placed = self.board.spawn(count, &self.tuning, &mut self.rng);
        for marker in placed {
            self.emit(GameEvent::MarkerAdded {
                id: marker.id,
                pos: marker.pos,
                kind: marker.kind,
            });
        }
    }

    /// Remove a marker and tell the render layer; `None` if it was already gone
    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let removed = self.board.remove(id)?;
        self.emit(GameEvent::MarkerRemoved { id });
        Some(removed)
    }

    /// Remove every live marker
    pub fn clear_board(&mut self) {
        for marker in self.board.clear() {
            self.emit(GameEvent::MarkerRemoved { id: marker.id });
        }
    }

    /// Push score and turn values to the UI
    pub fn notify_economy(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            score: self.economy.score,
        });
        self.emit(GameEvent::TurnsChanged {
            turns: self.economy.displayed_turns(),
        });
    }

    /// Cancel everything scheduled; call when the owning scene goes away
    pub fn teardown(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.connector.cancel(&mut self.timers);
        if cancelled > 0 {
            log::debug!("Teardown cancelled {} pending timers", cancelled);
        }
    }

    /// Rebuild the whole game from scratch with a fresh seed
    pub fn restart(&mut self) {
        self.teardown();
        let seed = self.rng.random::<u64>();
        let mut events = self.drain_events();
        events.push(GameEvent::Restart);

        let mut fresh = GameState::new(seed, self.tuning.clone());
        events.append(&mut fresh.events);
        fresh.events = events;
        *self = fresh;
    }
}
