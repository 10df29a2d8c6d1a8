//! Per-frame simulation step
//!
//! Order within one frame:
//! 1. advance the clock and run due timers
//! 2. process at most one pointer event (or the restart action)
//! 3. connector geometry update (endpoint tracking, lock checks)
//!
//! The host then drains `GameEvent`s for rendering and audio.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::connector::Release;
use super::resolve::{resolve_path, resolve_tap};
use super::state::{Banner, GameEvent, GamePhase, GameState, MarkerId};
use super::timers::{TimerId, TimerKind};
use crate::audio::SoundCue;

/// Pointer input delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Press; `target` is the gem the input layer hit-tested, if any
    Down { pos: Vec2, target: Option<MarkerId> },
    Move { pos: Vec2 },
    Up { pos: Vec2 },
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: Option<PointerEvent>,
    /// Restart action from the game over screen
    pub restart: bool,
}

impl TickInput {
    pub fn pointer(event: PointerEvent) -> Self {
        Self {
            pointer: Some(event),
            restart: false,
        }
    }
}

/// Advance the game by `dt_ms` and apply this frame's input
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    state.now_ms += dt_ms;

    for (id, kind) in state.timers.advance(state.now_ms) {
        on_timer(state, id, kind);
    }

    if input.restart {
        if state.phase == GamePhase::GameOver {
            log::info!("Restart requested (final score {})", state.economy.score);
            state.cue(SoundCue::Ui);
            state.restart();
        }
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(event) = input.pointer {
        on_pointer(state, event);
    }

    if let Some(locked) = state.connector.update(&state.board) {
        log::debug!("Connected to {:?}", locked);
        state.cue(SoundCue::Connect);
    }

    flush_path(state);
}

fn on_pointer(state: &mut GameState, event: PointerEvent) {
    match event {
        PointerEvent::Down { pos, target } => {
            if !state.connector.is_idle() {
                return;
            }
            let marker = target
                .and_then(|id| state.board.get(id))
                .or_else(|| state.board.marker_at(pos))
                .copied();
            if let Some(marker) = marker {
                let due = state.now_ms + state.tuning.hold_threshold_ms;
                state.connector.press(&marker, pos, &mut state.timers, due);
            }
        }
        PointerEvent::Move { pos } => {
            state
                .connector
                .pointer_moved(pos, &state.board, &mut state.timers);
        }
        PointerEvent::Up { pos } => {
            let release = state
                .connector
                .release(pos, &state.board, &mut state.timers);
            flush_path(state);
            match release {
                Release::Ignored => {}
                Release::Discard => log::debug!("Gesture ended off its gem, discarded"),
                Release::Tap(id) => {
                    resolve_tap(state, id);
                }
                Release::Path(segments) => {
                    resolve_path(state, &segments);
                }
            }
        }
    }
}

/// Emit the connector path if it changed
fn flush_path(state: &mut GameState) {
    if state.connector.take_dirty() {
        let segments = state.connector.segments(&state.board);
        state.emit(GameEvent::PathChanged { segments });
    }
}

fn on_timer(state: &mut GameState, id: TimerId, kind: TimerKind) {
    match kind {
        TimerKind::Hold => {
            if state.connector.hold_elapsed(id, &state.board) {
                state.cue(SoundCue::Connect);
            }
        }
        TimerKind::Respawn => {
            if state.phase != GamePhase::RoundTransition {
                return;
            }
            state.emit(GameEvent::BannerHidden {
                banner: Banner::RoundClear,
            });
            state.spawn_board();
            state.phase = GamePhase::Playing;
        }
        TimerKind::GameOver => {
            state.emit(GameEvent::MusicStopped);
            state.clear_board();
            state.emit(GameEvent::BannerShown {
                banner: Banner::GameOver,
            });
        }
    }
}

/// Board emptied: bump round and difficulty, show the banner, schedule the respawn
pub fn begin_round_advance(state: &mut GameState) {
    let spawn_count = state.economy.advance_round(state.tuning.max_markers);
    log::info!(
        "Round {} cleared, next board has {} gems",
        state.economy.round - 1,
        spawn_count
    );

    state.connector.cancel(&mut state.timers);
    state.phase = GamePhase::RoundTransition;
    state.emit(GameEvent::RoundChanged {
        round: state.economy.round,
    });
    state.emit(GameEvent::BannerShown {
        banner: Banner::RoundClear,
    });
    state.cue(SoundCue::RoundClear);

    let due = state.now_ms + state.tuning.round_banner_ms;
    state.timers.schedule(due, TimerKind::Respawn);
}

/// Turns exhausted: freeze the board and schedule the game over screen
pub fn enter_game_over(state: &mut GameState) {
    log::info!(
        "Out of turns: final score {} in round {}",
        state.economy.score,
        state.economy.round
    );

    state.economy.terminal = true;
    state.phase = GamePhase::GameOver;
    state.connector.cancel(&mut state.timers);
    state.cue(SoundCue::TurnExhausted);

    let due = state.now_ms + state.tuning.game_over_delay_ms;
    state.timers.schedule(due, TimerKind::GameOver);
}
