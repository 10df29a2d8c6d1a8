//! Demo autoplayer
//!
//! Picks a move from the board and scripts the pointer gesture for it,
//! driving the same `tick` API a real input layer would.

use std::collections::VecDeque;

use super::board::Board;
use super::shape::Triangle;
use super::state::{GamePhase, GameState, Marker};
use super::tick::{PointerEvent, TickInput};
use crate::consts::FRAME_MS;

/// A move the autoplayer intends to make
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Triangle([Marker; 3]),
    Pair([Marker; 2]),
    Tap(Marker),
}

/// Best available move: the triangle sweeping the most gems, else any pair,
/// else a tap. Triangles that enclose nothing lose to pairs.
pub fn choose_plan(board: &Board) -> Option<Plan> {
    let markers = board.markers();
    let mut best: Option<([Marker; 3], usize)> = None;
    let mut pair: Option<[Marker; 2]> = None;

    for (i, a) in markers.iter().enumerate() {
        for (j, b) in markers.iter().enumerate().skip(i + 1) {
            if a.kind != b.kind {
                continue;
            }
            if pair.is_none() {
                pair = Some([*a, *b]);
            }
            for c in markers.iter().skip(j + 1).filter(|c| c.kind == a.kind) {
                let triangle = Triangle::new(a.pos, b.pos, c.pos);
                if triangle.is_degenerate() {
                    continue;
                }
                let interior = markers
                    .iter()
                    .filter(|m| m.id != a.id && m.id != b.id && m.id != c.id)
                    .filter(|m| triangle.contains(m.pos))
                    .count();
                if interior > 0 && best.is_none_or(|(_, n)| interior > n) {
                    best = Some(([*a, *b, *c], interior));
                }
            }
        }
    }

    best.map(|(vertices, _)| Plan::Triangle(vertices))
        .or(pair.map(Plan::Pair))
        .or(markers.first().map(|m| Plan::Tap(*m)))
}

impl Plan {
    /// Frames (input, dt) that perform this move
    pub fn gesture(&self, hold_threshold_ms: u64) -> Vec<(TickInput, u64)> {
        let path: Vec<&Marker> = match self {
            Plan::Triangle([a, b, c]) => vec![a, b, c, a],
            Plan::Pair([a, b]) => vec![a, b],
            Plan::Tap(m) => {
                return vec![
                    (down(m), FRAME_MS),
                    (TickInput::pointer(PointerEvent::Up { pos: m.pos }), FRAME_MS),
                ];
            }
        };

        let first = path[0];
        let last = path[path.len() - 1];
        let mut frames = vec![
            (down(first), FRAME_MS),
            // Hold in place until the press turns into a drag
            (
                TickInput::pointer(PointerEvent::Move { pos: first.pos }),
                hold_threshold_ms + FRAME_MS,
            ),
        ];
        for m in &path[1..] {
            frames.push((TickInput::pointer(PointerEvent::Move { pos: m.pos }), FRAME_MS));
        }
        frames.push((TickInput::pointer(PointerEvent::Up { pos: last.pos }), FRAME_MS));
        frames
    }
}

fn down(m: &Marker) -> TickInput {
    TickInput::pointer(PointerEvent::Down {
        pos: m.pos,
        target: Some(m.id),
    })
}

/// Feeds scripted gestures frame by frame
#[derive(Debug, Default)]
pub struct Autoplayer {
    script: VecDeque<(TickInput, u64)>,
    /// Restart once after game over
    pub restart_after_game_over: bool,
}

impl Autoplayer {
    /// Input and frame time for the next tick
    pub fn next_frame(&mut self, state: &GameState) -> (TickInput, u64) {
        if self.script.is_empty() {
            match state.phase {
                GamePhase::Playing if state.connector.is_idle() => {
                    if let Some(plan) = choose_plan(&state.board) {
                        log::debug!("Autoplay: {:?}", plan);
                        self.script
                            .extend(plan.gesture(state.tuning.hold_threshold_ms));
                    }
                }
                GamePhase::GameOver if self.restart_after_game_over && state.board.is_empty() => {
                    self.restart_after_game_over = false;
                    let restart = TickInput {
                        restart: true,
                        ..Default::default()
                    };
                    return (restart, FRAME_MS);
                }
                _ => {}
            }
        }
        self.script
            .pop_front()
            .unwrap_or_else(|| (TickInput::default(), FRAME_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, GemKind, tick};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn board_with(markers: &[(GemKind, Vec2)]) -> Board {
        let mut board = Board::new(&Tuning::default());
        for &(kind, pos) in markers {
            board.place(kind, pos).expect("room for marker");
        }
        board
    }

    #[test]
    fn test_prefers_triangle_with_most_interior() {
        let board = board_with(&[
            // Empty triangle, skipped
            (GemKind::Topaz, Vec2::new(1400.0, 100.0)),
            (GemKind::Topaz, Vec2::new(1800.0, 100.0)),
            (GemKind::Topaz, Vec2::new(1600.0, 300.0)),
            // Triangle around a sapphire
            (GemKind::Ruby, Vec2::new(500.0, 500.0)),
            (GemKind::Ruby, Vec2::new(1100.0, 500.0)),
            (GemKind::Ruby, Vec2::new(800.0, 1000.0)),
            (GemKind::Sapphire, Vec2::new(800.0, 650.0)),
        ]);
        match choose_plan(&board) {
            Some(Plan::Triangle(v)) => {
                let ids: Vec<u32> = v.iter().map(|m| m.id.0).collect();
                assert_eq!(ids, vec![4, 5, 6]);
            }
            other => panic!("expected triangle, got {:?}", other),
        }
    }

    #[test]
    fn test_falls_back_to_pair_then_tap() {
        let board = board_with(&[
            (GemKind::Ruby, Vec2::new(500.0, 500.0)),
            (GemKind::Sapphire, Vec2::new(800.0, 500.0)),
            (GemKind::Ruby, Vec2::new(1100.0, 500.0)),
        ]);
        assert!(matches!(choose_plan(&board), Some(Plan::Pair(_))));

        // An empty triangle is only worth a pair
        let board = board_with(&[
            (GemKind::Ruby, Vec2::new(500.0, 500.0)),
            (GemKind::Ruby, Vec2::new(1100.0, 500.0)),
            (GemKind::Ruby, Vec2::new(800.0, 1000.0)),
        ]);
        assert!(matches!(choose_plan(&board), Some(Plan::Pair(_))));

        let board = board_with(&[(GemKind::Topaz, Vec2::new(500.0, 500.0))]);
        assert!(matches!(choose_plan(&board), Some(Plan::Tap(_))));

        let board = board_with(&[]);
        assert_eq!(choose_plan(&board), None);
    }

    #[test]
    fn test_autoplay_makes_progress() {
        let mut state = GameState::new(2024, Tuning::default());
        let mut player = Autoplayer::default();
        for _ in 0..400 {
            let (input, dt) = player.next_frame(&state);
            tick(&mut state, &input, dt);
        }
        assert!(state.economy.score > 0);
        assert!(state.economy.turns < 15 || state.economy.round > 1);
    }

    #[test]
    fn test_restarts_once_after_game_over() {
        let mut state = GameState::new(7, Tuning::default());
        state.clear_board();
        state.board.place(GemKind::Ruby, Vec2::new(600.0, 400.0)).unwrap();
        state.board.place(GemKind::Sapphire, Vec2::new(1200.0, 700.0)).unwrap();
        state.economy.turns = 1;
        state.drain_events();

        let mut player = Autoplayer {
            restart_after_game_over: true,
            ..Default::default()
        };
        let mut restarted = false;
        for _ in 0..300 {
            let (input, dt) = player.next_frame(&state);
            tick(&mut state, &input, dt);
            if state.drain_events().contains(&GameEvent::Restart) {
                restarted = true;
                break;
            }
        }
        assert!(restarted);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.economy.turns, 15);
        assert!(!player.restart_after_game_over);
    }
}
