//! Match resolver
//!
//! The only code that destroys gems and touches the economy. Every resolver
//! is a no-op once the game is over.

use super::connector::Segment;
use super::shape::{Shape, Triangle, classify};
use super::state::{GamePhase, GameState, MarkerId};
use super::tick::{begin_round_advance, enter_game_over};
use crate::audio::SoundCue;

/// What a resolution did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Every gem removed, vertices first
    pub removed: Vec<MarkerId>,
    /// Gems swept from a triangle's interior
    pub interior: usize,
    pub points: u64,
    pub turn_delta: i32,
}

fn accepts_play(state: &GameState) -> bool {
    state.phase == GamePhase::Playing && !state.economy.terminal
}

/// Classify a released path and resolve it. Unrecognized paths change nothing.
pub fn resolve_path(state: &mut GameState, segments: &[Segment]) -> Option<MatchOutcome> {
    match classify(segments, &state.board) {
        Some(shape) => resolve_shape(state, shape),
        None => {
            log::debug!("Discarded path of {} segments", segments.len());
            None
        }
    }
}

pub fn resolve_shape(state: &mut GameState, shape: Shape) -> Option<MatchOutcome> {
    match shape {
        Shape::Pair(pair) => resolve_pair(state, pair),
        Shape::Triangle(vertices) => resolve_triangle(state, vertices),
    }
}

/// Remove a single tapped gem
pub fn resolve_tap(state: &mut GameState, id: MarkerId) -> Option<MatchOutcome> {
    if !accepts_play(state) || !state.board.is_alive(id) {
        return None;
    }
    state.remove_marker(id);
    let outcome = MatchOutcome {
        removed: vec![id],
        interior: 0,
        points: state.tuning.tap_points,
        turn_delta: -1,
    };
    state.cue(SoundCue::TapRemove);
    Some(settle(state, outcome))
}

/// Remove both gems of a pair
pub fn resolve_pair(state: &mut GameState, pair: [MarkerId; 2]) -> Option<MatchOutcome> {
    if !accepts_play(state) || pair[0] == pair[1] {
        return None;
    }
    let a = state.board.get(pair[0])?;
    let b = state.board.get(pair[1])?;
    if a.kind != b.kind {
        return None;
    }
    let removed: Vec<MarkerId> = pair
        .iter()
        .filter_map(|&id| state.remove_marker(id).map(|m| m.id))
        .collect();
    let outcome = MatchOutcome {
        points: removed.len() as u64 * state.tuning.pair_points_per_marker,
        removed,
        interior: 0,
        turn_delta: -1,
    };
    state.cue(SoundCue::Match);
    Some(settle(state, outcome))
}

/// Remove the triangle's vertices and every gem inside it
pub fn resolve_triangle(state: &mut GameState, vertices: [MarkerId; 3]) -> Option<MatchOutcome> {
    let [a, b, c] = vertices;
    if !accepts_play(state) || a == b || b == c || c == a {
        return None;
    }
    let mut corners = Vec::with_capacity(3);
    for &id in &vertices {
        corners.push(*state.board.get(id)?);
    }
    if corners.iter().any(|m| m.kind != corners[0].kind) {
        return None;
    }
    let triangle = Triangle::new(corners[0].pos, corners[1].pos, corners[2].pos);

    let mut removed: Vec<MarkerId> = vertices
        .iter()
        .filter_map(|&id| state.remove_marker(id).map(|m| m.id))
        .collect();

    let inside: Vec<MarkerId> = state
        .board
        .markers()
        .iter()
        .filter(|m| triangle.contains(m.pos))
        .map(|m| m.id)
        .collect();
    for &id in &inside {
        state.remove_marker(id);
    }
    removed.extend_from_slice(&inside);

    let interior = inside.len();
    let turn_delta = if interior > 0 { interior as i32 + 1 } else { -1 };
    state.cue(if interior > 0 {
        SoundCue::TriangleBonus
    } else {
        SoundCue::Match
    });

    let outcome = MatchOutcome {
        removed,
        interior,
        points: state.tuning.triangle_points,
        turn_delta,
    };
    Some(settle(state, outcome))
}

/// Apply score and turns, notify the UI, then check for game over or a
/// cleared board. Game over wins when both happen on the same play.
fn settle(state: &mut GameState, outcome: MatchOutcome) -> MatchOutcome {
    state.economy.award(outcome.points);
    state.economy.adjust_turns(outcome.turn_delta);
    state.notify_economy();
    log::info!(
        "Cleared {} gems ({} interior): +{} points, turns {:+} -> {}",
        outcome.removed.len(),
        outcome.interior,
        outcome.points,
        outcome.turn_delta,
        state.economy.turns
    );

    if state.economy.is_exhausted() {
        enter_game_over(state);
    } else if state.board.is_empty() {
        begin_round_advance(state);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, GemKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Fresh game with a hand-placed board
    fn game_with(markers: &[(GemKind, Vec2)]) -> (GameState, Vec<MarkerId>) {
        let mut state = GameState::new(12345, Tuning::default());
        state.board.clear();
        let ids = markers
            .iter()
            .map(|&(kind, pos)| state.board.place(kind, pos).expect("room for marker").id)
            .collect();
        state.drain_events();
        (state, ids)
    }

    const A: Vec2 = Vec2::new(500.0, 500.0);
    const B: Vec2 = Vec2::new(1100.0, 500.0);
    const C: Vec2 = Vec2::new(800.0, 1000.0);

    #[test]
    fn test_pair_scores_400_and_spends_turn() {
        let (mut state, ids) = game_with(&[
            (GemKind::Ruby, A),
            (GemKind::Ruby, B),
            (GemKind::Sapphire, C),
        ]);
        let outcome = resolve_pair(&mut state, [ids[0], ids[1]]).unwrap();
        assert_eq!(outcome.removed, vec![ids[0], ids[1]]);
        assert_eq!(outcome.points, 400);
        assert_eq!(state.economy.score, 400);
        assert_eq!(state.economy.turns, 14);
        assert_eq!(state.board.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tap_scores_100() {
        let (mut state, ids) = game_with(&[(GemKind::Ruby, A), (GemKind::Ruby, B)]);
        let outcome = resolve_tap(&mut state, ids[0]).unwrap();
        assert_eq!(outcome.removed, vec![ids[0]]);
        assert_eq!(state.economy.score, 100);
        assert_eq!(state.economy.turns, 14);
        assert!(state.board.is_alive(ids[1]));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Cue { cue: SoundCue::TapRemove })
        );
    }

    #[test]
    fn test_empty_triangle_spends_turn() {
        let (mut state, ids) = game_with(&[
            (GemKind::Ruby, A),
            (GemKind::Ruby, B),
            (GemKind::Ruby, C),
            (GemKind::Sapphire, Vec2::new(1500.0, 300.0)),
        ]);
        let outcome = resolve_triangle(&mut state, [ids[0], ids[1], ids[2]]).unwrap();
        assert_eq!(outcome.removed.len(), 3);
        assert_eq!(outcome.interior, 0);
        assert_eq!(state.economy.score, 900);
        assert_eq!(state.economy.turns, 14);
        assert_eq!(state.board.len(), 1);
    }

    #[test]
    fn test_triangle_sweeps_interior_and_grants_turns() {
        let (mut state, ids) = game_with(&[
            (GemKind::Ruby, A),
            (GemKind::Ruby, B),
            (GemKind::Ruby, C),
            // Inside, any kind
            (GemKind::Sapphire, Vec2::new(800.0, 600.0)),
            (GemKind::Ruby, Vec2::new(800.0, 750.0)),
            // Outside
            (GemKind::Sapphire, Vec2::new(1500.0, 300.0)),
        ]);
        let outcome = resolve_triangle(&mut state, [ids[0], ids[1], ids[2]]).unwrap();
        assert_eq!(outcome.interior, 2);
        assert_eq!(outcome.removed.len(), 5);
        assert_eq!(&outcome.removed[3..], &[ids[3], ids[4]]);
        assert_eq!(state.economy.score, 900);
        assert_eq!(state.economy.turns, 15 + 3);
        assert_eq!(state.board.markers().len(), 1);
        assert!(state.board.is_alive(ids[5]));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Cue { cue: SoundCue::TriangleBonus })
        );
    }

    #[test]
    fn test_clearing_board_advances_round() {
        let (mut state, ids) = game_with(&[(GemKind::Ruby, A), (GemKind::Ruby, B), (GemKind::Ruby, C)]);
        resolve_triangle(&mut state, [ids[0], ids[1], ids[2]]).unwrap();
        assert!(state.board.is_empty());
        assert_eq!(state.phase, GamePhase::RoundTransition);
        assert_eq!(state.economy.round, 2);
        assert_eq!(state.economy.spawn_count, 7);
    }

    #[test]
    fn test_last_turn_ends_game() {
        let (mut state, ids) = game_with(&[
            (GemKind::Ruby, A),
            (GemKind::Ruby, B),
            (GemKind::Ruby, C),
        ]);
        state.economy.turns = 1;
        resolve_tap(&mut state, ids[0]).unwrap();
        assert_eq!(state.economy.turns, 0);
        assert!(state.economy.terminal);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Nothing resolves after the turns run out
        let score = state.economy.score;
        assert!(resolve_tap(&mut state, ids[1]).is_none());
        assert!(resolve_pair(&mut state, [ids[1], ids[2]]).is_none());
        assert_eq!(state.economy.score, score);
        assert_eq!(state.economy.turns, 0);
        assert_eq!(state.board.len(), 2);
    }

    #[test]
    fn test_game_over_beats_round_clear() {
        let (mut state, ids) = game_with(&[(GemKind::Ruby, A)]);
        state.economy.turns = 1;
        resolve_tap(&mut state, ids[0]).unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.economy.round, 1);
    }

    #[test]
    fn test_stale_ids_do_nothing() {
        let (mut state, ids) = game_with(&[(GemKind::Ruby, A), (GemKind::Ruby, B)]);
        state.remove_marker(ids[1]);
        assert!(resolve_pair(&mut state, [ids[0], ids[1]]).is_none());
        assert!(resolve_pair(&mut state, [ids[0], ids[0]]).is_none());
        assert!(resolve_tap(&mut state, ids[1]).is_none());
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.economy.turns, 15);
    }

    #[test]
    fn test_mixed_kinds_do_not_resolve() {
        let (mut state, ids) = game_with(&[
            (GemKind::Ruby, A),
            (GemKind::Sapphire, B),
            (GemKind::Ruby, C),
            (GemKind::Sapphire, Vec2::new(1500.0, 300.0)),
        ]);
        assert!(resolve_pair(&mut state, [ids[0], ids[1]]).is_none());
        assert!(resolve_triangle(&mut state, [ids[0], ids[1], ids[2]]).is_none());
        assert_eq!(state.board.len(), 4);
        assert_eq!(state.economy.score, 0);
        assert_eq!(state.economy.turns, 15);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_resolve_path_discards_unknown_shapes() {
        let (mut state, ids) = game_with(&[(GemKind::Ruby, A), (GemKind::Ruby, B), (GemKind::Ruby, C)]);
        let a = *state.board.get(ids[0]).unwrap();
        let b = *state.board.get(ids[1]).unwrap();
        let c = *state.board.get(ids[2]).unwrap();
        let two = [Segment::between(&a, &b), Segment::between(&b, &c)];
        assert!(resolve_path(&mut state, &two).is_none());
        assert_eq!(state.board.len(), 3);

        let pair = [Segment::between(&a, &b)];
        assert_eq!(resolve_path(&mut state, &pair).map(|o| o.points), Some(400));
    }
}
