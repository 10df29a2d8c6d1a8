//! Connector / path tracker
//!
//! Turns one pointer gesture (down to up) into either a tap on a single gem
//! or an ordered path of locked segments between same-kind gems.
//!
//! State flow:
//! - `Idle` --down on gem--> `Pressed` (hold timer pending)
//! - `Pressed` --hold timer--> `Drawing`; --up--> tap; --leaves gem--> `Idle`
//! - `Drawing` --enters another gem of the same kind--> `Locked` on that gem
//! - `Locked` --leaves the anchor gem--> `Drawing`
//! - any --up--> `Idle`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::state::{Marker, MarkerId};
use super::timers::{TimerId, TimerKind, Timers};
use crate::square_contains;

/// One end of a segment: a gem's exact center, or the raw pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub marker: Option<MarkerId>,
    pub pos: Vec2,
}

impl Anchor {
    pub fn at_marker(marker: &Marker) -> Self {
        Self {
            marker: Some(marker.id),
            pos: marker.pos,
        }
    }

    pub fn at_pointer(pos: Vec2) -> Self {
        Self { marker: None, pos }
    }
}

/// A line of the connector path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Anchor,
    pub to: Anchor,
}

impl Segment {
    /// A segment locked between two gems
    pub fn between(from: &Marker, to: &Marker) -> Self {
        Self {
            from: Anchor::at_marker(from),
            to: Anchor::at_marker(to),
        }
    }

    /// Both ends sit on gems
    pub fn is_locked(&self) -> bool {
        self.from.marker.is_some() && self.to.marker.is_some()
    }
}

/// Externally visible connector phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorPhase {
    Idle,
    Pressed,
    Drawing,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Pressed { marker: MarkerId, hold: TimerId },
    Drawing { anchor: MarkerId },
    Locked { anchor: MarkerId },
}

/// How a gesture ended
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// No gesture was in progress
    Ignored,
    /// Gesture ended off its gem; nothing happens
    Discard,
    /// Quick press and release on a gem
    Tap(MarkerId),
    /// Drag ended on its gem; the locked segments in order
    Path(Vec<Segment>),
}

#[derive(Debug, Clone)]
pub struct Connector {
    state: State,
    /// Permanent segments of the current gesture
    locked: Vec<Segment>,
    /// Last known pointer position
    pointer: Vec2,
    /// Drawn path changed since last `take_dirty`
    dirty: bool,
}

impl Default for Connector {
    fn default() -> Self {
        Self {
            state: State::Idle,
            locked: Vec::new(),
            pointer: Vec2::ZERO,
            dirty: false,
        }
    }
}

impl Connector {
    pub fn phase(&self) -> ConnectorPhase {
        match self.state {
            State::Idle => ConnectorPhase::Idle,
            State::Pressed { .. } => ConnectorPhase::Pressed,
            State::Drawing { .. } => ConnectorPhase::Drawing,
            State::Locked { .. } => ConnectorPhase::Locked,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Gem the gesture currently hangs off
    pub fn anchor(&self) -> Option<MarkerId> {
        match self.state {
            State::Idle => None,
            State::Pressed { marker, .. } => Some(marker),
            State::Drawing { anchor } | State::Locked { anchor } => Some(anchor),
        }
    }

    pub fn locked_segments(&self) -> &[Segment] {
        &self.locked
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Segments to draw: locked ones plus the in-progress segment from the
    /// current anchor to the pointer
    pub fn segments(&self, board: &Board) -> Vec<Segment> {
        let mut segments = self.locked.clone();
        if let State::Drawing { anchor } | State::Locked { anchor } = self.state {
            if let Some(marker) = board.get(anchor) {
                segments.push(Segment {
                    from: Anchor::at_marker(marker),
                    to: Anchor::at_pointer(self.pointer),
                });
            }
        }
        segments
    }

    /// Returns and clears the "path needs redrawing" flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Pointer pressed on a gem: start the hold timer
    pub fn press(&mut self, marker: &Marker, pos: Vec2, timers: &mut Timers, hold_due_ms: u64) {
        self.cancel(timers);
        let hold = timers.schedule(hold_due_ms, TimerKind::Hold);
        self.state = State::Pressed {
            marker: marker.id,
            hold,
        };
        self.pointer = pos;
    }

    /// Hold timer fired. Returns true if this started a drag.
    pub fn hold_elapsed(&mut self, timer: TimerId, board: &Board) -> bool {
        match self.state {
            State::Pressed { marker, hold } if hold == timer => {
                if board.is_alive(marker) {
                    self.state = State::Drawing { anchor: marker };
                    self.dirty = true;
                    true
                } else {
                    self.state = State::Idle;
                    false
                }
            }
            _ => false,
        }
    }

    /// Track the pointer. Leaving the pressed gem before the hold fires
    /// abandons the gesture.
    pub fn pointer_moved(&mut self, pos: Vec2, board: &Board, timers: &mut Timers) {
        self.pointer = pos;
        match self.state {
            State::Pressed { marker, hold } => {
                if !board.bounds_contain(marker, pos) {
                    timers.cancel(hold);
                    self.state = State::Idle;
                    log::debug!("Press on {:?} abandoned (moved off before hold)", marker);
                }
            }
            State::Drawing { .. } | State::Locked { .. } => self.dirty = true,
            _ => {}
        }
    }

    /// Per-frame geometry update: release the lock when the pointer leaves
    /// the anchor, lock onto a same-kind gem when the pointer enters one.
    /// Returns the gem locked onto this frame.
    pub fn update(&mut self, board: &Board) -> Option<MarkerId> {
        if let State::Locked { anchor } = self.state {
            if !board.bounds_contain(anchor, self.pointer) {
                self.state = State::Drawing { anchor };
                self.dirty = true;
            }
        }

        let State::Drawing { anchor } = self.state else {
            return None;
        };
        let from = *board.get(anchor)?;
        let target = *board.markers().iter().find(|m| {
            m.id != anchor
                && m.kind == from.kind
                && square_contains(m.pos, board.marker_size(), self.pointer)
        })?;

        self.locked.push(Segment::between(&from, &target));
        self.state = State::Locked { anchor: target.id };
        self.dirty = true;
        log::debug!(
            "Locked {:?} -> {:?} ({} segments)",
            from.id,
            target.id,
            self.locked.len()
        );
        Some(target.id)
    }

    /// Pointer released: end the gesture and report what it was.
    pub fn release(&mut self, pos: Vec2, board: &Board, timers: &mut Timers) -> Release {
        self.pointer = pos;
        let state = std::mem::replace(&mut self.state, State::Idle);
        let locked = std::mem::take(&mut self.locked);
        if !matches!(state, State::Idle | State::Pressed { .. }) {
            self.dirty = true;
        }

        match state {
            State::Idle => Release::Ignored,
            State::Pressed { marker, hold } => {
                timers.cancel(hold);
                if board.bounds_contain(marker, pos) {
                    Release::Tap(marker)
                } else {
                    Release::Discard
                }
            }
            State::Drawing { anchor } => {
                if board.bounds_contain(anchor, pos) {
                    Release::Path(locked)
                } else {
                    Release::Discard
                }
            }
            // Terminal point is the anchor itself
            State::Locked { anchor } => {
                if board.is_alive(anchor) {
                    Release::Path(locked)
                } else {
                    Release::Discard
                }
            }
        }
    }

    /// Drop any gesture in progress
    pub fn cancel(&mut self, timers: &mut Timers) {
        if let State::Pressed { hold, .. } = self.state {
            timers.cancel(hold);
        }
        if !self.is_idle() || !self.locked.is_empty() {
            self.dirty = true;
        }
        self.state = State::Idle;
        self.locked.clear();
    }
}
