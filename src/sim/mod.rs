//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by marker ID)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod board;
pub mod connector;
pub mod economy;
pub mod resolve;
pub mod shape;
pub mod state;
pub mod tick;
pub mod timers;

pub use autoplay::{Autoplayer, Plan, choose_plan};
pub use board::Board;
pub use connector::{Anchor, Connector, ConnectorPhase, Release, Segment};
pub use economy::Economy;
pub use resolve::{MatchOutcome, resolve_pair, resolve_path, resolve_tap, resolve_triangle};
pub use shape::{Shape, Triangle, classify, is_pair, is_triangle};
pub use state::{Banner, GameEvent, GamePhase, GameState, GemKind, Marker, MarkerId};
pub use tick::{PointerEvent, TickInput, tick};
pub use timers::{TimerId, TimerKind, Timers};
