//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order == horizontal order)
//! - No rendering, audio, storage or platform dependencies

pub mod cheat;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;
pub mod timers;

pub use cheat::CheatCode;
pub use collision::{Aabb, HitCause, detect_hits, detect_passes};
pub use state::{
    Bird, GameEvent, GamePhase, Obstacle, ObstacleView, Playfield, SimulationState, Snapshot,
};
pub use tick::{TickInput, tick};
pub use timers::{TimerKind, Timers};
