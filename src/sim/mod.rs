//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives as a frame delta from the host
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Aabb, detect, player_hitbox};
pub use lane::{Lane, LaneShift, Lanes};
pub use obstacle::{AdvanceReport, Obstacle, ObstacleKind, ObstacleRegistry, SpawnTimer};
pub use player::{JumpState, Player};
pub use state::{
    GameEvent, GamePhase, GameState, Intent, ObstacleView, RemovalReason, RenderSnapshot,
};
pub use tick::{TickInput, tick};
