//! Lane Runner - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, jump arc, obstacles, collisions, lifecycle)
//! - `settings`: Data-driven game tuning
//! - `highscores`: Best survival times for the current session
//! - `ui`: Event presentation seam for HUD adapters
//! - `web`: WebAssembly facade driven by a JavaScript scene (wasm32 only)

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use settings::{PhysicsMode, Settings, SettingsError};

/// Reference tuning constants
///
/// Per-frame values (jump velocity, gravity, smoothing, obstacle speed) are
/// expressed for a 60 Hz frame.
pub mod consts {
    use glam::Vec3;

    /// Frame rate the per-frame tuning values are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Track layout
    pub const LANE_COUNT: usize = 3;
    pub const LANE_WIDTH: f32 = 3.0;

    /// Player box, centred at (lane offset, height, PLAYER_FORWARD)
    pub const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
    /// Player centre height when standing on the track
    pub const GROUND_HEIGHT: f32 = 1.0;
    pub const PLAYER_FORWARD: f32 = 0.0;

    /// Jump arc (units per frame, units per frame²)
    pub const JUMP_VELOCITY: f32 = 0.2;
    pub const GRAVITY: f32 = 0.015;
    /// Fraction of the remaining lateral distance covered each frame
    pub const LANE_SMOOTHING: f32 = 0.2;

    /// Obstacle travel (units per 60 Hz frame)
    pub const OBSTACLE_SPEED: f32 = 0.3;
    pub const SPAWN_Z: f32 = -80.0;
    /// Obstacles past this forward position are behind the camera
    pub const DESPAWN_Z: f32 = 10.0;
    pub const AERIAL_PROBABILITY: f32 = 0.4;

    /// Obstacle boxes and centre heights
    pub const GROUND_OBSTACLE_SIZE: Vec3 = Vec3::new(2.0, 1.5, 1.0);
    pub const GROUND_OBSTACLE_HEIGHT: f32 = 0.75;
    pub const AERIAL_OBSTACLE_SIZE: Vec3 = Vec3::new(2.0, 1.0, 1.0);
    pub const AERIAL_OBSTACLE_HEIGHT: f32 = 3.0;

    /// Difficulty ramp (milliseconds)
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 10.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 800.0;

    /// Player hitbox shrink per side on the lateral and forward axes
    pub const HITBOX_SHRINK: f32 = 0.2;

    pub const STARTING_LIVES: u8 = 3;

    /// Largest frame delta the clock hands out (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
