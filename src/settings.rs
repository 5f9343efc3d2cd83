//! Game tuning
//!
//! Every value the simulation reads lives here. Settings are fixed once a
//! run is constructed; difficulty that changes during a run is session state.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Lanes;

/// How per-frame physics values relate to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhysicsMode {
    /// Jump arc and lane slide advance one step per update, whatever the frame
    /// rate. Obstacles still move by `60 * dt`.
    #[default]
    FrameLocked,
    /// Jump arc and lane slide are scaled by `60 * dt` as well
    RealTime,
}

impl PhysicsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsMode::FrameLocked => "FrameLocked",
            PhysicsMode::RealTime => "RealTime",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "framelocked" | "frame_locked" | "frame" => Some(PhysicsMode::FrameLocked),
            "realtime" | "real_time" | "real" => Some(PhysicsMode::RealTime),
            _ => None,
        }
    }
}

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("lane_count must be at least 1")]
    NoLanes,

    #[error("lane_width must be positive, got {width}")]
    LaneWidth { width: f32 },

    #[error("spawn interval floor {floor_ms}ms is above the starting interval {start_ms}ms")]
    SpawnFloorAboveStart { floor_ms: f32, start_ms: f32 },

    #[error("spawn intervals must be non-negative, got {interval_ms}ms")]
    SpawnInterval { interval_ms: f32 },

    #[error("aerial_probability must be within 0..=1, got {probability}")]
    AerialProbability { probability: f32 },

    #[error("lane_smoothing must be within (0, 1], got {factor}")]
    Smoothing { factor: f32 },

    #[error("jump_velocity must be positive, got {velocity}")]
    JumpVelocity { velocity: f32 },

    #[error("gravity must be positive, got {gravity}")]
    Gravity { gravity: f32 },

    #[error("starting_lives must be at least 1")]
    NoLives,
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Track ===
    pub lane_count: usize,
    pub lane_width: f32,

    // === Player ===
    pub player_size: Vec3,
    /// Player centre height when grounded
    pub ground_height: f32,
    /// Forward position of the player's centre (fixed, the world moves)
    pub player_forward: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub lane_smoothing: f32,
    /// Per-side shrink of the player hitbox on the lateral and forward axes
    pub hitbox_shrink: f32,
    pub starting_lives: u8,

    // === Obstacles ===
    /// Units per 60 Hz frame
    pub obstacle_speed: f32,
    pub spawn_z: f32,
    pub despawn_z: f32,
    pub aerial_probability: f32,
    pub ground_obstacle_size: Vec3,
    pub ground_obstacle_height: f32,
    pub aerial_obstacle_size: Vec3,
    pub aerial_obstacle_height: f32,

    // === Difficulty ramp ===
    pub spawn_interval_ms: f32,
    pub spawn_interval_step_ms: f32,
    pub spawn_interval_floor_ms: f32,

    // === Timing ===
    pub physics: PhysicsMode,
    /// Clamp applied by the frame clock (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            lane_width: LANE_WIDTH,

            player_size: PLAYER_SIZE,
            ground_height: GROUND_HEIGHT,
            player_forward: PLAYER_FORWARD,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            lane_smoothing: LANE_SMOOTHING,
            hitbox_shrink: HITBOX_SHRINK,
            starting_lives: STARTING_LIVES,

            obstacle_speed: OBSTACLE_SPEED,
            spawn_z: SPAWN_Z,
            despawn_z: DESPAWN_Z,
            aerial_probability: AERIAL_PROBABILITY,
            ground_obstacle_size: GROUND_OBSTACLE_SIZE,
            ground_obstacle_height: GROUND_OBSTACLE_HEIGHT,
            aerial_obstacle_size: AERIAL_OBSTACLE_SIZE,
            aerial_obstacle_height: AERIAL_OBSTACLE_HEIGHT,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,

            physics: PhysicsMode::FrameLocked,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.lane_count == 0 {
            return Err(SettingsError::NoLanes);
        }
        if self.lane_width <= 0.0 || !self.lane_width.is_finite() {
            return Err(SettingsError::LaneWidth {
                width: self.lane_width,
            });
        }
        for interval_ms in [
            self.spawn_interval_ms,
            self.spawn_interval_step_ms,
            self.spawn_interval_floor_ms,
        ] {
            if interval_ms < 0.0 || !interval_ms.is_finite() {
                return Err(SettingsError::SpawnInterval { interval_ms });
            }
        }
        if self.spawn_interval_floor_ms > self.spawn_interval_ms {
            return Err(SettingsError::SpawnFloorAboveStart {
                floor_ms: self.spawn_interval_floor_ms,
                start_ms: self.spawn_interval_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.aerial_probability) {
            return Err(SettingsError::AerialProbability {
                probability: self.aerial_probability,
            });
        }
        if self.lane_smoothing <= 0.0 || self.lane_smoothing > 1.0 {
            return Err(SettingsError::Smoothing {
                factor: self.lane_smoothing,
            });
        }
        if self.jump_velocity <= 0.0 || !self.jump_velocity.is_finite() {
            return Err(SettingsError::JumpVelocity {
                velocity: self.jump_velocity,
            });
        }
        // Without a positive pull the jump arc never comes back down
        if self.gravity <= 0.0 || !self.gravity.is_finite() {
            return Err(SettingsError::Gravity {
                gravity: self.gravity,
            });
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        Ok(())
    }

    /// Lane table for this track
    pub fn lanes(&self) -> Lanes {
        Lanes::new(self.lane_count, self.lane_width)
    }

    /// Number of reference frames `dt` covers for the jump arc and lane slide
    pub fn kinematic_steps(&self, dt: f32) -> f32 {
        match self.physics {
            PhysicsMode::FrameLocked => 1.0,
            PhysicsMode::RealTime => REFERENCE_FPS * dt,
        }
    }

    /// Forward distance an obstacle covers in `dt` seconds
    pub fn obstacle_travel(&self, dt: f32) -> f32 {
        self.obstacle_speed * (REFERENCE_FPS * dt)
    }
}
