//! Player kinematics: lane slide and jump arc

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::{Lane, LaneShift, Lanes};
use crate::settings::Settings;

/// Vertical state of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpState {
    Grounded,
    /// In the air, launched from the given centre height
    Airborne { launch_height: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lane the player is steering toward
    pub lane: Lane,
    pub lateral: f32,
    pub target_lateral: f32,
    /// Centre height of the player box
    pub height: f32,
    pub vertical_vel: f32,
    pub jump: JumpState,
}

impl Player {
    /// A grounded player in the centre lane
    pub fn new(settings: &Settings) -> Self {
        let lanes = settings.lanes();
        let lane = lanes.center();
        let lateral = lanes.offset(lane);
        Self {
            lane,
            lateral,
            target_lateral: lateral,
            height: settings.ground_height,
            vertical_vel: 0.0,
            jump: JumpState::Grounded,
        }
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.jump, JumpState::Airborne { .. })
    }

    /// World-space centre of the player box
    pub fn position(&self, forward: f32) -> Vec3 {
        Vec3::new(self.lateral, self.height, forward)
    }

    /// Retarget the lane slide. Returns false at a track edge.
    pub fn request_lane_change(&mut self, lanes: &Lanes, shift: LaneShift) -> bool {
        let next = lanes.try_shift(self.lane, shift);
        if next == self.lane {
            return false;
        }
        self.lane = next;
        self.target_lateral = lanes.offset(next);
        true
    }

    /// Start a jump. Ignored while airborne.
    pub fn request_jump(&mut self, jump_velocity: f32) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.jump = JumpState::Airborne {
            launch_height: self.height,
        };
        self.vertical_vel = jump_velocity;
        true
    }

    /// Move toward the target lane by `factor` of the remaining distance per step
    pub fn smooth_lateral(&mut self, factor: f32, steps: f32) {
        let blend = if steps == 1.0 {
            factor
        } else {
            1.0 - (1.0 - factor).powf(steps)
        };
        self.lateral += (self.target_lateral - self.lateral) * blend;
    }

    /// Integrate the jump arc (explicit Euler, one step per reference frame)
    pub fn integrate_jump(&mut self, gravity: f32, ground_height: f32, steps: f32) {
        if !self.is_jumping() {
            return;
        }

        self.height += self.vertical_vel * steps;
        self.vertical_vel -= gravity * steps;

        if self.height <= ground_height {
            self.height = ground_height;
            // A zero-length step at launch leaves the player on the ground but rising
            if self.vertical_vel <= 0.0 {
                self.vertical_vel = 0.0;
                self.jump = JumpState::Grounded;
            }
        }
    }

    /// Lane slide then jump arc for one update
    pub fn advance(&mut self, settings: &Settings, dt: f32) {
        let steps = settings.kinematic_steps(dt);
        self.smooth_lateral(settings.lane_smoothing, steps);
        self.integrate_jump(settings.gravity, settings.ground_height, steps);
    }
}
