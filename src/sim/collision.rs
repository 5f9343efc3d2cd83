//! Axis-aligned box collision between the player and obstacles
//!
//! The player box is shrunk on the lateral (x) and forward (z) axes so that
//! grazing an obstacle's edge does not cost a life. Obstacle boxes are used
//! as-is. Boxes that merely touch count as overlapping.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::Player;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Pull the lateral and forward faces in by `margin` on each side
    pub fn shrink_xz(self, margin: f32) -> Self {
        let inset = Vec3::new(margin, 0.0, margin);
        Self {
            min: self.min + inset,
            max: self.max - inset,
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// The player's collision box for the current pose
pub fn player_hitbox(player: &Player, settings: &Settings) -> Aabb {
    Aabb::from_center_size(player.position(settings.player_forward), settings.player_size)
        .shrink_xz(settings.hitbox_shrink)
}

/// First obstacle, in registry order, overlapping the player
///
/// At most one obstacle is reported per call; others that overlap in the
/// same frame stay live and are found on a later call.
pub fn detect<'a>(
    player: &Player,
    obstacles: &'a [Obstacle],
    settings: &Settings,
) -> Option<&'a Obstacle> {
    let hitbox = player_hitbox(player, settings);
    let lanes = settings.lanes();
    obstacles
        .iter()
        .find(|obstacle| hitbox.intersects(&obstacle.bounds(&lanes, settings)))
}
