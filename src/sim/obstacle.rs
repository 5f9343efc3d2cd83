//! Obstacle registry and spawn ramp

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::lane::{Lane, Lanes};
use crate::settings::Settings;

/// Vertical class of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the track
    Ground,
    /// Floats above the track
    Aerial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub kind: ObstacleKind,
    /// Forward position; grows as the obstacle approaches and passes the player
    pub z: f32,
    /// Fully behind the player
    pub passed: bool,
}

impl Obstacle {
    pub fn size(&self, settings: &Settings) -> Vec3 {
        match self.kind {
            ObstacleKind::Ground => settings.ground_obstacle_size,
            ObstacleKind::Aerial => settings.aerial_obstacle_size,
        }
    }

    /// World-space centre of the obstacle box
    pub fn position(&self, lanes: &Lanes, settings: &Settings) -> Vec3 {
        let height = match self.kind {
            ObstacleKind::Ground => settings.ground_obstacle_height,
            ObstacleKind::Aerial => settings.aerial_obstacle_height,
        };
        Vec3::new(lanes.offset(self.lane), height, self.z)
    }

    pub fn bounds(&self, lanes: &Lanes, settings: &Settings) -> Aabb {
        Aabb::from_center_size(self.position(lanes, settings), self.size(settings))
    }
}

/// What one `advance` call changed
#[derive(Debug, Clone, Default)]
pub struct AdvanceReport {
    /// Obstacles that moved fully behind the player this frame
    pub passed: Vec<u32>,
    /// Obstacles removed behind the camera
    pub pruned: Vec<Obstacle>,
}

/// Live obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn at the far end of the track in a random lane
    pub fn spawn(&mut self, rng: &mut impl Rng, settings: &Settings) -> &Obstacle {
        let lane = rng.random_range(0..settings.lane_count.max(1));
        let probability = match f64::from(settings.aerial_probability) {
            p if p.is_nan() => 0.0,
            p => p.clamp(0.0, 1.0),
        };
        let kind = if rng.random_bool(probability) {
            ObstacleKind::Aerial
        } else {
            ObstacleKind::Ground
        };
        self.spawn_at(lane, kind, settings.spawn_z)
    }

    /// Spawn a specific obstacle
    pub fn spawn_at(&mut self, lane: Lane, kind: ObstacleKind, z: f32) -> &Obstacle {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.obstacles.push(Obstacle {
            id,
            lane,
            kind,
            z,
            passed: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Move every obstacle toward the camera, flag those now behind
    /// `player_back_z` and drop those past the despawn line
    pub fn advance(&mut self, settings: &Settings, dt: f32, player_back_z: f32) -> AdvanceReport {
        let travel = settings.obstacle_travel(dt);
        let mut report = AdvanceReport::default();

        for obstacle in &mut self.obstacles {
            obstacle.z += travel;
            let half_depth = obstacle.size(settings).z * 0.5;
            if !obstacle.passed && obstacle.z - half_depth > player_back_z {
                obstacle.passed = true;
                report.passed.push(obstacle.id);
            }
        }

        let despawn_z = settings.despawn_z;
        report.pruned = self
            .obstacles
            .extract_if(.., |o| o.z > despawn_z)
            .collect();

        report
    }

    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }

    /// Remove every obstacle, returning them in spawn order
    pub fn clear(&mut self) -> Vec<Obstacle> {
        std::mem::take(&mut self.obstacles)
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

/// Spawn cadence with a linear difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Current gap between spawns (ms)
    pub interval_ms: f32,
    /// Time since the last spawn (ms)
    pub elapsed_ms: f32,
}

impl SpawnTimer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            interval_ms: settings.spawn_interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Clear the accumulator and restore the starting interval
    pub fn reset(&mut self, settings: &Settings) {
        *self = Self::new(settings);
    }

    /// Accumulate `dt` seconds; true when a spawn is due. A due spawn resets
    /// the accumulator and tightens the interval by one step, down to the floor.
    pub fn tick(&mut self, dt: f32, settings: &Settings) -> bool {
        self.elapsed_ms += dt * 1000.0;
        if self.elapsed_ms <= self.interval_ms {
            return false;
        }

        self.elapsed_ms = 0.0;
        if self.interval_ms > settings.spawn_interval_floor_ms {
            self.interval_ms = (self.interval_ms - settings.spawn_interval_step_ms)
                .max(settings.spawn_interval_floor_ms);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_spawn_uses_far_position_and_valid_lane() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut registry = ObstacleRegistry::new();
        for _ in 0..200 {
            let obstacle = registry.spawn(&mut rng, &settings);
            assert!(obstacle.lane < settings.lane_count);
            assert_eq!(obstacle.z, settings.spawn_z);
            assert!(!obstacle.passed);
        }
        assert_eq!(registry.len(), 200);
    }

    #[test]
    fn test_spawn_mix_favours_ground() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut registry = ObstacleRegistry::new();
        for _ in 0..2000 {
            registry.spawn(&mut rng, &settings);
        }
        let aerial = registry
            .iter()
            .filter(|o| o.kind == ObstacleKind::Aerial)
            .count();
        assert!((650..950).contains(&aerial), "aerial count {aerial}");
        for lane in 0..settings.lane_count {
            let in_lane = registry.iter().filter(|o| o.lane == lane).count();
            assert!(in_lane > 500, "lane {lane} got {in_lane}");
        }
    }

    #[test]
    fn test_spawn_clamps_out_of_range_probability() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut registry = ObstacleRegistry::new();
        let always = Settings {
            aerial_probability: 1.5,
            ..Settings::default()
        };
        let never = Settings {
            aerial_probability: f32::NAN,
            ..Settings::default()
        };
        for _ in 0..50 {
            assert_eq!(registry.spawn(&mut rng, &always).kind, ObstacleKind::Aerial);
            assert_eq!(registry.spawn(&mut rng, &never).kind, ObstacleKind::Ground);
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut registry = ObstacleRegistry::new();
        let a = registry.spawn_at(0, ObstacleKind::Ground, 0.0).id;
        let b = registry.spawn_at(1, ObstacleKind::Aerial, 0.0).id;
        registry.clear();
        let c = registry.spawn_at(2, ObstacleKind::Ground, 0.0).id;
        assert!(a < b && b < c);
    }

    #[test]
    fn test_obstacle_geometry() {
        let settings = Settings::default();
        let lanes = settings.lanes();
        let mut registry = ObstacleRegistry::new();
        let ground = registry.spawn_at(0, ObstacleKind::Ground, -10.0).clone();
        let aerial = registry.spawn_at(2, ObstacleKind::Aerial, -10.0).clone();

        assert_eq!(ground.position(&lanes, &settings), Vec3::new(-3.0, 0.75, -10.0));
        assert_eq!(aerial.position(&lanes, &settings), Vec3::new(3.0, 3.0, -10.0));
        let bounds = aerial.bounds(&lanes, &settings);
        assert_eq!(bounds.min.y, 2.5);
        assert_eq!(bounds.max.y, 3.5);
    }

    #[test]
    fn test_obstacles_pruned_past_camera() {
        let settings = Settings::default();
        let mut registry = ObstacleRegistry::new();
        let id = registry.spawn_at(1, ObstacleKind::Ground, settings.spawn_z).id;

        let mut last_z = settings.spawn_z;
        let mut frames = 0;
        loop {
            let report = registry.advance(&settings, DT, 0.5);
            frames += 1;
            if let Some(removed) = report.pruned.first() {
                assert_eq!(removed.id, id);
                assert!(removed.z > settings.despawn_z);
                assert!(last_z <= settings.despawn_z);
                break;
            }
            let z = registry.get(id).map(|o| o.z).unwrap_or(f32::NAN);
            assert!(z > last_z, "forward position must increase");
            last_z = z;
            assert!(frames < 400, "obstacle never pruned");
        }
        // 90 units at 0.3 per frame
        assert!((299..=302).contains(&frames), "pruned after {frames} frames");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune_keeps_survivors_in_spawn_order() {
        let settings = Settings::default();
        let mut registry = ObstacleRegistry::new();
        let gone_a = registry.spawn_at(0, ObstacleKind::Ground, 9.9).id;
        let kept_a = registry.spawn_at(1, ObstacleKind::Ground, -5.0).id;
        let gone_b = registry.spawn_at(2, ObstacleKind::Aerial, 9.95).id;
        let kept_b = registry.spawn_at(0, ObstacleKind::Aerial, -20.0).id;

        let report = registry.advance(&settings, DT, 0.5);
        let pruned: Vec<u32> = report.pruned.iter().map(|o| o.id).collect();
        assert_eq!(pruned, vec![gone_a, gone_b]);
        let kept: Vec<u32> = registry.iter().map(|o| o.id).collect();
        assert_eq!(kept, vec![kept_a, kept_b]);
    }

    #[test]
    fn test_passed_flag_set_once() {
        let settings = Settings::default();
        let mut registry = ObstacleRegistry::new();
        let id = registry.spawn_at(1, ObstacleKind::Ground, -1.0).id;

        let report = registry.advance(&settings, DT, 0.5);
        assert!(report.passed.is_empty());

        let mut passed_reports = 0;
        for _ in 0..20 {
            let report = registry.advance(&settings, DT, 0.5);
            passed_reports += report.passed.iter().filter(|p| **p == id).count();
        }
        assert_eq!(passed_reports, 1);
        assert!(registry.get(id).is_some_and(|o| o.passed));
    }

    #[test]
    fn test_spawn_timer_fires_after_interval() {
        let settings = Settings::default();
        let mut timer = SpawnTimer::new(&settings);
        assert!(!timer.tick(1.0, &settings));
        assert!(!timer.tick(0.5, &settings)); // exactly 1500ms does not exceed
        assert!(timer.tick(0.001, &settings));
        assert_eq!(timer.elapsed_ms, 0.0);
        assert_eq!(timer.interval_ms, 1490.0);
    }

    #[test]
    fn test_spawn_timer_reaches_floor() {
        let settings = Settings::default();
        let mut timer = SpawnTimer::new(&settings);
        let mut spawns = 0;
        while timer.interval_ms > settings.spawn_interval_floor_ms {
            assert!(timer.tick(2.0, &settings));
            spawns += 1;
        }
        assert_eq!(spawns, 70);
        for _ in 0..50 {
            timer.tick(2.0, &settings);
        }
        assert_eq!(timer.interval_ms, settings.spawn_interval_floor_ms);
    }

    proptest! {
        #[test]
        fn spawn_interval_never_below_floor(
            start in 100.0f32..3000.0,
            step in 0.0f32..400.0,
            floor_frac in 0.0f32..1.0,
            dts in proptest::collection::vec(0.0f32..4.0, 1..200),
        ) {
            let settings = Settings {
                spawn_interval_ms: start,
                spawn_interval_step_ms: step,
                spawn_interval_floor_ms: start * floor_frac,
                ..Settings::default()
            };
            let mut timer = SpawnTimer::new(&settings);
            let mut previous = timer.interval_ms;
            for dt in dts {
                timer.tick(dt, &settings);
                prop_assert!(timer.interval_ms >= settings.spawn_interval_floor_ms);
                prop_assert!(timer.interval_ms <= previous);
                previous = timer.interval_ms;
            }
        }
    }
}
