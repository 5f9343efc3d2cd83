//! Game session state and lifecycle transitions
//!
//! `GameState` is the single owner of everything a run mutates: lives, score,
//! player pose, obstacles, spawn cadence and the RNG. Hosts construct one per
//! session and drive it through `tick` plus the transition methods here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::lane::{Lane, LaneShift};
use super::obstacle::{Obstacle, ObstacleKind, ObstacleRegistry, SpawnTimer};
use super::player::Player;
use crate::highscores::HighScores;
use crate::settings::{Settings, SettingsError};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Title,
    /// Active run
    Playing,
    /// Hit an obstacle with lives to spare
    GameOver,
    /// Out of lives
    FinalGameOver,
}

/// Discrete player intent, delivered once per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    LaneLeft,
    LaneRight,
    Jump,
}

/// Why an obstacle left the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Travelled past the camera
    PassedCamera,
    /// Consumed by a collision with the player
    Collided,
    /// Registry reset on a lifecycle transition
    Cleared,
}

/// Notifications for the render and HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Whole seconds survived changed (HUD shows integer seconds)
    ScoreTick { seconds: u32 },
    LivesChanged { lives: u8 },
    /// A collision cost a life
    LifeLost { lives_remaining: u8, obstacle: u32 },
    ObstacleSpawned { id: u32, lane: Lane, kind: ObstacleKind },
    ObstacleRemoved { id: u32, reason: RemovalReason },
    ObstacleDodged { id: u32, total: u32 },
    /// The run that just ended topped the session leaderboard
    NewBestTime { seconds: f32 },
}

/// Obstacle pose for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub size: Vec3,
}

/// Post-update world state for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: f32,
    pub lives: u8,
    pub player: Vec3,
    pub player_size: Vec3,
    pub obstacles: Vec<ObstacleView>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning, fixed for the session
    pub settings: Settings,
    /// Seed of the session RNG
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u8,
    /// Seconds survived in the current run
    pub score: f32,
    /// Obstacles that got past the player this run
    pub dodged: u32,
    /// Updates simulated this run
    pub frames: u64,
    /// Runs started this session
    pub runs: u32,
    pub player: Player,
    pub obstacles: ObstacleRegistry,
    pub spawn_timer: SpawnTimer,
    pub clock: FrameClock,
    pub best_times: HighScores,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Settings::default())
    }

    /// Create a session with custom tuning, rejecting values the simulation
    /// cannot run with
    pub fn with_settings(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(seed, settings))
    }

    fn build(seed: u64, settings: Settings) -> Self {
        log::debug!("Session seed {:#x}, {} physics", seed, settings.physics.as_str());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            lives: settings.starting_lives,
            score: 0.0,
            dodged: 0,
            frames: 0,
            runs: 0,
            player: Player::new(&settings),
            obstacles: ObstacleRegistry::new(),
            spawn_timer: SpawnTimer::new(&settings),
            clock: FrameClock::new(settings.max_frame_dt),
            best_times: HighScores::new(),
            events: Vec::new(),
            settings,
        }
    }

    /// Title -> Playing with a full set of lives
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Title {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.begin_run(self.settings.starting_lives);
        true
    }

    /// GameOver -> Playing, reset exactly as `start`
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        self.begin_run(self.settings.starting_lives);
        true
    }

    /// GameOver -> Playing, keeping the lives that remain
    pub fn continue_run(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring continue in {:?}", self.phase);
            return false;
        }
        self.begin_run(self.lives);
        true
    }

    /// Back to the title screen from a run or either game-over screen
    pub fn return_to_title(&mut self) -> bool {
        if self.phase == GamePhase::Title {
            return false;
        }
        self.clear_obstacles();
        self.player = Player::new(&self.settings);
        // Zero lives only ever means FinalGameOver
        if self.lives == 0 {
            self.lives = self.settings.starting_lives;
            self.emit(GameEvent::LivesChanged { lives: self.lives });
        }
        self.set_phase(GamePhase::Title);
        true
    }

    /// Apply a player intent. Only honoured while playing.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        match intent {
            Intent::LaneLeft => self
                .player
                .request_lane_change(&self.settings.lanes(), LaneShift::Left),
            Intent::LaneRight => self
                .player
                .request_lane_change(&self.settings.lanes(), LaneShift::Right),
            Intent::Jump => self.player.request_jump(self.settings.jump_velocity),
        }
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whole seconds survived, as shown on the HUD
    pub fn display_seconds(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let lanes = self.settings.lanes();
        RenderSnapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            player: self.player.position(self.settings.player_forward),
            player_size: self.settings.player_size,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    position: o.position(&lanes, &self.settings),
                    size: o.size(&self.settings),
                })
                .collect(),
        }
    }

    /// Spawn a random obstacle at the far end of the track
    pub(crate) fn spawn_obstacle(&mut self) {
        let obstacle = self.obstacles.spawn(&mut self.rng, &self.settings);
        let (id, lane, kind) = (obstacle.id, obstacle.lane, obstacle.kind);
        log::debug!("Spawned {:?} obstacle {} in lane {}", kind, id, lane);
        self.emit(GameEvent::ObstacleSpawned { id, lane, kind });
    }

    /// Place a specific obstacle, bypassing the spawn timer
    pub fn force_spawn(&mut self, lane: Lane, kind: ObstacleKind, z: f32) -> u32 {
        let id = self.obstacles.spawn_at(lane, kind, z).id;
        self.emit(GameEvent::ObstacleSpawned { id, lane, kind });
        id
    }

    /// Consume the obstacle, take a life and leave the run
    pub(crate) fn handle_collision(&mut self, id: u32) {
        if self.obstacles.remove(id).is_none() {
            return;
        }
        self.emit(GameEvent::ObstacleRemoved {
            id,
            reason: RemovalReason::Collided,
        });

        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        self.emit(GameEvent::LifeLost {
            lives_remaining: self.lives,
            obstacle: id,
        });
        log::info!(
            "Hit obstacle {} after {:.1}s, {} lives left",
            id,
            self.score,
            self.lives
        );

        if let Some(rank) = self.best_times.add_score(self.score, self.dodged, self.runs) {
            log::info!("Run {} placed #{} ({:.1}s)", self.runs, rank, self.score);
            if rank == 1 {
                self.emit(GameEvent::NewBestTime {
                    seconds: self.score,
                });
            }
        }

        if self.lives == 0 {
            self.set_phase(GamePhase::FinalGameOver);
        } else {
            self.set_phase(GamePhase::GameOver);
        }
    }

    pub(crate) fn record_dodge(&mut self, id: u32) {
        self.dodged += 1;
        self.emit(GameEvent::ObstacleDodged {
            id,
            total: self.dodged,
        });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn begin_run(&mut self, lives: u8) {
        self.clear_obstacles();
        self.lives = lives;
        self.score = 0.0;
        self.dodged = 0;
        self.frames = 0;
        self.runs += 1;
        self.player = Player::new(&self.settings);
        self.spawn_timer.reset(&self.settings);
        self.clock.restart();

        log::info!("Run {} started with {} lives", self.runs, self.lives);
        self.set_phase(GamePhase::Playing);
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        self.emit(GameEvent::ScoreTick { seconds: 0 });
    }

    fn clear_obstacles(&mut self) {
        let cleared: Vec<Obstacle> = self.obstacles.clear();
        for obstacle in cleared {
            self.emit(GameEvent::ObstacleRemoved {
                id: obstacle.id,
                reason: RemovalReason::Cleared,
            });
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.emit(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_title() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_with_settings_rejects_unplayable_tuning() {
        let bad_probability = Settings {
            aerial_probability: 1.5,
            ..Settings::default()
        };
        assert!(matches!(
            GameState::with_settings(1, bad_probability),
            Err(SettingsError::AerialProbability { .. })
        ));

        let no_gravity = Settings {
            gravity: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            GameState::with_settings(1, no_gravity),
            Err(SettingsError::Gravity { .. })
        ));

        let custom = Settings {
            lane_count: 5,
            ..Settings::default()
        };
        let state = GameState::with_settings(9, custom).expect("valid settings");
        assert_eq!(state.seed, 9);
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(1);
        state.score = 42.0;
        state.force_spawn(0, ObstacleKind::Ground, -20.0);
        state.player.height = 2.0;

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.height, state.settings.ground_height);
        assert_eq!(state.spawn_timer.elapsed_ms, 0.0);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Title,
            to: GamePhase::Playing
        }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::ObstacleRemoved {
                reason: RemovalReason::Cleared,
                ..
            }
        )));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_transitions_only_from_valid_phases() {
        let mut state = GameState::new(1);
        assert!(!state.restart());
        assert!(!state.continue_run());
        assert!(!state.return_to_title());
        assert!(state.start());
        assert!(!state.start());
        assert!(!state.restart());
    }

    #[test]
    fn test_collision_with_lives_to_spare() {
        let mut state = GameState::new(1);
        state.start();
        state.lives = 2;
        let id = state.force_spawn(1, ObstacleKind::Ground, 0.0);
        state.drain_events();

        state.handle_collision(id);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 1);
        assert!(state.obstacles.get(id).is_none());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LifeLost {
            lives_remaining: 1,
            obstacle: id
        }));
        assert!(events.contains(&GameEvent::ObstacleRemoved {
            id,
            reason: RemovalReason::Collided
        }));
    }

    #[test]
    fn test_collision_on_last_life() {
        let mut state = GameState::new(1);
        state.start();
        state.lives = 1;
        let id = state.force_spawn(1, ObstacleKind::Ground, 0.0);
        state.handle_collision(id);
        assert_eq!(state.phase, GamePhase::FinalGameOver);
        assert_eq!(state.lives, 0);
        assert!(!state.restart());
        assert!(!state.continue_run());
        assert!(state.return_to_title());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_restart_refills_lives_continue_keeps_them() {
        let mut state = GameState::new(1);
        state.start();
        let id = state.force_spawn(1, ObstacleKind::Ground, 0.0);
        state.handle_collision(id);
        assert_eq!(state.lives, 2);

        assert!(state.continue_run());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0.0);

        let id = state.force_spawn(1, ObstacleKind::Ground, 0.0);
        state.handle_collision(id);
        assert!(state.restart());
        assert_eq!(state.lives, 3);
        assert_eq!(state.runs, 3);
    }

    #[test]
    fn test_best_time_recorded_when_run_ends() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 12.5;
        let id = state.force_spawn(1, ObstacleKind::Ground, 0.0);
        state.handle_collision(id);
        assert_eq!(state.best_times.best(), Some(12.5));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::NewBestTime { seconds: 12.5 })
        );
    }

    #[test]
    fn test_intents_ignored_outside_play() {
        let mut state = GameState::new(1);
        assert!(!state.apply_intent(Intent::Jump));
        assert!(!state.apply_intent(Intent::LaneLeft));
        state.start();
        assert!(state.apply_intent(Intent::LaneLeft));
        assert!(!state.apply_intent(Intent::LaneLeft));
        assert!(state.apply_intent(Intent::Jump));
        assert!(!state.apply_intent(Intent::Jump));
        assert_eq!(state.player.lane, 0);
    }

    #[test]
    fn test_snapshot_reflects_world() {
        let mut state = GameState::new(1);
        state.start();
        let id = state.force_spawn(2, ObstacleKind::Aerial, -30.0);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.player, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.obstacles[0].id, id);
        assert_eq!(snapshot.obstacles[0].position, Vec3::new(3.0, 3.0, -30.0));
    }
}
