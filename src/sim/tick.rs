//! Per-frame update
//!
//! Advances a playing session by one rendered frame.

use super::autopilot;
use super::collision::detect;
use super::state::{GameEvent, GamePhase, GameState, Intent, RemovalReason};

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Edge-triggered intents in arrival order
    pub intents: Vec<Intent>,
    /// Demo mode - the autopilot steers
    pub autopilot: bool,
}

impl TickInput {
    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Drop one-shot intents after a frame has consumed them
    pub fn clear(&mut self) {
        self.intents.clear();
    }
}

/// Advance the session by `dt` seconds. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = dt.max(0.0);

    for &intent in &input.intents {
        state.apply_intent(intent);
    }
    if input.autopilot {
        if let Some(intent) = autopilot::steer(state) {
            state.apply_intent(intent);
        }
    }

    state.frames += 1;

    // Score is time survived
    let shown = state.display_seconds();
    state.score += dt;
    let seconds = state.display_seconds();
    if seconds != shown {
        state.emit(GameEvent::ScoreTick { seconds });
    }

    state.player.advance(&state.settings, dt);

    if state.spawn_timer.tick(dt, &state.settings) {
        state.spawn_obstacle();
    }

    let player_back_z = state.settings.player_forward + state.settings.player_size.z * 0.5;
    let report = state.obstacles.advance(&state.settings, dt, player_back_z);
    for id in report.passed {
        state.record_dodge(id);
    }
    for obstacle in report.pruned {
        state.emit(GameEvent::ObstacleRemoved {
            id: obstacle.id,
            reason: RemovalReason::PassedCamera,
        });
    }

    let hit = detect(&state.player, state.obstacles.as_slice(), &state.settings).map(|o| o.id);
    if let Some(id) = hit {
        state.handle_collision(id);
    }
}
