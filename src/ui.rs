//! Presentation seam
//!
//! The simulation never touches a screen. It queues `GameEvent`s, and a
//! `Presenter` turns them into whatever the host shows: DOM screens on the
//! web, log lines natively.

use crate::sim::{GameEvent, GamePhase, GameState, Intent};

/// Consumes simulation events
pub trait Presenter {
    fn present(&mut self, event: &GameEvent, state: &GameState);
}

/// Drain queued events into a presenter. Returns how many were delivered.
pub fn dispatch(state: &mut GameState, presenter: &mut impl Presenter) -> usize {
    let events = state.drain_events();
    for event in &events {
        presenter.present(event, state);
    }
    events.len()
}

/// Which screen a phase shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Hud,
    GameOver,
    Final,
}

impl Screen {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Title => Screen::Title,
            GamePhase::Playing => Screen::Hud,
            GamePhase::GameOver => Screen::GameOver,
            GamePhase::FinalGameOver => Screen::Final,
        }
    }
}

/// HUD timer text
pub fn format_time(seconds: u32) -> String {
    format!("Time: {seconds}s")
}

/// One heart per life
pub fn hearts(lives: u8) -> String {
    "❤️".repeat(usize::from(lives))
}

/// Keyboard code (`KeyboardEvent.code`) to intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Intent::LaneLeft),
        "ArrowRight" | "KeyD" => Some(Intent::LaneRight),
        "ArrowUp" | "Space" | "KeyW" => Some(Intent::Jump),
        _ => None,
    }
}

/// Writes events to the `log` facade
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Events seen, for run summaries
    pub delivered: usize,
}

impl Presenter for LogPresenter {
    fn present(&mut self, event: &GameEvent, state: &GameState) {
        self.delivered += 1;
        match event {
            GameEvent::PhaseChanged { to, .. } => {
                log::info!("Screen: {:?}", Screen::for_phase(*to));
            }
            GameEvent::ScoreTick { seconds } => log::debug!("{}", format_time(*seconds)),
            GameEvent::LivesChanged { lives } => log::debug!("Lives: {}", lives),
            GameEvent::LifeLost {
                lives_remaining, ..
            } => {
                log::info!(
                    "Crashed at {}s, lives remaining: {}",
                    state.display_seconds(),
                    lives_remaining
                );
            }
            GameEvent::NewBestTime { seconds } => log::info!("New best time: {:.1}s", seconds),
            GameEvent::ObstacleSpawned { .. }
            | GameEvent::ObstacleRemoved { .. }
            | GameEvent::ObstacleDodged { .. } => log::trace!("{:?}", event),
        }
    }
}
