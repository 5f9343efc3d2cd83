//! Lane Runner entry point
//!
//! The web build is driven from JavaScript through `lane_runner::web`. The
//! native binary runs a headless demo session with the autopilot steering.
//!
//! Usage: `lane-runner [seed] [seconds]`
//! Set `LANE_RUNNER_SETTINGS` to a JSON file to override tuning.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::Settings;
    use lane_runner::sim::{GamePhase, GameState, TickInput, tick};
    use lane_runner::ui::{LogPresenter, dispatch};

    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let settings = match std::env::var("LANE_RUNNER_SETTINGS") {
        Ok(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        Err(_) => Settings::default(),
    };

    let mut state = match GameState::with_settings(seed, settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mut presenter = LogPresenter::default();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    const DT: f32 = 1.0 / 60.0;
    let total_frames = (seconds.max(0.0) / DT) as u64;

    state.start();
    for _ in 0..total_frames {
        tick(&mut state, &input, DT);
        dispatch(&mut state, &mut presenter);

        match state.phase {
            GamePhase::Playing => {}
            GamePhase::GameOver => {
                state.continue_run();
            }
            GamePhase::FinalGameOver | GamePhase::Title => break,
        }
    }
    dispatch(&mut state, &mut presenter);

    println!("\nSeed {:#x}: {} runs, phase {:?}", state.seed, state.runs, state.phase);
    println!(
        "Current run: {:.1}s over {} frames, {} dodged, {} lives",
        state.score, state.frames, state.dodged, state.lives
    );
    if state.best_times.is_empty() {
        println!("  No run ended");
    }
    for (rank, entry) in state.best_times.entries.iter().enumerate() {
        println!(
            "  #{:<2} run {:<2} {:>6.1}s  {} dodged",
            rank + 1,
            entry.run,
            entry.seconds,
            entry.dodged
        );
    }
    log::info!("{} events delivered", presenter.delivered);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_runner::web::wasm_start, this is just to satisfy the compiler
}
