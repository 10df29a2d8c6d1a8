//! Gemlink demo entry point
//!
//! Usage: `gemlink [tuning.json] [seed]`
//!
//! Autoplays a seeded game through the same `tick` API a real host uses and
//! prints every outbound event as a JSON line on stdout.

#[cfg(not(target_arch = "wasm32"))]
use gemlink::sim::{Autoplayer, Banner, GameEvent, GameState, tick};
#[cfg(not(target_arch = "wasm32"))]
use gemlink::tuning::Tuning;

/// Safety cap: ten minutes of 60 Hz frames
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 36_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (tuning_path, seed_arg) = match (args.next(), args.next()) {
        // A lone numeric argument is a seed
        (Some(first), None) if first.parse::<u64>().is_ok() => (None, Some(first)),
        (first, second) => (first, second),
    };

    let tuning = match tuning_path {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = match seed_arg.as_deref().map(str::parse::<u64>) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(1);
        }
        None => 0x6765_6d6c_696e_6b,
    };

    log::info!("Gemlink demo starting with seed: {}", seed);
    let mut state = GameState::new(seed, tuning);
    let mut player = Autoplayer::default();

    for frame in 0..MAX_FRAMES {
        let (input, dt) = player.next_frame(&state);
        tick(&mut state, &input, dt);

        let mut finished = false;
        for event in state.drain_events() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("Failed to serialize {:?}: {}", event, e),
            }
            if event == (GameEvent::BannerShown { banner: Banner::GameOver }) {
                finished = true;
            }
        }
        if finished {
            log::info!(
                "Game over after {} frames: round {}, score {}",
                frame + 1,
                state.economy.round,
                state.economy.score
            );
            return;
        }
    }
    log::warn!("Stopped at frame cap ({} frames)", MAX_FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
