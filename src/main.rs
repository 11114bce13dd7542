//! Lion Splash entry point
//!
//! The playable game runs in the browser (see `wasm.rs`). Natively this
//! runs a headless demo: the autopilot plays one level and the outcome is
//! logged and recorded in the run statistics.
//!
//! Usage: `lion-splash [seed] [max_frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lion_splash::game::autopilot;
    use lion_splash::platform::{FileStorage, KeyValueStorage};
    use lion_splash::stats::{Counter, RunStats, StatsStore};
    use lion_splash::{Game, Settings};

    env_logger::init();
    log::info!("Lion Splash (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed: Option<u64> = args.next().and_then(|s| s.parse().ok());
    let max_frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    let storage: Box<dyn KeyValueStorage> = Box::new(FileStorage::from_env());
    let mut settings = Settings::load(storage.as_ref());
    if seed.is_some() {
        settings.seed = seed;
    }
    let stats = RunStats::load(storage);

    let mut game = match Game::new(1280.0, 720.0, settings, Box::new(stats), rand::random()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not start: {}", e);
            std::process::exit(1);
        }
    };

    // 60 Hz wall clock
    let mut frames = 0;
    while frames < max_frames && !game.world().is_won() {
        let input = autopilot(game.world());
        game.frame(frames as f64 * 1000.0 / 60.0, &input);
        frames += 1;
    }

    let level = &game.world().level;
    println!(
        "Level seed {}: {} of {} people soaked in {} frames{}",
        level.seed,
        level.people.len() - level.dry_people(),
        level.people.len(),
        frames,
        if level.won { " - you won!" } else { "" }
    );
    for counter in Counter::ALL {
        println!("  {:<16} {}", counter.as_str(), game.stats().read(counter));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
