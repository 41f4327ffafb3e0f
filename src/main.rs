//! Space Shooter entry point
//!
//! Native headless runner: drives the simulation core with the autopilot
//! and reports the result. A windowed front end plugs into the same `Game`.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use space_shooter::audio::{AudioManager, LogSink};
use space_shooter::platform::FrameTimer;
use space_shooter::{FileHighScoreStore, Game, Settings, Tuning};

/// Frame length for non-realtime runs
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "space-shooter", about = "Headless space shooter simulation")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of game time to simulate
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Settings file (JSON)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Let the autopilot play
    #[arg(long)]
    autopilot: bool,

    /// Pace frames against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Space Shooter (native) starting...");

    let settings = Settings::load(&args.settings);
    let tuning = settings
        .tuning_path
        .as_deref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut audio = AudioManager::new(LogSink::default());
    audio.apply_settings(&settings);
    let store = FileHighScoreStore::new(&settings.high_score_path);

    let mut game = Game::new(seed, tuning, audio, store);
    let autopilot = args.autopilot || settings.autopilot;
    if !autopilot {
        log::warn!("No input device in headless mode; pass --autopilot to play");
    }
    game.set_autopilot(autopilot);

    let mut timer = FrameTimer::new();
    let mut simulated = 0.0f32;
    while simulated < args.seconds && !game.quit_requested() {
        let dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
            timer.delta()
        } else {
            FRAME_DT
        };
        game.update(dt);
        simulated += dt;
    }

    let snapshot = game.snapshot();
    log::info!(
        "Finished after {:.1}s: {:?}, score {}, best {}, level {}",
        simulated,
        snapshot.phase,
        snapshot.hud.score,
        snapshot.hud.high_score,
        snapshot.hud.difficulty
    );
    match serde_json::to_string_pretty(&snapshot.hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode HUD: {}", e),
    }
}
