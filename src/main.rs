//! Arena Survivor headless runner
//!
//! Drives a full session with the autopilot at a fixed host frame rate and
//! reports how it went. Useful for soak tests and for checking determinism.
//!
//! # Usage
//!
//! ```bash
//! arena-survivor --seconds 120 --fps 30
//! arena-survivor --settings settings.json --quality high --dump-scene
//! RUST_LOG=debug arena-survivor
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use arena_survivor::autopilot::Autopilot;
    use arena_survivor::consts::SIM_DT;
    use arena_survivor::platform::FrameClock;
    use arena_survivor::scene::Scene;
    use arena_survivor::sim::{Flow, GameMode, GameState, tick};
    use arena_survivor::{QualityPreset, Settings};

    #[derive(Parser)]
    #[command(name = "arena-survivor")]
    #[command(author, version, about = "Arena Survivor - headless autopilot session")]
    struct Args {
        /// Settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Quality preset override (low, medium, high)
        #[arg(long, short = 'q')]
        quality: Option<QualityPreset>,

        /// Simulated seconds to run
        #[arg(long, default_value = "60")]
        seconds: f32,

        /// Host frame rate fed to the frame clock
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Print the final scene snapshot as JSON
        #[arg(long)]
        dump_scene: bool,
    }

    /// Tallies for the end-of-run summary
    #[derive(Debug, Default)]
    struct Summary {
        ticks: u64,
        clears: u32,
        deaths: u32,
        best_level: u32,
    }

    impl Summary {
        fn observe(&mut self, before: GameMode, state: &GameState) {
            self.best_level = self.best_level.max(state.level.number);
            if before == state.mode {
                return;
            }
            match state.mode {
                GameMode::Cleared => self.clears += 1,
                GameMode::GameOver => self.deaths += 1,
                _ => {}
            }
        }
    }

    fn load_settings(args: &Args) -> Settings {
        let mut settings = match &args.settings {
            Some(path) => Settings::load(path).unwrap_or_else(|e| {
                log::warn!("Failed to load {}: {}; using defaults", path.display(), e);
                Settings::default()
            }),
            None => Settings::default(),
        };
        if let Some(quality) = args.quality {
            settings.quality = quality;
        }
        settings
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();
        let settings = load_settings(&args);

        log::info!(
            "Arena Survivor starting: quality {}, {} particles max",
            settings.quality,
            settings.max_particles()
        );

        let mut state = GameState::with_settings(&settings);
        let mut clock = FrameClock::new();
        let bot = Autopilot::new();
        let mut summary = Summary::default();

        let frame_dt = 1.0 / args.fps.max(1) as f32;
        let target_ticks = (args.seconds.max(0.0) / SIM_DT) as u64;

        'frames: while summary.ticks < target_ticks {
            for _ in 0..clock.advance(frame_dt) {
                let before = state.mode;
                let input = bot.input(&state);
                if tick(&mut state, &input, SIM_DT) == Flow::Quit {
                    break 'frames;
                }
                summary.observe(before, &state);
                summary.ticks += 1;
                if summary.ticks >= target_ticks {
                    break 'frames;
                }
            }
        }

        if clock.dropped() > 0.0 {
            log::warn!("Frame clock dropped {:.3}s of simulated time", clock.dropped());
        }

        println!(
            "ticks={} mode={} level={} best_level={} clears={} deaths={} score={} high_score={} kills={}",
            summary.ticks,
            state.mode.as_str(),
            state.level.number,
            summary.best_level,
            summary.clears,
            summary.deaths,
            state.player.score,
            state.player.high_score,
            state.kills
        );

        if args.dump_scene {
            let scene = Scene::capture(&state, &settings);
            match serde_json::to_string_pretty(&scene) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to serialize scene: {}", e),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; a browser host drives the library directly
}
