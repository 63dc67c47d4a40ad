//! Fall Catch entry point
//!
//! Native builds run a headless demo: the autopilot plays a single run on a
//! fixed host timestep and HUD updates go to the log. Browser builds are
//! driven from JavaScript through `platform::web::WebEngine`.
//!
//! Usage: `fall-catch [preset | config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::rc::Rc;

    use fall_catch::consts::HOST_DT;
    use fall_catch::platform::Autopilot;
    use fall_catch::{ConfigError, Engine, EngineConfig, Remaining};

    /// Safety cap on a demo run (simulated seconds)
    const MAX_RUN_SECONDS: f32 = 600.0;
    /// Autopilot speed in field widths per second
    const AUTOPILOT_SPEED: f32 = 1.2;

    fn load_config(args: &[String]) -> Result<EngineConfig, ConfigError> {
        let mut config = match args.first() {
            Some(arg) if arg.ends_with(".json") => {
                let json = std::fs::read_to_string(arg)?;
                EngineConfig::from_json(&json)?
            }
            Some(name) => EngineConfig::from_preset_name(name)?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = args.get(1) {
            match seed.parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid seed '{}'", seed),
            }
        }
        Ok(config)
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let config = load_config(&args).unwrap_or_else(|err| {
            log::error!("{}; falling back to defaults", err);
            EngineConfig::default()
        });

        let mut engine = match Engine::new(config) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("Invalid config: {}", err);
                return;
            }
        };
        log::info!("Fall Catch (native demo) starting with seed {}", engine.seed());

        let last_level = Rc::new(Cell::new(1u32));
        {
            let last_level = last_level.clone();
            engine.on_score_changed(move |update| {
                // Timer mode reports every frame; only surface level changes
                if update.level != last_level.get() {
                    last_level.set(update.level);
                    log::info!("HUD: level {} (score {})", update.level, update.score);
                }
                if let Remaining::Lives(lives) = update.remaining {
                    log::debug!("HUD: score {} lives {}", update.score, lives);
                }
            });
        }
        engine.on_game_ended(|score, level| {
            log::info!("Game over: final score {} at level {}", score, level);
        });

        let half_width = engine.config().item_half_width;
        let mut pilot = Autopilot::new(AUTOPILOT_SPEED);
        let mut elapsed = 0.0;

        engine.start();
        while engine.is_active() && elapsed < MAX_RUN_SECONDS {
            let x = pilot.steer(engine.items(), engine.collector_width(), half_width, HOST_DT);
            engine.set_position(x);
            engine.update(HOST_DT);
            elapsed += HOST_DT;
        }
        if engine.is_active() {
            log::info!("Demo cap of {}s reached", MAX_RUN_SECONDS);
            engine.stop();
        }

        println!(
            "score={} level={} lanes={} width={:.3} time={:.1}s",
            engine.score(),
            engine.level(),
            engine.lane_count(),
            engine.collector_width(),
            elapsed
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
