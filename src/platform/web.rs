//! Browser bindings
//!
//! The page owns the frame loop (requestAnimationFrame), the canvas and the
//! pose classifier; it drives a `WebEngine` and reads state back to draw.

use wasm_bindgen::prelude::*;

use crate::settings::{EngineConfig, HazardPolicy};
use crate::sim::{Engine, Remaining};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already set when the module is re-initialized by a hot reload
    console_log::init_with_level(log::Level::Info).ok();
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

fn remaining_value(remaining: Remaining) -> f64 {
    match remaining {
        Remaining::Lives(lives) => lives as f64,
        Remaining::Seconds(secs) => secs as f64,
    }
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine,
}

impl WebEngine {
    fn build(mut config: EngineConfig) -> Result<WebEngine, JsError> {
        if config.seed.is_none() {
            config.seed = Some(random_seed());
        }
        let engine = Engine::new(config)?;
        log::info!("Engine ready (seed {})", engine.seed());
        Ok(WebEngine { engine })
    }
}

#[wasm_bindgen]
impl WebEngine {
    /// Build from a preset name ("classic", "endless", "timed")
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<WebEngine, JsError> {
        let config = EngineConfig::from_preset_name(preset)?;
        Self::build(config)
    }

    /// Build from a JSON config (missing fields take defaults)
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebEngine, JsError> {
        let config = EngineConfig::from_json(json)?;
        Self::build(config)
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, x: f32) {
        self.engine.set_position(x);
    }

    pub fn update(&mut self, elapsed_secs: f32) {
        self.engine.update(elapsed_secs);
    }

    /// `callback(score, level, livesOrTime)`
    #[wasm_bindgen(js_name = onScoreChanged)]
    pub fn on_score_changed(&mut self, callback: js_sys::Function) {
        self.engine.on_score_changed(move |update| {
            let result = callback.call3(
                &JsValue::NULL,
                &JsValue::from_f64(update.score as f64),
                &JsValue::from(update.level),
                &JsValue::from_f64(remaining_value(update.remaining)),
            );
            if let Err(err) = result {
                log::warn!("onScoreChanged threw: {:?}", err);
            }
        });
    }

    /// `callback(finalScore, finalLevel)`
    #[wasm_bindgen(js_name = onGameEnded)]
    pub fn on_game_ended(&mut self, callback: js_sys::Function) {
        self.engine.on_game_ended(move |score, level| {
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from_f64(score as f64),
                &JsValue::from(level),
            );
            if let Err(err) = result {
                log::warn!("onGameEnded threw: {:?}", err);
            }
        });
    }

    /// Full run state as JSON for the renderer
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.engine.state())?)
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.engine.is_active()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.engine.score() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.engine.level()
    }

    #[wasm_bindgen(getter)]
    pub fn lives(&self) -> Option<u32> {
        self.engine.lives()
    }

    #[wasm_bindgen(getter, js_name = timeRemaining)]
    pub fn time_remaining(&self) -> Option<f32> {
        self.engine.time_remaining()
    }

    #[wasm_bindgen(getter, js_name = collectorPosition)]
    pub fn collector_position(&self) -> f32 {
        self.engine.collector_position()
    }

    #[wasm_bindgen(getter, js_name = collectorWidth)]
    pub fn collector_width(&self) -> f32 {
        self.engine.collector_width()
    }

    #[wasm_bindgen(getter, js_name = laneCount)]
    pub fn lane_count(&self) -> u32 {
        self.engine.lane_count()
    }

    #[wasm_bindgen(getter, js_name = hazardPolicy)]
    pub fn hazard_policy(&self) -> String {
        match self.engine.hazard_policy() {
            HazardPolicy::InstantKill => "instant_kill".to_string(),
            HazardPolicy::CostLife => "cost_life".to_string(),
        }
    }
}
