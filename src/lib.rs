#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod color;
pub mod config;
pub mod frame_stats;
pub mod scene;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::Paint;
pub use config::{CursorConfig, EffectsConfig, NetworkConfig, SparkleConfig};
pub use scene::cursor::CursorFollower;
pub use scene::network::ParticleField;
pub use scene::particle::{Behavior, Particle};
pub use scene::sparkle::SparkleEmitter;
pub use surface::Surface;

/// Console logger on the web, `env_logger` elsewhere. Safe to call twice.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::debug!("Logger already initialised.");
            }
        } else {
            let _ = env_logger::builder().is_test(cfg!(test)).try_init();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    init_logging();
    log::info!("pagefx loaded, waiting for startEffects().");
    Ok(())
}

/// Handle to the effects running on the page.
///
/// Returned by `startEffects`; whoever needs bursts keeps a reference to it.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct PageEffects {
    mounted: web::Mounted,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl PageEffects {
    /// Returns `false` when the page has no sparkle canvas.
    pub fn burst(&self, x: f64, y: f64, color: Option<String>, count: Option<u32>) -> bool {
        let Some(sparkles) = &self.mounted.sparkles else {
            log::debug!("burst() ignored: no sparkle canvas.");
            return false;
        };
        let paint = color.as_deref().map(Paint::parse);
        sparkles.burst(glam::DVec2::new(x, y), paint, count.map(|c| c as usize));
        true
    }

    #[wasm_bindgen(js_name = networkCount)]
    pub fn network_count(&self) -> usize {
        self.mounted.networks.len()
    }

    #[wasm_bindgen(js_name = sparkleCount)]
    pub fn sparkle_count(&self) -> usize {
        self.mounted.sparkles.as_ref().map_or(0, |s| s.len())
    }

    #[wasm_bindgen(getter, js_name = cursorMounted)]
    pub fn cursor_mounted(&self) -> bool {
        self.mounted.cursor
    }
}

#[cfg(target_arch = "wasm32")]
impl PageEffects {
    pub fn sparkles(&self) -> Option<&web::sparkle::SparkleHandle> {
        self.mounted.sparkles.as_ref()
    }

    pub fn networks(&self) -> &[web::network::SharedField] {
        &self.mounted.networks
    }
}

/// Starts every effect present on the page. Call once the DOM is ready.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = startEffects)]
pub fn start_effects(config_json: Option<String>) -> Result<PageEffects, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => EffectsConfig::from_json(json).map_err(|e| {
            log::error!("{:#}", e);
            JsValue::from_str(&format!("{:#}", e))
        })?,
        None => EffectsConfig::default(),
    };

    let mounted = web::mount(&config).map_err(|e| {
        log::error!("Failed to start page effects: {:#}", e);
        JsValue::from_str(&format!("{:#}", e))
    })?;

    Ok(PageEffects { mounted })
}
