// src/web/mod.rs
// Browser side: DOM lookups, event wiring and the display-refresh loops that
// drive the scene types.
pub mod canvas;
pub mod cursor;
pub mod dom;
pub mod frame_loop;
pub mod network;
pub mod sparkle;

use crate::config::EffectsConfig;

/// Everything `mount` managed to start.
pub struct Mounted {
    pub cursor: bool,
    pub networks: Vec<network::SharedField>,
    pub sparkles: Option<sparkle::SparkleHandle>,
}

/// Starts every effect whose elements exist on the current page.
pub fn mount(config: &EffectsConfig) -> anyhow::Result<Mounted> {
    let document = dom::document()?;
    let cursor = cursor::mount(&document, &config.cursor)?;
    let networks = network::mount_all(&document, &config.network)?;
    let sparkles = sparkle::mount(&document, config.sparkle.clone())?;
    Ok(Mounted { cursor, networks, sparkles })
}
