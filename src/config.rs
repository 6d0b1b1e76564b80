// src/config.rs
// Tunables for every effect. Page scripts may pass a partial JSON object to
// `startEffects`; anything left out keeps its default.
use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    pub network: NetworkConfig,
    pub sparkle: SparkleConfig,
    pub cursor: CursorConfig,
}

impl EffectsConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid effects config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the effects would choke on at runtime (empty sampling
    /// ranges, non-finite numbers, an empty palette).
    pub fn validate(&self) -> anyhow::Result<()> {
        self.network.validate().context("invalid network config")?;
        self.sparkle.validate().context("invalid sparkle config")?;
        self.cursor.validate().context("invalid cursor config")?;
        Ok(())
    }
}

fn check_finite(name: &str, value: f64) -> anyhow::Result<()> {
    ensure!(value.is_finite(), "{name} must be finite, got {value}");
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> anyhow::Result<()> {
    check_finite(name, value)?;
    ensure!(value >= 0.0, "{name} must not be negative, got {value}");
    Ok(())
}

fn check_range(name: &str, [lo, hi]: [f64; 2]) -> anyhow::Result<()> {
    check_finite(name, lo)?;
    check_finite(name, hi)?;
    ensure!(lo <= hi, "{name} range is reversed: [{lo}, {hi}]");
    Ok(())
}

/// Background particle network drawn on every `.network-canvas`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub particle_count: usize,
    /// Pairs closer than this get a connecting line.
    pub connection_distance: f64,
    /// Radius of the pointer's repulsion field.
    pub mouse_distance: f64,
    pub repulsion: f64,
    /// Initial velocity is uniform in `[-max_speed, max_speed]` per axis.
    pub max_speed: f64,
    pub size: [f64; 2],
    pub alpha: [f32; 2],
    pub rgb: [u8; 3],
    pub line_width: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            particle_count: 60,
            connection_distance: 150.0,
            mouse_distance: 200.0,
            repulsion: 0.5,
            max_speed: 0.25,
            size: [1.0, 3.0],
            alpha: [0.1, 0.6],
            rgb: [148, 163, 184],
            line_width: 1.0,
        }
    }
}

/// Short-lived sparkles on `#particle-canvas`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SparkleConfig {
    /// Pointer movement stops spawning once this many sparkles are alive.
    pub max_ambient: usize,
    /// A move spawns when a uniform draw in `[0, 1)` exceeds this.
    pub spawn_threshold: f64,
    pub size: [f64; 2],
    pub max_speed: f64,
    pub decay: [f64; 2],
    pub shrink: f64,
    pub hues: Vec<f32>,
    pub saturation: f32,
    pub lightness: f32,
    pub burst_count: usize,
    pub burst_speed_scale: f64,
    pub burst_size_scale: f64,
}

impl NetworkConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        check_non_negative("connection_distance", self.connection_distance)?;
        check_non_negative("mouse_distance", self.mouse_distance)?;
        check_finite("repulsion", self.repulsion)?;
        check_non_negative("max_speed", self.max_speed)?;
        check_range("size", self.size)?;
        check_range("alpha", self.alpha.map(f64::from))?;
        check_non_negative("line_width", self.line_width)?;
        Ok(())
    }
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            max_ambient: 50,
            spawn_threshold: 0.9,
            size: [1.0, 4.0],
            max_speed: 1.0,
            decay: [0.01, 0.03],
            shrink: 0.98,
            hues: vec![220.0, 240.0, 260.0, 280.0, 310.0],
            saturation: 0.8,
            lightness: 0.7,
            burst_count: 12,
            burst_speed_scale: 4.0,
            burst_size_scale: 1.5,
        }
    }
}

impl SparkleConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        check_finite("spawn_threshold", self.spawn_threshold)?;
        check_range("size", self.size)?;
        check_non_negative("max_speed", self.max_speed)?;
        check_range("decay", self.decay)?;
        check_finite("shrink", self.shrink)?;
        ensure!(!self.hues.is_empty(), "hues must not be empty");
        for &hue in &self.hues {
            check_finite("hues", hue.into())?;
        }
        check_finite("saturation", self.saturation.into())?;
        check_finite("lightness", self.lightness.into())?;
        check_finite("burst_speed_scale", self.burst_speed_scale)?;
        check_finite("burst_size_scale", self.burst_size_scale)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance the ring covers per frame.
    pub smoothing: f64,
    pub parallax_factor: f64,
    pub parallax_layer_speed: f64,
    /// Elements that put the cursor in its hover state. Matched once at start.
    pub interactive_selectors: Vec<String>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        let interactive_selectors = [
            "a",
            "button",
            "input",
            "textarea",
            ".btn",
            ".card",
            ".form-control",
            ".feature-card",
            ".stat-card",
            ".guide-point",
            ".service-card",
            ".contact-card",
            ".team-card",
            ".mission-card",
            ".vision-card",
            ".timeline-content",
            ".nav-link",
            ".dropdown-item",
            ".page-link",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            smoothing: 0.15,
            parallax_factor: 0.01,
            parallax_layer_speed: 0.5,
            interactive_selectors,
        }
    }
}

impl CursorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        check_finite("smoothing", self.smoothing)?;
        check_finite("parallax_factor", self.parallax_factor)?;
        check_finite("parallax_layer_speed", self.parallax_layer_speed)?;
        Ok(())
    }

    pub fn interactive_selector(&self) -> String {
        self.interactive_selectors.join(", ")
    }
}
