// src/color.rs
// Fill / stroke styles handed to the drawing surface.
use bevy_color::{Alpha, Color, Hsla, Srgba};

/// A colour as understood by a 2D canvas.
///
/// `Solid` values can be manipulated (alpha, hue); `Css` values are opaque
/// strings coming from page scripts (`"red"`, `"rebeccapurple"`) and are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Css(String),
}

impl Paint {
    pub fn rgba_u8(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Paint::Solid(Color::srgb_u8(r, g, b).with_alpha(alpha))
    }

    /// `hue` in degrees, `saturation` / `lightness` in 0..=1.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Paint::Solid(Color::hsla(hue, saturation, lightness, alpha))
    }

    /// Hex strings become solid colours, everything else is kept as CSS.
    pub fn parse(value: &str) -> Self {
        match Srgba::hex(value) {
            Ok(srgba) => Paint::Solid(Color::Srgba(srgba)),
            Err(_) => Paint::Css(value.to_owned()),
        }
    }

    /// CSS strings have no alpha we can touch, so they are returned as is.
    pub fn with_alpha(&self, alpha: f32) -> Self {
        match self {
            Paint::Solid(color) => Paint::Solid(color.with_alpha(alpha)),
            Paint::Css(css) => Paint::Css(css.clone()),
        }
    }

    pub fn alpha(&self) -> Option<f32> {
        match self {
            Paint::Solid(color) => Some(color.alpha()),
            Paint::Css(_) => None,
        }
    }

    pub fn hue(&self) -> Option<f32> {
        match self {
            Paint::Solid(color) => Some(Hsla::from(*color).hue),
            Paint::Css(_) => None,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Paint::Solid(color) => {
                let srgba = color.to_srgba();
                format!(
                    "rgba({}, {}, {}, {})",
                    channel_u8(srgba.red),
                    channel_u8(srgba.green),
                    channel_u8(srgba.blue),
                    srgba.alpha.clamp(0.0, 1.0)
                )
            }
            Paint::Css(css) => css.clone(),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<&str> for Paint {
    fn from(value: &str) -> Self {
        Paint::parse(value)
    }
}

fn channel_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
