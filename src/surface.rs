// src/surface.rs
use glam::DVec2;

use crate::color::Paint;

/// The handful of 2D primitives the effects draw with.
///
/// Implemented by `CanvasRenderingContext2d` on the web; the scene types only
/// ever see this trait, which keeps them runnable off the browser.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);

    /// `alpha` is the global alpha applied on top of the paint's own alpha.
    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint, alpha: f64);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64);
}

#[cfg(test)]
pub(crate) use recorder::{DrawCommand, Recorder};

#[cfg(test)]
mod recorder {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCommand {
        Clear { width: f64, height: f64 },
        Circle { center: DVec2, radius: f64, paint: Paint, alpha: f64 },
        Line { from: DVec2, to: DVec2, paint: Paint, width: f64 },
    }

    /// Keeps every call so tests can assert on what a frame drew.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub commands: Vec<DrawCommand>,
    }

    impl Recorder {
        pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
            self.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Circle { .. }))
        }

        pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
            self.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Line { .. }))
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self, width: f64, height: f64) {
            self.commands.push(DrawCommand::Clear { width, height });
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint, alpha: f64) {
            self.commands.push(DrawCommand::Circle {
                center,
                radius,
                paint: paint.clone(),
                alpha,
            });
        }

        fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64) {
            self.commands.push(DrawCommand::Line {
                from,
                to,
                paint: paint.clone(),
                width,
            });
        }
    }
}
