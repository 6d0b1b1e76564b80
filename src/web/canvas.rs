// src/web/canvas.rs
use std::f64::consts::TAU;

use anyhow::anyhow;
use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Paint;
use crate::surface::Surface;
use crate::web::dom::js_err;

pub fn context_2d(canvas: &HtmlCanvasElement) -> anyhow::Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))
}

/// Sets the canvas backing store size; fractional CSS pixels are truncated.
pub fn set_canvas_size(canvas: &HtmlCanvasElement, size: DVec2) {
    canvas.set_width(size.x.max(0.0) as u32);
    canvas.set_height(size.y.max(0.0) as u32);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint, alpha: f64) {
        self.set_global_alpha(alpha);
        self.set_fill_style_str(&paint.to_css());
        self.begin_path();
        match self.arc(center.x, center.y, radius, 0.0, TAU) {
            Ok(()) => self.fill(),
            Err(e) => log::warn!("arc failed: {:?}", e),
        }
        self.set_global_alpha(1.0);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64) {
        self.begin_path();
        self.set_stroke_style_str(&paint.to_css());
        self.set_line_width(width);
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }
}
