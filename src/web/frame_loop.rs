// src/web/frame_loop.rs
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::frame_stats::FrameStats;
use crate::web::dom;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Runs `frame` on every display refresh until the page goes away.
///
/// Each call starts an independent loop. The callback keeps a handle to
/// itself to reschedule, so it is never freed and cannot be cancelled.
pub fn start(label: impl Into<String>, mut frame: impl FnMut(f64) + 'static) -> anyhow::Result<()> {
    let label = label.into();
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let reschedule = slot.clone();
    let mut stats = FrameStats::new();

    let callback = Closure::wrap(Box::new(move |timestamp: f64| {
        frame(timestamp);

        if let Some(fps) = stats.tick() {
            log::debug!("{}: {} fps ({} frames)", label, fps, stats.total_frames());
        }

        if let Some(next) = reschedule.borrow().as_ref() {
            if let Err(e) = request_frame(next) {
                log::error!("{}: failed to schedule next frame: {:#}", label, e);
            }
        }
    }) as Box<dyn FnMut(f64)>);

    request_frame(&callback)?;
    slot.borrow_mut().replace(callback);
    Ok(())
}

fn request_frame(callback: &FrameCallback) -> anyhow::Result<i32> {
    dom::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(dom::js_err)
}
