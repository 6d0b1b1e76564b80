// src/web/sparkle.rs
use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::color::Paint;
use crate::config::SparkleConfig;
use crate::scene::sparkle::SparkleEmitter;
use crate::web::{canvas, dom, frame_loop};

pub const SPARKLE_CANVAS_ID: &str = "particle-canvas";

struct Sparkles {
    emitter: SparkleEmitter,
    rng: SmallRng,
}

/// Shared handle to the running sparkle system. Cheap to clone; hand it to
/// whatever needs to trigger bursts.
#[derive(Clone)]
pub struct SparkleHandle {
    inner: Rc<RefCell<Sparkles>>,
}

impl SparkleHandle {
    /// `count` defaults to the configured burst size.
    pub fn burst(&self, position: DVec2, paint: Option<Paint>, count: Option<usize>) {
        let mut sparkles = self.inner.borrow_mut();
        let Sparkles { emitter, rng } = &mut *sparkles;
        match count {
            Some(count) => emitter.burst(position, paint, count, rng),
            None => emitter.burst_default(position, paint, rng),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().emitter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().emitter.is_empty()
    }
}

pub fn mount(
    document: &web::Document,
    config: SparkleConfig,
) -> anyhow::Result<Option<SparkleHandle>> {
    let Some(element) = document.get_element_by_id(SPARKLE_CANVAS_ID) else {
        log::debug!("No #{} on this page, sparkles skipped.", SPARKLE_CANVAS_ID);
        return Ok(None);
    };
    let canvas = element
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", SPARKLE_CANVAS_ID, e))?;

    let mut context = canvas::context_2d(&canvas)?;
    let window = dom::window()?;
    let size = dom::viewport_size(&window)?;
    canvas::set_canvas_size(&canvas, size);

    let handle = SparkleHandle {
        inner: Rc::new(RefCell::new(Sparkles {
            emitter: SparkleEmitter::new(config, size.x, size.y),
            rng: SmallRng::from_entropy(),
        })),
    };

    {
        let inner = handle.inner.clone();
        let window_for_size = window.clone();
        dom::listen(&window, "resize", move |_: web::Event| {
            match dom::viewport_size(&window_for_size) {
                Ok(size) => {
                    canvas::set_canvas_size(&canvas, size);
                    inner.borrow_mut().emitter.resize(size.x, size.y);
                }
                Err(e) => log::warn!("Could not read viewport size: {:#}", e),
            }
        })?;
    }
    {
        let inner = handle.inner.clone();
        dom::listen(&window, "mousemove", move |event: web::MouseEvent| {
            let mut sparkles = inner.borrow_mut();
            let Sparkles { emitter, rng } = &mut *sparkles;
            emitter.pointer_moved(dom::client_position(&event), rng);
        })?;
    }
    {
        let inner = handle.inner.clone();
        frame_loop::start("sparkles", move |_| {
            inner.borrow_mut().emitter.frame(&mut context);
        })?;
    }

    log::info!("Sparkle system running on #{}.", SPARKLE_CANVAS_ID);
    Ok(Some(handle))
}
