// src/web/network.rs
// One independent particle field per `.network-canvas`.
use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::config::NetworkConfig;
use crate::scene::network::ParticleField;
use crate::web::{canvas, dom, frame_loop};

pub const NETWORK_CANVAS_SELECTOR: &str = ".network-canvas";

pub type SharedField = Rc<RefCell<ParticleField>>;

pub fn mount_all(
    document: &web::Document,
    config: &NetworkConfig,
) -> anyhow::Result<Vec<SharedField>> {
    let canvases: Vec<web::HtmlCanvasElement> = dom::query_all(document, NETWORK_CANVAS_SELECTOR)?;
    if canvases.is_empty() {
        log::debug!("No {} on this page, network animation skipped.", NETWORK_CANVAS_SELECTOR);
        return Ok(Vec::new());
    }

    let mut fields = Vec::with_capacity(canvases.len());
    for (index, canvas) in canvases.into_iter().enumerate() {
        match mount(index, canvas, config.clone())? {
            Some(field) => fields.push(field),
            None => log::debug!("Network canvas #{} has no parent element, skipped.", index),
        }
    }
    log::info!("Network animation running on {} canvas(es).", fields.len());
    Ok(fields)
}

fn mount(
    index: usize,
    canvas: web::HtmlCanvasElement,
    config: NetworkConfig,
) -> anyhow::Result<Option<SharedField>> {
    let Some(container) = canvas
        .parent_element()
        .and_then(|parent| parent.dyn_into::<web::HtmlElement>().ok())
    else {
        return Ok(None);
    };

    let mut context = canvas::context_2d(&canvas)?;
    let size = fit_to_container(&canvas, &container);

    let mut rng = SmallRng::from_entropy();
    let field = Rc::new(RefCell::new(ParticleField::new(config, size.x, size.y, &mut rng)));

    let window = dom::window()?;
    {
        let field = field.clone();
        let canvas = canvas.clone();
        let container = container.clone();
        dom::listen(&window, "resize", move |_: web::Event| {
            let size = fit_to_container(&canvas, &container);
            field.borrow_mut().resize(size.x, size.y);
        })?;
    }
    {
        // Canvas-relative: the canvas may not sit at the container's origin.
        let field = field.clone();
        let canvas = canvas.clone();
        dom::listen(&container, "mousemove", move |event: web::MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let pointer = dom::client_position(&event) - DVec2::new(rect.left(), rect.top());
            field.borrow_mut().set_pointer(Some(pointer));
        })?;
    }
    {
        let field = field.clone();
        dom::listen(&container, "mouseleave", move |_: web::MouseEvent| {
            field.borrow_mut().set_pointer(None);
        })?;
    }

    {
        let field = field.clone();
        frame_loop::start(format!("network-canvas #{index}"), move |_| {
            field.borrow_mut().frame(&mut context);
        })?;
    }

    Ok(Some(field))
}

fn fit_to_container(canvas: &web::HtmlCanvasElement, container: &web::HtmlElement) -> DVec2 {
    let size = DVec2::new(container.offset_width() as f64, container.offset_height() as f64);
    canvas::set_canvas_size(canvas, size);
    size
}
