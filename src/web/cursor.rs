// src/web/cursor.rs
// Custom cursor: a trailing ring and a dot glued to the pointer, plus the
// hero parallax hook that shares the document mousemove stream.
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::config::CursorConfig;
use crate::scene::cursor::{CursorFollower, parallax_offset};
use crate::web::{dom, frame_loop};

const RING_CLASS: &str = "custom-cursor";
const DOT_CLASS: &str = "cursor-dot";
const HOVER_CLASS: &str = "cursor-hover";
const CLICK_CLASS: &str = "cursor-click";

/// Returns `false` when a cursor is already on the page.
pub fn mount(document: &web::Document, config: &CursorConfig) -> anyhow::Result<bool> {
    if document
        .query_selector(&format!(".{RING_CLASS}"))
        .map_err(dom::js_err)?
        .is_some()
    {
        log::debug!("Custom cursor already present, not adding another.");
        return Ok(false);
    }

    let body = document.body().ok_or_else(|| anyhow!("document has no body"))?;
    let ring = create_div(document, RING_CLASS)?;
    let dot = create_div(document, DOT_CLASS)?;
    body.append_child(&ring).map_err(dom::js_err)?;
    body.append_child(&dot).map_err(dom::js_err)?;

    let follower = Rc::new(RefCell::new(CursorFollower::from_config(config)));

    {
        let follower = follower.clone();
        dom::listen(document, "mousemove", move |event: web::MouseEvent| {
            follower.borrow_mut().pointer_moved(dom::client_position(&event));
        })?;
    }
    {
        let (ring, dot) = (ring.clone(), dot.clone());
        frame_loop::start("cursor", move |_| {
            let mut follower = follower.borrow_mut();
            follower.step();
            place(&ring, follower.ring());
            place(&dot, follower.dot());
        })?;
    }

    let targets: Vec<web::Element> = dom::query_all(document, &config.interactive_selector())?;
    for target in &targets {
        toggle_on(target, "mouseenter", [&ring, &dot], HOVER_CLASS, true)?;
        toggle_on(target, "mouseleave", [&ring, &dot], HOVER_CLASS, false)?;
    }
    toggle_on(document, "mousedown", [&ring, &dot], CLICK_CLASS, true)?;
    toggle_on(document, "mouseup", [&ring, &dot], CLICK_CLASS, false)?;

    mount_hero_parallax(document, config)?;

    log::info!("Custom cursor mounted, {} interactive element(s) wired.", targets.len());
    Ok(true)
}

/// The layers are addressed with `::before` / `::after`, which a DOM query
/// never returns, so this moves nothing. Kept as is until the stylesheet
/// exposes real layer elements.
fn mount_hero_parallax(document: &web::Document, config: &CursorConfig) -> anyhow::Result<()> {
    if document.query_selector(".hero").map_err(dom::js_err)?.is_none() {
        return Ok(());
    }

    let window = dom::window()?;
    let query_document = document.clone();
    let config = config.clone();
    dom::listen(document, "mousemove", move |event: web::MouseEvent| {
        let viewport = match dom::viewport_size(&window) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::warn!("Could not read viewport size: {:#}", e);
                return;
            }
        };
        let layers: Vec<web::HtmlElement> =
            match dom::query_all(&query_document, ".hero::before, .hero::after") {
                Ok(layers) => layers,
                Err(e) => {
                    log::warn!("Hero layer query failed: {:#}", e);
                    return;
                }
            };
        for (index, layer) in layers.iter().enumerate() {
            let offset = parallax_offset(dom::client_position(&event), viewport, index, &config);
            let transform = format!("translate({}px, {}px)", offset.x, offset.y);
            if let Err(e) = layer.style().set_property("transform", &transform) {
                log::warn!("Could not move hero layer: {:?}", e);
            }
        }
    })
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let element = document.create_element("div").map_err(dom::js_err)?;
    element.set_class_name(class);
    element
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("{:?}", e))
}

fn place(element: &web::HtmlElement, position: DVec2) {
    let style = element.style();
    let result = style
        .set_property("left", &format!("{}px", position.x))
        .and_then(|_| style.set_property("top", &format!("{}px", position.y)));
    if let Err(e) = result {
        log::warn!("Could not position cursor element: {:?}", e);
    }
}

/// Adds (`on`) or removes `class` on both cursor elements whenever `event`
/// fires on `target`.
fn toggle_on(
    target: &web::EventTarget,
    event: &str,
    elements: [&web::HtmlElement; 2],
    class: &'static str,
    on: bool,
) -> anyhow::Result<()> {
    let elements = elements.map(|element| element.clone());
    dom::listen(target, event, move |_: web::Event| {
        for element in &elements {
            let classes = element.class_list();
            let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
            if let Err(e) = result {
                log::warn!("Could not toggle {}: {:?}", class, e);
            }
        }
    })
}
