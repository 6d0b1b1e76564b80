// src/web/dom.rs
// Thin helpers over web-sys: lookups that may be absent, JS error
// conversion, and page-lifetime event listeners.
use anyhow::anyhow;
use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

pub fn document() -> anyhow::Result<web::Document> {
    window()?.document().ok_or_else(|| anyhow!("no document"))
}

pub fn viewport_size(window: &web::Window) -> anyhow::Result<DVec2> {
    let width = window.inner_width().map_err(js_err)?.as_f64().unwrap_or(0.0);
    let height = window.inner_height().map_err(js_err)?.as_f64().unwrap_or(0.0);
    Ok(DVec2::new(width, height))
}

pub fn client_position(event: &web::MouseEvent) -> DVec2 {
    DVec2::new(event.client_x() as f64, event.client_y() as f64)
}

/// Registers `handler` for `event` on `target`. The closure is leaked: there
/// is no teardown, listeners live as long as the page.
pub fn listen<E>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> anyhow::Result<()>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Every element matched by `selector`, in document order.
pub fn query_all<T: JsCast>(document: &web::Document, selector: &str) -> anyhow::Result<Vec<T>> {
    let nodes = document.query_selector_all(selector).map_err(js_err)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}
