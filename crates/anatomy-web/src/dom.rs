//! Host page access: canvas mount, control listeners and panel writes

use anatomy_core::config::ControlsConfig;
use anatomy_core::{InfoCard, Layer, ViewerConfig};
use anatomy_scene::ControlEvent;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::bridge::{parse_opacity, PendingControls, PendingResize};
use crate::error::HostError;

/// Id of the optional `<script type="application/toml">` configuration block
pub const CONFIG_ELEMENT_ID: &str = "anatomy-config";

pub fn window() -> Result<web_sys::Window, HostError> {
    web_sys::window().ok_or(HostError::NoWindow)
}

pub fn document() -> Result<Document, HostError> {
    window()?.document().ok_or(HostError::NoDocument)
}

fn element(document: &Document, id: &str) -> Result<Element, HostError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HostError::MissingElement(id.to_string()))
}

fn input(document: &Document, id: &str) -> Result<HtmlInputElement, HostError> {
    element(document, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| HostError::NotAnInput(id.to_string()))
}

/// Read the inline configuration block, falling back to defaults
pub fn load_inline_config(document: &Document) -> ViewerConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return ViewerConfig::default();
    };

    match ViewerConfig::from_toml(&text) {
        Ok(config) => {
            info!("Loaded inline configuration");
            config
        }
        Err(e) => {
            warn!("Invalid inline configuration, using defaults: {}", e);
            ViewerConfig::default()
        }
    }
}

/// Host viewport size in CSS pixels
pub fn inner_size(window: &web_sys::Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}

/// Ensure the render canvas exists inside the mount element; returns its
/// CSS selector
pub fn mount_canvas(document: &Document, controls: &ControlsConfig) -> Result<String, HostError> {
    let mount = element(document, &controls.mount_id)?;
    if document.get_element_by_id(&controls.canvas_id).is_none() {
        let canvas = document.create_element("canvas")?;
        canvas.set_id(&controls.canvas_id);
        mount.append_child(&canvas)?;
    }
    Ok(format!("#{}", controls.canvas_id))
}

/// Attach listeners to the host page's checkboxes and opacity slider.
///
/// Every configured element must exist; a page missing one of them is a
/// setup error rather than a silently dead control.
pub fn bind_controls(
    document: &Document,
    controls: &ControlsConfig,
    pending: &PendingControls,
) -> Result<(), HostError> {
    // Resolve everything first so a missing element binds nothing
    let layers = Layer::ALL
        .iter()
        .map(|&layer| -> Result<_, HostError> {
            Ok((layer, input(document, controls.layers.get(layer))?))
        })
        .collect::<Result<Vec<_>, HostError>>()?;
    let opacity = input(document, &controls.opacity_id)?;
    element(document, &controls.readout_id)?;
    element(document, &controls.info_id)?;

    for (layer, checkbox) in layers {
        let pending = pending.clone();
        let target = checkbox.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            pending.push(ControlEvent::LayerToggled {
                layer,
                visible: target.checked(),
            });
        }) as Box<dyn FnMut(_)>);
        checkbox.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let pending = pending.clone();
    let target = opacity.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        pending.push(ControlEvent::OpacityChanged(parse_opacity(&target.value())));
    }) as Box<dyn FnMut(_)>);
    opacity.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();

    info!("Bound host page controls");
    Ok(())
}

/// Report the current host size and every later window resize
pub fn bind_resize(window: &web_sys::Window, pending: &PendingResize) -> Result<(), HostError> {
    let (width, height) = inner_size(window);
    pending.set(width, height);

    let pending = pending.clone();
    let target = window.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let (width, height) = inner_size(&target);
        pending.set(width, height);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_text(id: &str, text: &str) -> Result<(), HostError> {
    let document = document()?;
    element(&document, id)?.set_text_content(Some(text));
    Ok(())
}

/// Replace the info panel with the part name in bold and its description
pub fn show_info(id: &str, card: &InfoCard) -> Result<(), HostError> {
    let document = document()?;
    let panel = element(&document, id)?;

    let name = document.create_element("strong")?;
    name.set_text_content(Some(&card.name));
    let description = document.create_element("p")?;
    description.set_attribute("style", "margin:6px 0 0 0;")?;
    description.set_text_content(Some(&card.description));

    panel.set_text_content(None);
    panel.append_child(&name)?;
    panel.append_child(&description)?;
    Ok(())
}
