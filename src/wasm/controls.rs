//! Page controls around the canvas: palette inputs, mode, pause, zen
//! mode and the color-picker connection. All of them are optional.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

use super::gl::WebGlGraphics;
use super::picker::PickerClient;
use crate::{Viewer, ViewerConfig, SCHEME_SIZE};

type SharedViewer = Rc<RefCell<Viewer<WebGlGraphics>>>;

pub fn attach(
    document: &Document,
    viewer: &SharedViewer,
    config: &ViewerConfig,
) -> Result<(), JsValue> {
    let inputs = color_inputs(document);
    for (slot, input) in inputs.iter().enumerate() {
        if let Some(hex) = viewer.borrow().context.scheme.color_hex(slot) {
            input.set_value(&hex);
        }
        let viewer = viewer.clone();
        let source = input.clone();
        on(input, "input", move || {
            let hex = source.value();
            if let Err(err) = viewer.borrow_mut().context.scheme.set_color_hex(slot, &hex) {
                log::warn!("rejected palette color: {err}");
            }
        })?;
    }

    if let Some(select) = element::<HtmlSelectElement>(document, "mode") {
        let viewer = viewer.clone();
        let source = select.clone();
        on(&select, "change", move || match source.value().parse::<i32>() {
            Ok(mode) => {
                viewer.borrow_mut().context.set_mode(mode);
            }
            Err(_) => log::warn!("unknown mode {:?}", source.value()),
        })?;
    }

    if let Some(button) = document.get_element_by_id("pause") {
        let viewer = viewer.clone();
        let label = button.clone();
        on(&button, "click", move || {
            let paused = viewer.borrow_mut().context.toggle_pause();
            label.set_text_content(Some(if paused { "Rotate" } else { "Pause" }));
        })?;
    }

    if let Some(button) = document.get_element_by_id("zen") {
        let body = document.body();
        on(&button, "click", move || {
            if let Some(body) = &body {
                if let Err(err) = body.class_list().toggle("zen") {
                    log::warn!("could not toggle zen mode: {err:?}");
                }
            }
        })?;
    }

    if let (Some(host), Some(button)) = (
        element::<HtmlInputElement>(document, "clr-host"),
        document.get_element_by_id("clr-connect"),
    ) {
        let client = Rc::new(RefCell::new(picker_client(viewer, inputs, config)));
        on(&button, "click", move || {
            if let Err(err) = client.borrow_mut().set_host(&host.value()) {
                log::error!("picker connection failed: {err:?}");
            }
        })?;
    }

    Ok(())
}

/// Picker client applying updates to the palette and mirroring them
/// into the color inputs.
fn picker_client(
    viewer: &SharedViewer,
    inputs: Vec<HtmlInputElement>,
    config: &ViewerConfig,
) -> PickerClient {
    let viewer = viewer.clone();
    PickerClient::new(config.picker_port, move |update| {
        let applied = viewer.borrow_mut().context.apply_picker_update(&update);
        for (slot, hex) in applied {
            if let Some(input) = inputs.get(slot) {
                input.set_value(&hex);
            }
        }
    })
}

fn color_inputs(document: &Document) -> Vec<HtmlInputElement> {
    let Some(container) = document.get_element_by_id("scheme-colors") else {
        log::debug!("no #scheme-colors container, palette inputs disabled");
        return Vec::new();
    };
    let inputs = container.get_elements_by_tag_name("input");
    (0..inputs.length().min(SCHEME_SIZE as u32))
        .filter_map(|i| inputs.item(i))
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn on(target: &Element, event: &str, mut handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let listener = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}
