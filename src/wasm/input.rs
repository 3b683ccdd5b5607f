use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent};

use super::gl::WebGlGraphics;
use crate::gesture::{PointerInput, TouchPoint, WheelInput};
use crate::{InputEvent, Viewer};

type Translate = fn(&Event) -> Option<InputEvent>;

const BINDINGS: [(&str, Translate); 9] = [
    ("mousedown", |e| pointer(e).map(InputEvent::MouseDown)),
    ("mousemove", |e| pointer(e).map(InputEvent::MouseMove)),
    ("mouseup", |_| Some(InputEvent::MouseUp)),
    ("mouseleave", |_| Some(InputEvent::MouseLeave)),
    ("wheel", |e| wheel(e).map(InputEvent::Wheel)),
    ("touchstart", |e| touches(e).map(InputEvent::TouchStart)),
    ("touchmove", |e| touches(e).map(InputEvent::TouchMove)),
    ("touchend", |e| touches(e).map(InputEvent::TouchEnd)),
    ("touchcancel", |e| touches(e).map(InputEvent::TouchCancel)),
];

/// Forward canvas mouse, wheel and touch events to the viewer.
pub fn attach(
    canvas: &HtmlCanvasElement,
    viewer: &Rc<RefCell<Viewer<WebGlGraphics>>>,
) -> Result<(), JsValue> {
    for (name, translate) in BINDINGS {
        let viewer = viewer.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let Some(input) = translate(&event) else {
                return;
            };
            if input.prevents_default() {
                event.prevent_default();
            }
            viewer.borrow_mut().dispatch(input);
        }) as Box<dyn FnMut(Event)>);
        canvas.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        listener.forget();
    }
    Ok(())
}

fn pointer(event: &Event) -> Option<PointerInput> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(PointerInput {
        x: f64::from(event.client_x()),
        y: f64::from(event.client_y()),
    })
}

fn wheel(event: &Event) -> Option<WheelInput> {
    let event = event.dyn_ref::<WheelEvent>()?;
    Some(WheelInput {
        delta_x: event.delta_x(),
        delta_y: event.delta_y(),
        x: f64::from(event.client_x()),
        y: f64::from(event.client_y()),
    })
}

fn touches(event: &Event) -> Option<Vec<TouchPoint>> {
    let changed = event.dyn_ref::<TouchEvent>()?.changed_touches();
    Some(
        (0..changed.length())
            .filter_map(|i| changed.item(i))
            .map(|t| TouchPoint {
                id: t.identifier(),
                x: f64::from(t.client_x()),
                y: f64::from(t.client_y()),
            })
            .collect(),
    )
}
