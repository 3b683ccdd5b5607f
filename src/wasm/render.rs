use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

use super::gl::WebGlGraphics;
use crate::render_state::FrameOutcome;
use crate::Viewer;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive `viewer` from `requestAnimationFrame`, one frame per refresh.
pub fn start(viewer: Rc<RefCell<Viewer<WebGlGraphics>>>) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that it can re-schedule
    // itself. The `Option` lets us create the closure first and reach it
    // from inside its own body afterwards.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut drawn: u64 = 0;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        {
            let mut viewer = viewer.borrow_mut();
            viewer.context.graphics.resize_to_display_size();
            if viewer.frame(time) == FrameOutcome::Drawn {
                drawn += 1;
                log::trace!("frame {drawn} drawn at {time:.1}ms");
            }
        }

        // schedule next
        let scheduled = window().map(|w| {
            f.borrow()
                .as_ref()
                .map(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()))
        });
        if !matches!(scheduled, Some(Some(Ok(_)))) {
            log::error!("could not schedule the next animation frame; rendering stopped");
        }
    }) as Box<dyn FnMut(f64)>));

    let callback = g.borrow();
    let callback = callback.as_ref().ok_or("frame callback missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())?;

    Ok(())
}
