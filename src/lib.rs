#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod color_picker;
pub mod color_scheme;
pub mod config;
pub mod error;
pub mod gesture;
pub mod render_state;
pub mod viewer;
pub mod viewport;

pub use color_picker::PickerUpdate;
pub use color_scheme::{ColorScheme, SCHEME_SIZE};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use gesture::{PanZoomCallbacks, PointerController, TouchController};
pub use render_state::{FrameOutcome, Graphics, RenderState, RenderTracker, Uniforms};
pub use viewer::{ApplicationContext, InputEvent, Viewer};
pub use viewport::Viewport;

// Only compile browser glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::{Viewer, ViewerConfig, ViewerError};

    mod controls;
    mod gl;
    mod input;
    mod logging;
    mod picker;
    mod render;

    impl From<ViewerError> for JsValue {
        fn from(err: ViewerError) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = match document
            .body()
            .and_then(|body| body.get_attribute("data-viewer-config"))
        {
            Some(text) => ViewerConfig::from_json(&text)?,
            None => ViewerConfig::default(),
        };
        logging::init(config.log_level());

        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let graphics = gl::WebGlGraphics::new(canvas.clone())?;
        let viewer = Rc::new(RefCell::new(Viewer::new(graphics, &config)?));

        input::attach(&canvas, &viewer)?;
        controls::attach(&document, &viewer, &config)?;
        render::start(viewer)?;
        log::info!("viewer started on #{}", config.canvas_id);
        Ok(())
    }
}
