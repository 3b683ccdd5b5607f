use shader_view::gesture::{PointerInput, TouchPoint};
use shader_view::{
    FrameOutcome, Graphics, InputEvent, PickerUpdate, Uniforms, Viewer, ViewerConfig, Viewport,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test_configure!(run_in_browser);

/// Fake surface recording every draw.
struct Recorder {
    size: (u32, u32),
    draws: Vec<Uniforms>,
}

impl Graphics for Recorder {
    fn display_size(&self) -> (u32, u32) {
        self.size
    }

    fn drawing_size(&self) -> (u32, u32) {
        self.size
    }

    fn draw(&mut self, uniforms: &Uniforms) {
        self.draws.push(uniforms.clone());
    }
}

fn viewer() -> Viewer<Recorder> {
    let graphics = Recorder {
        size: (400, 300),
        draws: Vec::new(),
    };
    Viewer::new(graphics, &ViewerConfig::default()).unwrap()
}

fn draws(viewer: &Viewer<Recorder>) -> usize {
    viewer.context.graphics.draws.len()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn identical_frames_draw_once() {
    let mut viewer = viewer();
    assert_eq!(viewer.frame(0.0), FrameOutcome::Drawn);
    assert_eq!(viewer.frame(16.0), FrameOutcome::Skipped);
    assert_eq!(draws(&viewer), 1);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn palette_change_redraws_and_refreshes_snapshot() {
    let mut viewer = viewer();
    viewer.frame(0.0);
    viewer.context.scheme.set_color_hex(2, "#123456").unwrap();
    assert_eq!(viewer.frame(16.0), FrameOutcome::Drawn);
    assert_eq!(draws(&viewer), 2);

    let snapshot = viewer.context.last_render().unwrap();
    assert_eq!(snapshot.scheme, viewer.context.scheme);
    assert_eq!(snapshot.scheme.color_hex(2).as_deref(), Some("#123456"));

    // The snapshot is a copy, not a view of the live scheme.
    viewer.context.scheme.set_color_hex(2, "#654321").unwrap();
    assert_ne!(viewer.context.last_render().unwrap().scheme, viewer.context.scheme);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn rewriting_same_color_does_not_redraw() {
    let mut viewer = viewer();
    viewer.frame(0.0);
    let hex = viewer.context.scheme.color_hex(1).unwrap();
    viewer.context.scheme.set_color_hex(1, &hex).unwrap();
    assert_eq!(viewer.frame(16.0), FrameOutcome::Skipped);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn drag_pans_and_forces_redraw() {
    let mut viewer = viewer();
    viewer.frame(0.0);
    viewer.dispatch(InputEvent::MouseDown(PointerInput { x: 200.0, y: 150.0 }));
    viewer.dispatch(InputEvent::MouseMove(PointerInput { x: 100.0, y: 150.0 }));
    viewer.dispatch(InputEvent::MouseUp);

    // 100px to the left on a 400px wide canvas with scale 4 moves one unit right.
    assert_eq!(viewer.context.viewport.center, [1.0, 0.0]);
    assert_eq!(viewer.frame(16.0), FrameOutcome::Drawn);
    let uniforms = viewer.context.graphics.draws.last().unwrap();
    assert_eq!(uniforms.zoom_center, [1.0, 0.0]);
    assert_eq!(uniforms.resolution, [400.0, 300.0]);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn pinch_zooms_viewport() {
    let mut viewer = viewer();
    viewer.dispatch(InputEvent::TouchStart(vec![
        TouchPoint { id: 1, x: 150.0, y: 150.0 },
        TouchPoint { id: 2, x: 250.0, y: 150.0 },
    ]));
    viewer.dispatch(InputEvent::TouchMove(vec![
        TouchPoint { id: 1, x: 100.0, y: 150.0 },
        TouchPoint { id: 2, x: 300.0, y: 150.0 },
    ]));
    // Centroid is the canvas center, so only the scale changes.
    assert_eq!(viewer.context.viewport.scale, 2.0);
    assert_eq!(viewer.context.viewport.center, [0.0, 0.0]);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn unpaused_rotation_follows_clock() {
    let mut viewer = viewer();
    viewer.context.viewport.phi = 0.7;
    viewer.frame(0.0);
    assert_eq!(viewer.context.viewport.phi, 0.7, "paused keeps manual phi");

    assert!(!viewer.context.toggle_pause());
    assert_eq!(viewer.frame(500.0), FrameOutcome::Drawn);
    assert_eq!(viewer.context.viewport.phi, 0.001 * 500.0);
    assert_eq!(viewer.frame(600.0), FrameOutcome::Drawn);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn mode_change_resets_view_once() {
    let mut viewer = viewer();
    viewer.context.viewport = Viewport::new([1.0, 1.0], 0.1, 0.3);
    assert!(!viewer.context.set_mode(0));
    assert_eq!(viewer.context.viewport.scale, 0.1);

    assert!(viewer.context.set_mode(2));
    assert_eq!(viewer.context.viewport, Viewport::new([0.0, 0.0], 4.0, 0.0));
    viewer.frame(0.0);
    assert_eq!(viewer.context.graphics.draws[0].mode, 2);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn picker_update_skips_bad_pairs() {
    let mut viewer = viewer();
    let update = PickerUpdate {
        colors: vec!["#ff0000".into(), "bogus".into(), "#00ff00".into()],
        semantics: vec![4, 0, 9],
    };
    let applied = viewer.context.apply_picker_update(&update);
    assert_eq!(applied, vec![(4, "#ff0000".to_owned())]);
    assert_eq!(viewer.context.scheme.color_hex(0).as_deref(), Some("#007549"));
    assert_eq!(viewer.context.scheme.color_hex(4).as_deref(), Some("#ff0000"));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn gestures_on_collapsed_canvas_leave_view_alone() {
    let graphics = Recorder {
        size: (0, 0),
        draws: Vec::new(),
    };
    let mut viewer = Viewer::new(graphics, &ViewerConfig::default()).unwrap();
    viewer.dispatch(InputEvent::MouseDown(PointerInput { x: 10.0, y: 10.0 }));
    viewer.dispatch(InputEvent::MouseMove(PointerInput { x: 60.0, y: 40.0 }));
    viewer.dispatch(InputEvent::MouseUp);
    viewer.dispatch(InputEvent::TouchStart(vec![
        TouchPoint { id: 1, x: 10.0, y: 10.0 },
        TouchPoint { id: 2, x: 20.0, y: 10.0 },
    ]));
    viewer.dispatch(InputEvent::TouchMove(vec![
        TouchPoint { id: 1, x: 0.0, y: 10.0 },
        TouchPoint { id: 2, x: 40.0, y: 10.0 },
    ]));

    assert_eq!(viewer.context.viewport, Viewport::default());
}
