use shader_view::gesture::{PointerInput, WheelInput};
use shader_view::{FrameOutcome, Graphics, InputEvent, Uniforms, Viewer, ViewerConfig, Viewport};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test_configure!(run_in_browser);

/// Fixed 400x300 surface that discards draws.
struct Surface;

impl Graphics for Surface {
    fn display_size(&self) -> (u32, u32) {
        (400, 300)
    }

    fn drawing_size(&self) -> (u32, u32) {
        (400, 300)
    }

    fn draw(&mut self, _uniforms: &Uniforms) {}
}

fn spin_wheel(delta_y: f64, turns: usize) -> Viewer<Surface> {
    let mut viewer = Viewer::new(Surface, &ViewerConfig::default()).unwrap();
    for _ in 0..turns {
        viewer.dispatch(InputEvent::Wheel(WheelInput {
            delta_x: 0.0,
            delta_y,
            x: 260.0,
            y: 90.0,
        }));
    }
    viewer
}

fn drag(viewer: &mut Viewer<Surface>) {
    viewer.dispatch(InputEvent::MouseDown(PointerInput { x: 200.0, y: 150.0 }));
    viewer.dispatch(InputEvent::MouseMove(PointerInput { x: 50.0, y: 20.0 }));
    viewer.dispatch(InputEvent::MouseUp);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn zoom_keeps_world_point_under_cursor() {
    let (w, h) = (1024.0, 768.0);
    let cursors = [[0.0, 0.0], [512.0, 384.0], [1000.0, 20.0], [37.5, 700.25]];
    for phi in [0.0, 1.0, -0.3] {
        for ratio in [0.5, 0.99, 1.0, 1.01f64.powf(5.0), 3.0] {
            for [rx, ry] in cursors {
                let mut vp = Viewport::new([-0.75, 0.1], 4.0, phi);
                let before = vp.screen_to_world(rx, ry, w, h);
                vp.zoom(rx, ry, w, h, ratio);
                let after = vp.screen_to_world(rx, ry, w, h);
                assert!((before[0] - after[0]).abs() < 1e-9, "{before:?} {after:?}");
                assert!((before[1] - after[1]).abs() < 1e-9, "{before:?} {after:?}");
                assert_eq!(vp.scale, 4.0 * ratio);
            }
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn reset_restores_origin_whatever_the_history() {
    let mut vp = Viewport::default();
    vp.translate(123.0, -45.0, 640.0, 480.0);
    vp.zoom(10.0, 10.0, 640.0, 480.0, 0.25);
    vp.phi = 2.5;
    vp.reset(Some(4.0));
    assert_eq!(vp, Viewport::new([0.0, 0.0], 4.0, 0.0));
    vp.reset(Some(0.5));
    assert_eq!(vp.scale, 0.5);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn copies_compare_exactly() {
    let original = Viewport::new([0.1, 0.2], 3.0, 0.5);
    let mut copy = original;
    assert_eq!(copy, original);
    copy.center[0] += f64::EPSILON;
    assert_ne!(copy, original);
    copy.set(&original);
    assert_eq!(copy, original);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn endless_zoom_out_keeps_frames_stable() {
    let mut viewer = spin_wheel(100.0, 20_000);
    drag(&mut viewer);
    let vp = viewer.context.viewport;
    assert!(vp.scale.is_normal(), "{vp:?}");
    assert!(vp.center.iter().all(|c| c.is_finite()), "{vp:?}");

    viewer.frame(0.0);
    assert_eq!(viewer.frame(16.0), FrameOutcome::Skipped);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn endless_zoom_in_keeps_scale_normal() {
    let mut viewer = spin_wheel(-100.0, 20_000);
    drag(&mut viewer);
    let vp = viewer.context.viewport;
    assert!(vp.scale.is_normal() && vp.scale > 0.0, "{vp:?}");
    assert!(vp.center.iter().all(|c| c.is_finite()), "{vp:?}");

    viewer.frame(0.0);
    assert_eq!(viewer.frame(16.0), FrameOutcome::Skipped);
}
