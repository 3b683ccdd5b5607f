//! Per-frame dirty check deciding whether the shader must be redrawn.

use crate::color_scheme::{ColorScheme, SCHEME_SIZE};
use crate::viewport::Viewport;

/// Drawing surface the render step talks to.
pub trait Graphics {
    /// CSS size of the canvas, used for change detection.
    fn display_size(&self) -> (u32, u32);

    /// Size of the drawing buffer, used for the `resolution` uniform and
    /// for converting gesture deltas.
    fn drawing_size(&self) -> (u32, u32);

    /// Upload `uniforms` and draw the fullscreen quad.
    fn draw(&mut self, uniforms: &Uniforms);
}

/// Values bound to the fractal shader for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    pub zoom_center: [f32; 2],
    pub zoom_size: f32,
    pub phi: f32,
    pub colors: [[f32; 3]; SCHEME_SIZE],
    pub mode: i32,
    pub max_iterations: i32,
}

impl Uniforms {
    pub fn new(
        resolution: (u32, u32),
        viewport: &Viewport,
        scheme: &ColorScheme,
        mode: i32,
        max_iterations: i32,
    ) -> Self {
        Self {
            resolution: [resolution.0 as f32, resolution.1 as f32],
            zoom_center: [viewport.center[0] as f32, viewport.center[1] as f32],
            zoom_size: viewport.scale as f32,
            phi: viewport.phi as f32,
            colors: scheme.to_uniform_colors(),
            mode,
            max_iterations,
        }
    }
}

/// Inputs of the last frame that was actually drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: i32,
    pub width: u32,
    pub height: u32,
    pub scheme: ColorScheme,
    pub viewport: Viewport,
}

impl RenderState {
    fn matches(
        &self,
        mode: i32,
        size: (u32, u32),
        scheme: &ColorScheme,
        viewport: &Viewport,
    ) -> bool {
        self.mode == mode
            && (self.width, self.height) == size
            && self.scheme == *scheme
            && self.viewport == *viewport
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    Skipped,
}

/// Memoizes the last drawn [`RenderState`] and elides unchanged frames.
#[derive(Debug, Default)]
pub struct RenderTracker {
    last: Option<RenderState>,
}

impl RenderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderState> {
        self.last.as_ref()
    }

    /// Forget the snapshot so the next frame is always drawn.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw through `graphics` unless mode, canvas size, scheme and
    /// viewport all equal the last drawn frame.
    pub fn render<G: Graphics + ?Sized>(
        &mut self,
        graphics: &mut G,
        mode: i32,
        scheme: &ColorScheme,
        viewport: &Viewport,
        max_iterations: i32,
    ) -> FrameOutcome {
        let size = graphics.display_size();
        let unchanged = self
            .last
            .as_ref()
            .is_some_and(|last| last.matches(mode, size, scheme, viewport));
        if unchanged {
            return FrameOutcome::Skipped;
        }

        let uniforms = Uniforms::new(
            graphics.drawing_size(),
            viewport,
            scheme,
            mode,
            max_iterations,
        );
        graphics.draw(&uniforms);
        log::trace!("drew frame {uniforms:?}");

        match &mut self.last {
            Some(last) => {
                last.viewport.set(viewport);
                if last.scheme != *scheme {
                    last.scheme = scheme.clone();
                }
                last.mode = mode;
                last.width = size.0;
                last.height = size.1;
            }
            None => {
                self.last = Some(RenderState {
                    mode,
                    width: size.0,
                    height: size.1,
                    scheme: scheme.clone(),
                    viewport: *viewport,
                });
            }
        }
        FrameOutcome::Drawn
    }
}
