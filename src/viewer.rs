//! Application state and the explicit wiring of input controllers to it.

use crate::color_picker::PickerUpdate;
use crate::color_scheme::ColorScheme;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::gesture::{
    PanZoomCallbacks, PointerController, PointerInput, TouchController, TouchPoint, WheelInput,
};
use crate::render_state::{FrameOutcome, Graphics, RenderState, RenderTracker};
use crate::viewport::Viewport;

/// Everything a frame needs: graphics handle, palette, view and mode.
pub struct ApplicationContext<G> {
    pub graphics: G,
    pub scheme: ColorScheme,
    pub viewport: Viewport,
    /// Selects the shader variant.
    pub mode: i32,
    /// While `false`, `phi` follows the frame clock.
    pub paused: bool,
    initial_scale: f64,
    rotation_speed: f64,
    max_iterations: i32,
    tracker: RenderTracker,
}

impl<G: Graphics> ApplicationContext<G> {
    pub fn new(graphics: G, config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graphics,
            scheme: config.initial_scheme()?,
            viewport: Viewport::new([0.0, 0.0], config.initial_scale, 0.0),
            mode: 0,
            paused: true,
            initial_scale: config.initial_scale,
            rotation_speed: config.rotation_speed,
            max_iterations: config.max_iterations,
            tracker: RenderTracker::new(),
        })
    }

    /// Run one animation frame at `time` milliseconds.
    pub fn render(&mut self, time: f64) -> FrameOutcome {
        if !self.paused {
            self.viewport.phi = self.rotation_speed * time;
        }
        self.tracker.render(
            &mut self.graphics,
            self.mode,
            &self.scheme,
            &self.viewport,
            self.max_iterations,
        )
    }

    pub fn last_render(&self) -> Option<&RenderState> {
        self.tracker.last()
    }

    /// Switch shader mode, resetting the view. Returns `false` if `mode`
    /// is already active.
    pub fn set_mode(&mut self, mode: i32) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.viewport.reset(Some(self.initial_scale));
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("rotation {}", if self.paused { "paused" } else { "running" });
        self.paused
    }

    /// Apply each `(slot, color)` pair, skipping bad ones. Returns the pairs
    /// that were applied so UI controls can mirror them.
    pub fn apply_picker_update(&mut self, update: &PickerUpdate) -> Vec<(usize, String)> {
        let mut applied = Vec::with_capacity(update.colors.len());
        for (slot, hex) in update.pairs() {
            match self.scheme.set_color_hex(slot, hex) {
                Ok(()) => applied.push((slot, hex.to_owned())),
                Err(err) => log::warn!("ignoring picker color: {err}"),
            }
        }
        log::debug!("picker update applied {} of {} colors", applied.len(), update.colors.len());
        applied
    }

    fn surface(&self) -> Option<(f64, f64)> {
        let (w, h) = self.graphics.drawing_size();
        (w > 0 && h > 0).then(|| (f64::from(w), f64::from(h)))
    }
}

fn translate_view<G: Graphics>(ctx: &mut ApplicationContext<G>, d: [f64; 2]) {
    if let Some((w, h)) = ctx.surface() {
        ctx.viewport.translate(d[0], d[1], w, h);
    }
}

fn zoom_view<G: Graphics>(ctx: &mut ApplicationContext<G>, ratio: f64, x: f64, y: f64) {
    if let Some((w, h)) = ctx.surface() {
        ctx.viewport.zoom(x, y, w, h, ratio);
    }
}

/// Raw input as delivered by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown(PointerInput),
    MouseMove(PointerInput),
    MouseUp,
    MouseLeave,
    Wheel(WheelInput),
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd(Vec<TouchPoint>),
    TouchCancel(Vec<TouchPoint>),
}

impl InputEvent {
    /// Whether the browser's own handling (scrolling, pinch-zoom of the
    /// page) must be suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            InputEvent::Wheel(_)
                | InputEvent::TouchStart(_)
                | InputEvent::TouchMove(_)
                | InputEvent::TouchEnd(_)
                | InputEvent::TouchCancel(_)
        )
    }
}

/// Application context composed with its pointer and touch controllers.
pub struct Viewer<G> {
    pub context: ApplicationContext<G>,
    pointer: PointerController<ApplicationContext<G>>,
    touch: TouchController<ApplicationContext<G>>,
}

impl<G: Graphics> Viewer<G> {
    pub fn new(graphics: G, config: &ViewerConfig) -> Result<Self> {
        let callbacks = PanZoomCallbacks {
            translate: translate_view::<G>,
            zoom: zoom_view::<G>,
        };
        Ok(Self {
            context: ApplicationContext::new(graphics, config)?,
            pointer: PointerController::new(callbacks),
            touch: TouchController::new(callbacks),
        })
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        let ctx = &mut self.context;
        match event {
            InputEvent::MouseDown(e) => self.pointer.mouse_down(e),
            InputEvent::MouseMove(e) => self.pointer.mouse_move(ctx, e),
            InputEvent::MouseUp => self.pointer.mouse_up(),
            InputEvent::MouseLeave => self.pointer.mouse_leave(),
            InputEvent::Wheel(e) => self.pointer.wheel(ctx, e),
            InputEvent::TouchStart(t) => self.touch.touch_start(&t),
            InputEvent::TouchMove(t) => self.touch.touch_move(ctx, &t),
            InputEvent::TouchEnd(t) => self.touch.touch_end(&t),
            InputEvent::TouchCancel(t) => self.touch.touch_cancel(&t),
        }
    }

    pub fn frame(&mut self, time: f64) -> FrameOutcome {
        self.context.render(time)
    }
}
