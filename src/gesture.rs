//! Pointer and touch controllers turning raw input into pan/zoom intents.
//!
//! Controllers never touch a [`Viewport`](crate::Viewport) directly. They
//! are built with a [`PanZoomCallbacks`] pair and forward every recognised
//! gesture to it together with the caller's context.

/// Largest wheel delta honoured per event, in either direction.
pub const WHEEL_MAX_DELTA: f64 = 5.0;

/// Base of the wheel zoom curve: `ratio = WHEEL_ZOOM_BASE ^ delta`.
pub const WHEEL_ZOOM_BASE: f64 = 1.01;

/// Pan/zoom sinks a controller reports into.
///
/// `translate` receives a screen-space delta; `zoom` receives a ratio that
/// multiplies the view scale, anchored at a screen position.
pub struct PanZoomCallbacks<C> {
    pub translate: fn(&mut C, [f64; 2]),
    pub zoom: fn(&mut C, f64, f64, f64),
}

impl<C> Clone for PanZoomCallbacks<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for PanZoomCallbacks<C> {}

/// Screen position of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
}

/// Wheel event: scroll deltas plus the cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub x: f64,
    pub y: f64,
}

/// One changed touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging {
        last: [f64; 2],
    },
}

/// Mouse drag panning plus wheel zoom.
pub struct PointerController<C> {
    callbacks: PanZoomCallbacks<C>,
    state: PointerState,
}

impl<C> PointerController<C> {
    pub fn new(callbacks: PanZoomCallbacks<C>) -> Self {
        Self {
            callbacks,
            state: PointerState::Idle,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn mouse_down(&mut self, event: PointerInput) {
        self.state = PointerState::Dragging {
            last: [event.x, event.y],
        };
    }

    /// Pan by `last - current`, so the content follows the cursor.
    pub fn mouse_move(&mut self, ctx: &mut C, event: PointerInput) {
        let PointerState::Dragging { last } = self.state else {
            return;
        };
        let delta = [last[0] - event.x, last[1] - event.y];
        self.state = PointerState::Dragging {
            last: [event.x, event.y],
        };
        (self.callbacks.translate)(ctx, delta);
    }

    pub fn mouse_up(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn mouse_leave(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn wheel(&mut self, ctx: &mut C, event: WheelInput) {
        (self.callbacks.zoom)(ctx, wheel_ratio(event), event.x, event.y);
    }
}

/// Zoom ratio for a wheel event, using the dominant axis clamped to
/// `±WHEEL_MAX_DELTA`.
pub fn wheel_ratio(event: WheelInput) -> f64 {
    let d = if event.delta_x.abs() > event.delta_y.abs() {
        event.delta_x
    } else {
        event.delta_y
    };
    WHEEL_ZOOM_BASE.powf(d.clamp(-WHEEL_MAX_DELTA, WHEEL_MAX_DELTA))
}

/// Tracked touch: identifier and latest screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchRecord {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl From<TouchPoint> for TouchRecord {
    fn from(t: TouchPoint) -> Self {
        Self {
            id: t.id,
            x: t.x,
            y: t.y,
        }
    }
}

/// One-finger pan and two-finger pinch zoom.
///
/// Three or more simultaneous touches are tracked but produce no gesture.
pub struct TouchController<C> {
    callbacks: PanZoomCallbacks<C>,
    touches: Vec<TouchRecord>,
}

impl<C> TouchController<C> {
    pub fn new(callbacks: PanZoomCallbacks<C>) -> Self {
        Self {
            callbacks,
            touches: Vec::new(),
        }
    }

    pub fn active_touches(&self) -> &[TouchRecord] {
        &self.touches
    }

    pub fn touch_start(&mut self, changed: &[TouchPoint]) {
        for t in changed {
            self.upsert(*t);
        }
    }

    pub fn touch_move(&mut self, ctx: &mut C, changed: &[TouchPoint]) {
        let previous = self.touches.clone();
        for t in changed {
            self.upsert(*t);
        }
        self.resolve(ctx, &previous);
    }

    pub fn touch_end(&mut self, changed: &[TouchPoint]) {
        self.remove(changed);
    }

    pub fn touch_cancel(&mut self, changed: &[TouchPoint]) {
        self.remove(changed);
    }

    fn upsert(&mut self, t: TouchPoint) {
        match self.touches.iter_mut().find(|rec| rec.id == t.id) {
            Some(rec) => *rec = t.into(),
            None => self.touches.push(t.into()),
        }
    }

    fn remove(&mut self, changed: &[TouchPoint]) {
        self.touches
            .retain(|rec| !changed.iter().any(|t| t.id == rec.id));
    }

    fn resolve(&self, ctx: &mut C, previous: &[TouchRecord]) {
        let before = |rec: &TouchRecord| previous.iter().find(|p| p.id == rec.id).copied();
        match self.touches.as_slice() {
            [now] => {
                let Some(old) = before(now) else { return };
                let dx = now.x - old.x;
                let dy = now.y - old.y;
                (self.callbacks.translate)(ctx, [-dx, -dy]);
            }
            [a, b] => {
                let (Some(old_a), Some(old_b)) = (before(a), before(b)) else {
                    return;
                };
                let ratio = distance(&old_a, &old_b) / distance(a, b);
                let cx = 0.5 * (a.x + b.x);
                let cy = 0.5 * (a.y + b.y);
                log::trace!("pinch ratio {ratio} at ({cx}, {cy})");
                (self.callbacks.zoom)(ctx, ratio, cx, cy);
            }
            _ => {}
        }
    }
}

fn distance(a: &TouchRecord, b: &TouchRecord) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
