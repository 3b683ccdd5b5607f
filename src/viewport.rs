/// Pan/zoom/rotation state used to parametrize the fractal shader.
///
/// `scale` is the width of the visible region in world units (the
/// `zoomSize` uniform). Both screen axes are converted with `scale / w`,
/// which keeps world units square whatever the canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Center in world coordinates.
    pub center: [f64; 2],
    /// World units spanned by the canvas width. Always positive.
    pub scale: f64,
    /// Rotation in radians.
    pub phi: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            scale: 4.0,
            phi: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(center: [f64; 2], scale: f64, phi: f64) -> Self {
        Self { center, scale, phi }
    }

    /// Pan by a screen-space pixel delta.
    ///
    /// The delta is scaled by `scale / w` on both axes, y is flipped, and
    /// the result is rotated by `-phi` before being added to the center.
    /// Ignored when the new center would not be finite.
    pub fn translate(&mut self, dx: f64, dy: f64, w: f64, _h: f64) {
        let center = self.shifted(dx, dy, w);
        if center.iter().all(|c| c.is_finite()) {
            self.center = center;
        }
    }

    /// Multiply `scale` by `ratio`, keeping the world point under screen
    /// position `(rx, ry)` fixed.
    ///
    /// Ignored when the new scale would leave the positive normal range
    /// or the new center would not be finite.
    pub fn zoom(&mut self, rx: f64, ry: f64, w: f64, h: f64, ratio: f64) {
        let scale = self.scale * ratio;
        if !(scale.is_normal() && scale > 0.0) {
            return;
        }
        let dx = rx - w / 2.0;
        let dy = ry - h / 2.0;
        let mut zoomed = Viewport {
            center: self.shifted(dx, dy, w),
            scale,
            phi: self.phi,
        };
        zoomed.center = zoomed.shifted(-dx, -dy, w);
        if zoomed.center.iter().all(|c| c.is_finite()) {
            *self = zoomed;
        }
    }

    /// Return to the origin with no rotation. A missing or non-positive
    /// scale falls back to `1.0`.
    pub fn reset(&mut self, initial_scale: Option<f64>) {
        self.center = [0.0, 0.0];
        self.phi = 0.0;
        self.scale = initial_scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(1.0);
    }

    /// Axis-aligned visibility test. Rotation is not taken into account.
    pub fn contains(&self, world_x: f64, world_y: f64, w: f64, h: f64) -> bool {
        let dx = self.center[0] - world_x;
        let dy = self.center[1] - world_y;
        let sy = self.scale * h / w;
        dx.abs() <= self.scale * 0.5 && dy.abs() <= sy * 0.5
    }

    /// Overwrite every field with `other`'s.
    pub fn set(&mut self, other: &Viewport) {
        *self = *other;
    }

    /// World point shown at screen pixel `(sx, sy)`.
    pub fn screen_to_world(&self, sx: f64, sy: f64, w: f64, h: f64) -> [f64; 2] {
        self.shifted(sx - w / 2.0, sy - h / 2.0, w)
    }

    fn shifted(&self, dx: f64, dy: f64, w: f64) -> [f64; 2] {
        let [wx, wy] = self.world_delta(dx, dy, w);
        [self.center[0] + wx, self.center[1] + wy]
    }

    fn world_delta(&self, dx: f64, dy: f64, w: f64) -> [f64; 2] {
        let wx = self.scale * dx / w;
        let wy = self.scale * -dy / w;
        let (sn, cs) = self.phi.sin_cos();
        [cs * wx + sn * wy, -sn * wx + cs * wy]
    }
}
