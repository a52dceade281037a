//! Uniform UI scaling
//!
//! Layout math happens at a fixed design resolution; the scaler maps it onto
//! whatever the window currently is, uniformly (min of the two axis ratios,
//! so nothing stretches). Updated once per frame before any layout code runs.

use super::Rect;

/// Smallest scale we ever report. Degenerate window sizes (zero or negative,
/// as some platforms report during minimize) clamp here instead of producing
/// a zero or negative scale.
pub const MIN_SCALE: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct UiScaler {
    base_w: f32,
    base_h: f32,
    scale_x: f32,
    scale_y: f32,
    scale: f32,
    window_w: f32,
    window_h: f32,
}

impl UiScaler {
    pub fn new(base_w: f32, base_h: f32) -> Self {
        Self {
            base_w: base_w.max(1.0),
            base_h: base_h.max(1.0),
            scale_x: 1.0,
            scale_y: 1.0,
            scale: 1.0,
            window_w: base_w,
            window_h: base_h,
        }
    }

    /// Recompute the scale for the current window. Call once per frame,
    /// before any other component reads the scaler.
    pub fn update(&mut self, window_w: f32, window_h: f32) {
        self.window_w = window_w.max(1.0);
        self.window_h = window_h.max(1.0);
        self.scale_x = (self.window_w / self.base_w).max(MIN_SCALE);
        self.scale_y = (self.window_h / self.base_h).max(MIN_SCALE);
        self.scale = self.scale_x.min(self.scale_y);
    }

    /// The uniform scale factor (always positive, identical for X and Y)
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scale a scalar (length, padding, font size)
    pub fn apply(&self, value: f32) -> f32 {
        value * self.scale
    }

    /// Map a screen-space value back into design space
    pub fn unapply(&self, value: f32) -> f32 {
        value / self.scale
    }

    /// Scale a point
    pub fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale, y * self.scale)
    }

    /// Scale a rectangle
    pub fn rect(&self, r: Rect) -> Rect {
        r.scaled(self.scale)
    }

    /// The window size expressed in design-space units. Wider-than-base
    /// windows yield a design width above the base width.
    pub fn design_size(&self) -> (f32, f32) {
        (self.window_w / self.scale, self.window_h / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_min_ratio() {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(2560.0, 720.0); // X would be 2.0, Y is 1.0
        assert!((s.scale() - 1.0).abs() < 0.001);
        s.update(1280.0, 1440.0);
        assert!((s.scale() - 1.0).abs() < 0.001);
        s.update(640.0, 360.0);
        assert!((s.scale() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_window_clamps() {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(0.0, 0.0);
        assert!(s.scale() >= MIN_SCALE);
        s.update(-100.0, 50.0);
        assert!(s.scale() >= MIN_SCALE);
    }

    #[test]
    fn test_rect_scales_every_component() {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(640.0, 360.0);
        let r = s.rect(Rect::new(100.0, 200.0, 40.0, 80.0));
        assert!((r.x - 50.0).abs() < 0.001);
        assert!((r.y - 100.0).abs() < 0.001);
        assert!((r.w - 20.0).abs() < 0.001);
        assert!((r.h - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_unapply_inverts() {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(1920.0, 1080.0);
        let v = 333.0;
        assert!((s.unapply(s.apply(v)) - v).abs() < 0.001);
    }

    #[test]
    fn test_design_size_covers_window() {
        let mut s = UiScaler::new(1280.0, 720.0);
        s.update(2560.0, 720.0);
        let (dw, dh) = s.design_size();
        assert!((dw - 2560.0).abs() < 0.001); // scale 1.0, extra width visible
        assert!((dh - 720.0).abs() < 0.001);
    }
}
