// File: crates/fractal-core/src/interaction.rs
// Summary: Input events from the host mapped onto pan/zoom/resize.

/// Records panned per pixel of drag; dragging right moves the view back in time.
pub const DRAG_PAN_SPEED: f64 = 0.5;
pub const ZOOM_IN_STEP: f64 = 1.2;
pub const ZOOM_OUT_STEP: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    /// Pointer drag by `dx` logical pixels.
    Drag { dx: f64 },
    /// Wheel scroll; positive `delta_y` scrolls down (zoom out).
    Wheel { delta_y: f64 },
    /// Host container resized to a new logical size.
    Resize { width: f64, height: f64 },
}

/// Pan delta for a drag of `dx` pixels.
#[inline]
pub fn drag_to_pan(dx: f64) -> f64 { -dx * DRAG_PAN_SPEED }

/// Multiplicative zoom step for a wheel delta.
#[inline]
pub fn wheel_to_zoom_step(delta_y: f64) -> f64 {
    if delta_y > 0.0 { ZOOM_OUT_STEP } else { ZOOM_IN_STEP }
}
