//! Ease-out curves used by the settle animation and camera transitions.
//!
//! Inputs are normalized time and clamped to `[0, 1]`; outputs start fast
//! and decelerate into the target.

/// Circular ease-out.
#[must_use]
pub fn circ_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    (1.0 - t * t).sqrt()
}

/// Cubic ease-out.
#[must_use]
pub fn cubic_out(t: f32) -> f32 {
    let t = 1.0 - t.clamp(0.0, 1.0);
    1.0 - t * t * t
}
