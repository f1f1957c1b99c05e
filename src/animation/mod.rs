//! Wheel animation.
//!
//! Two mutually exclusive behaviors per wheel:
//! - continuous spin while the flag is set, advanced by elapsed seconds;
//! - a one-shot eased "settle" rotation after a wheel selection change
//!   while continuous spin is off.

pub mod easing;
pub mod spin;

pub use easing::{circ_out, cubic_out};
pub use spin::{SETTLE_ANGLE, SETTLE_DURATION, SpinController, WHEEL_SPIN_SPEED};
