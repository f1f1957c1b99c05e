//! Fixed camera framings, one per customizable slot.

use glam::Vec3;

use crate::catalog::Slot;

/// A fixed target+position pair used to reframe the view when a slot's
/// selection changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub target: Vec3,
    pub position: Vec3,
}

/// Camera placement before any choreography.
pub const INITIAL_CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(2.5, 1.0, 0.0);

pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const CAMERA_MIN_DISTANCE: f32 = 0.2;
pub const CAMERA_MAX_DISTANCE: f32 = 4.0;

/// Eased transition length in seconds.
pub const CAMERA_TRANSITION_DURATION: f32 = 0.6;

/// The authored framing for a slot.
///
/// Framings are applied through the orbit controls, so the distance
/// bounds hold for choreographed moves exactly as they do for user zoom:
/// a preset authored farther out than [`CAMERA_MAX_DISTANCE`] (the wheel
/// framing) settles at the bound along the same view direction.
#[must_use]
pub const fn preset_for(slot: Slot) -> CameraPreset {
    match slot {
        Slot::Wheel => CameraPreset {
            target: Vec3::new(-0.08, 0.54, 0.0),
            position: Vec3::new(3.0, 2.0, 5.0),
        },
        Slot::Deck => CameraPreset {
            target: Vec3::new(0.0, 0.3, 0.0),
            position: Vec3::new(1.5, 0.8, 0.0),
        },
        Slot::Truck => CameraPreset {
            target: Vec3::new(-0.12, 0.29, 0.57),
            position: Vec3::new(0.1, 0.25, 0.9),
        },
        Slot::Bolt => CameraPreset {
            target: Vec3::new(-0.25, 0.3, 0.62),
            position: Vec3::new(-0.5, 0.35, 0.8),
        },
    }
}
