//! Camera: user orbit controls and selection-driven choreography.

pub mod orbit;
pub mod presets;
pub mod rig;

pub use orbit::{OrbitControls, PointerState};
pub use presets::{
    CAMERA_FOV_DEGREES, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_TRANSITION_DURATION,
    CameraPreset, INITIAL_CAMERA_POSITION, INITIAL_CAMERA_TARGET, preset_for,
};
pub use rig::{CameraRig, FloorCollider};
