//! Selection-driven camera choreography.

use glam::Vec3;

use crate::animation::easing::cubic_out;
use crate::camera::orbit::{OrbitControls, PointerState};
use crate::camera::presets::{CAMERA_FOV_DEGREES, CAMERA_TRANSITION_DURATION, preset_for};
use crate::selection::{SelectionChange, SelectionObserver};

/// The stage-floor collider the camera may not pass through.
///
/// Registered lazily on the user's first interaction with the controls
/// and never reassigned once set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorCollider {
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct CameraTween {
    from_target: Vec3,
    from_position: Vec3,
    to_target: Vec3,
    to_position: Vec3,
    elapsed: f32,
    duration: f32,
}

/// Owns the orbit controls and retargets them on selection changes.
///
/// With choreography disabled (passive preview) the rig only forwards
/// user input. Transitions are interruptible: a new selection redirects
/// an in-flight tween, and user interaction takes over immediately.
pub struct CameraRig {
    controls: Option<OrbitControls>,
    tween: Option<CameraTween>,
    collider: Option<FloorCollider>,
    choreography: bool,
}

impl CameraRig {
    /// Creates an unmounted rig. Controls attach on first paint via
    /// [`mount`](Self::mount); transition requests before that are dropped.
    #[must_use]
    pub fn new(choreography: bool) -> Self {
        Self {
            controls: None,
            tween: None,
            collider: None,
            choreography,
        }
    }

    pub fn mount(&mut self, controls: OrbitControls) {
        self.controls = Some(controls);
    }

    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.controls.is_some()
    }

    #[must_use]
    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    #[must_use]
    pub fn target(&self) -> Option<Vec3> {
        self.controls.as_ref().map(OrbitControls::target)
    }

    #[must_use]
    pub fn position(&self) -> Option<Vec3> {
        self.controls.as_ref().map(OrbitControls::position)
    }

    #[inline]
    #[must_use]
    pub fn in_transition(&self) -> bool {
        self.tween.is_some()
    }

    #[must_use]
    pub fn floor_collider(&self) -> Option<FloorCollider> {
        self.collider
    }

    /// Starts an eased transition to the slot the user just changed.
    ///
    /// Requests are dropped silently when choreography is off or the
    /// controls are not mounted yet; the latter is an expected race during
    /// concurrent mount and selection, not an error. A request while a
    /// transition is in flight redirects it (last-write-wins, no queue).
    pub fn retarget(&mut self, slot: crate::catalog::Slot) {
        if !self.choreography {
            return;
        }
        let Some(controls) = &self.controls else {
            log::debug!("camera transition to {slot} preset dropped: controls not mounted");
            return;
        };
        let preset = preset_for(slot);
        self.tween = Some(CameraTween {
            from_target: controls.target(),
            from_position: controls.position(),
            to_target: preset.target,
            to_position: preset.position,
            elapsed: 0.0,
            duration: CAMERA_TRANSITION_DURATION,
        });
    }

    /// Marks the start of a user interaction with the controls.
    ///
    /// Registers the floor collider if none is set yet (it must never be
    /// reassigned afterwards) and hands the camera over to the user by
    /// cancelling any in-flight transition.
    pub fn begin_interaction(&mut self, floor_height: f32) {
        if self.collider.is_none() {
            self.collider = Some(FloorCollider {
                height: floor_height,
            });
        }
        self.tween = None;
    }

    /// Advances one frame: either the in-flight transition or free orbit,
    /// then the floor clamp. A no-op while unmounted.
    pub fn update(&mut self, dt: f32, input: &PointerState) {
        let Some(controls) = &mut self.controls else {
            return;
        };

        if let Some(tween) = &mut self.tween {
            tween.elapsed += dt;
            let k = cubic_out(tween.elapsed / tween.duration);
            controls.set_look_at(
                tween.from_target.lerp(tween.to_target, k),
                tween.from_position.lerp(tween.to_position, k),
            );
            if tween.elapsed >= tween.duration {
                self.tween = None;
            }
        } else {
            controls.apply_input(input, CAMERA_FOV_DEGREES);
        }

        if let Some(collider) = self.collider {
            controls.clamp_above(collider.height);
        }
    }
}

impl SelectionObserver for CameraRig {
    fn selection_changed(&mut self, change: &SelectionChange) {
        self.retarget(change.slot);
    }
}
