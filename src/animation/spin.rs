//! Per-wheel spin state machine.

use std::f32::consts::PI;

use glam::Quat;
use smallvec::SmallVec;

use crate::animation::easing::circ_out;
use crate::catalog::Slot;
use crate::scene::{NodeKey, Scene};
use crate::selection::{SelectionChange, SelectionObserver};

/// Continuous spin rate in radians per second (0.2 rad per frame at 60 fps).
pub const WHEEL_SPIN_SPEED: f32 = 12.0;

/// Settle rotation: 30 degrees backward.
pub const SETTLE_ANGLE: f32 = -30.0 * PI / 180.0;

/// Settle duration in seconds.
pub const SETTLE_DURATION: f32 = 2.5;

/// One in-flight settle rotation.
#[derive(Debug, Clone, Copy)]
struct SettleTween {
    from: f32,
    delta: f32,
    elapsed: f32,
    duration: f32,
}

impl SettleTween {
    fn sample(&self) -> f32 {
        let k = circ_out(self.elapsed / self.duration);
        self.from + self.delta * k
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug)]
struct WheelSpin {
    node: NodeKey,
    /// Authored part rotation; spin is composed on top of it.
    base_rotation: Quat,
    /// Current spin angle about the wheel axis.
    angle: f32,
    settle: Option<SettleTween>,
}

/// Drives the wheels' rotation each frame.
///
/// Modes are mutually exclusive per wheel: while `continuous` is set the
/// angle advances at [`WHEEL_SPIN_SPEED`]; otherwise a wheel-selection
/// change starts a settle tween from the wheel's current angle. Starting a
/// new settle replaces any in-flight one (last-write-wins, no queue), and
/// nothing animates on initial mount.
pub struct SpinController {
    continuous: bool,
    speed: f32,
    wheels: SmallVec<[WheelSpin; 4]>,
}

impl SpinController {
    #[must_use]
    pub fn new(continuous: bool) -> Self {
        Self {
            continuous,
            speed: WHEEL_SPIN_SPEED,
            wheels: SmallVec::new(),
        }
    }

    /// Registers a wheel node with its authored base rotation. Wheels
    /// start at angle zero with no animation in flight.
    pub fn register_wheel(&mut self, node: NodeKey, base_rotation: Quat) {
        self.wheels.push(WheelSpin {
            node,
            base_rotation,
            angle: 0.0,
            settle: None,
        });
    }

    #[inline]
    #[must_use]
    pub fn continuous(&self) -> bool {
        self.continuous
    }

    /// Switches between continuous and settle mode.
    ///
    /// Enabling continuous spin cancels in-flight settles and picks up
    /// from each wheel's current angle; there is no snap-back.
    pub fn set_continuous(&mut self, on: bool) {
        if on {
            for wheel in &mut self.wheels {
                wheel.settle = None;
            }
        }
        self.continuous = on;
    }

    /// Starts a settle rotation on every wheel from its current angle.
    /// No-op in continuous mode.
    pub fn trigger_settle(&mut self) {
        if self.continuous {
            return;
        }
        for wheel in &mut self.wheels {
            // Last-write-wins: replaces any in-flight settle.
            wheel.settle = Some(SettleTween {
                from: wheel.angle,
                delta: SETTLE_ANGLE,
                elapsed: 0.0,
                duration: SETTLE_DURATION,
            });
        }
    }

    /// Advances the spin state by `dt` seconds and writes wheel rotations
    /// into the scene. A wheel whose node is gone is skipped silently.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for wheel in &mut self.wheels {
            if self.continuous {
                wheel.angle += self.speed * dt;
            } else if let Some(tween) = &mut wheel.settle {
                tween.elapsed += dt;
                wheel.angle = tween.sample();
                if tween.finished() {
                    wheel.settle = None;
                }
            }

            if let Some(node) = scene.get_node_mut(wheel.node) {
                node.transform.rotation = wheel.base_rotation * Quat::from_rotation_x(wheel.angle);
            }
        }
    }

    /// Cancels every in-flight settle. Called on teardown.
    pub fn cancel_all(&mut self) {
        for wheel in &mut self.wheels {
            wheel.settle = None;
        }
    }

    /// Number of wheels with a settle in flight.
    #[must_use]
    pub fn active_settles(&self) -> usize {
        self.wheels.iter().filter(|w| w.settle.is_some()).count()
    }

    /// The spin angle of wheel `index`, in registration order.
    #[must_use]
    pub fn wheel_angle(&self, index: usize) -> Option<f32> {
        self.wheels.get(index).map(|w| w.angle)
    }

    /// The angle wheel `index` will settle at, if a settle is in flight.
    #[must_use]
    pub fn settle_target(&self, index: usize) -> Option<f32> {
        self.wheels
            .get(index)
            .and_then(|w| w.settle.as_ref())
            .map(|t| t.from + t.delta)
    }
}

impl SelectionObserver for SpinController {
    fn selection_changed(&mut self, change: &SelectionChange) {
        if change.slot == Slot::Wheel {
            self.trigger_settle();
        }
    }
}
