//! User-driven orbit/pan/zoom controls.
//!
//! Spherical coordinates around a movable center. The rig writes preset
//! transitions through [`OrbitControls::set_look_at`]; the user moves the
//! same state through [`OrbitControls::apply_input`], so choreography and
//! free orbit never fight over separate copies of the camera.

use glam::{Vec2, Vec3};

use crate::camera::presets::{CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE};

const EPS: f32 = 1e-4;

/// Per-frame pointer input, in the host's screen space.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub screen_size: Vec2,
    pub cursor_delta: Vec2,
    pub scroll_delta: Vec2,
    /// Primary button held (orbit).
    pub rotating: bool,
    /// Secondary button held (pan).
    pub panning: bool,
}

impl PointerState {
    /// An idle frame: no buttons, no movement.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            screen_size: Vec2::new(1920.0, 1080.0),
            ..Self::default()
        }
    }

    /// Whether the user is interacting with the camera this frame.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rotating || self.panning || self.scroll_delta.y != 0.0
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    center: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
}

impl OrbitControls {
    /// Creates controls looking from `position` at `target`.
    #[must_use]
    pub fn new(target: Vec3, position: Vec3) -> Self {
        let mut controls = Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,

            center: target,
            radius: 1.0,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
        };
        controls.set_look_at(target, position);
        controls
    }

    /// Current orbit center.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.center
    }

    /// Current eye position derived from the spherical state.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.center + self.offset()
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.radius
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }

    /// Repositions the camera, deriving the spherical state from a
    /// target/position pair. Distance bounds still apply.
    pub fn set_look_at(&mut self, target: Vec3, position: Vec3) {
        self.center = target;
        let offset = position - target;
        let length = offset.length();
        self.radius = length.clamp(self.min_distance, self.max_distance);
        if length > EPS {
            self.phi = (offset.y / length).clamp(-1.0, 1.0).acos();
            self.theta = offset.x.atan2(offset.z);
        }
        self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);
    }

    /// Applies one frame of user input.
    pub fn apply_input(&mut self, input: &PointerState, fov_degrees: f32) {
        let screen_height = input.screen_size.y.max(1.0);

        if input.rotating {
            let rotate_per_pixel = 2.0 * std::f32::consts::PI / screen_height;
            self.theta -= input.cursor_delta.x * rotate_per_pixel * self.rotate_speed;
            self.phi -= input.cursor_delta.y * rotate_per_pixel * self.rotate_speed;
            self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);
        }

        if input.scroll_delta.y != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll_delta.y.abs());
            if input.scroll_delta.y > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.panning {
            let half_fov = fov_degrees.to_radians() / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world = target_world_height / screen_height;

            let forward = -self.offset().normalize();
            let right = forward.cross(Vec3::Y).normalize();
            let up = right.cross(forward).normalize();

            self.center += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }
    }

    /// Keeps the eye above `floor_y` by limiting the polar angle.
    pub fn clamp_above(&mut self, floor_y: f32) {
        let min_cos = (floor_y + EPS - self.center.y) / self.radius;
        if min_cos >= 1.0 {
            self.phi = EPS;
        } else if min_cos > -1.0 {
            self.phi = self.phi.min(min_cos.acos());
        }
    }
}
