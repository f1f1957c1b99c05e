//! Transform component.
//!
//! Wraps a node's position, rotation and scale (TRS) together with matrix
//! caching and dirty checking. The caches are refreshed by
//! [`Scene::update_world_transforms`](crate::scene::Scene::update_world_transforms)
//! once per frame.

use glam::{Affine3A, EulerRot, Quat, Vec3};

#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    // Matrix caches, read by the renderer.
    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // Shadow state for dirty checking.
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        let mut transform = Self::new();
        transform.position = position;
        transform.rotation = rotation;
        transform
    }

    /// Recomputes the local matrix if any TRS component changed since the
    /// last call. Returns whether a recompute happened.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// Forces a matrix recompute on the next update pass.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }

    /// Sets the rotation from XYZ Euler angles (radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Current rotation as XYZ Euler angles.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Orients the transform to look at `target` from its current position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (self.position - target).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);
        self.rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, forward));
    }

    /// World transformation matrix (valid after the frame's update pass).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// Local transformation matrix (valid after the frame's update pass).
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
