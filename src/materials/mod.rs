//! Materials and their resolution from the current selection.
//!
//! Materials are plain parameter blocks with a stable identity ([`Uuid`])
//! and a version counter. Renderers key GPU-side rebuilds off the version;
//! the customizer core guarantees a material's version only moves when its
//! own resolved input (texture identity or color value) changes.

pub mod set;

use std::borrow::Cow;

use glam::{Vec2, Vec4};
use uuid::Uuid;

use crate::assets::TextureHandle;

pub use set::{
    DEFAULT_BOLT_COLOR, DEFAULT_DECK_TEXTURE, DEFAULT_TRUCK_COLOR, DEFAULT_WHEEL_TEXTURE,
    MaterialSet, ResolvedTextureSet, resolve_texture_set,
};

/// A physically-based material parameter block.
///
/// There is one instance per board slot plus the fixed grip-tape material.
/// Instances are created once and mutated in place; their [`id`](Self::id)
/// never changes, so mesh bindings stay referentially stable across
/// selection switches.
#[derive(Debug, Clone)]
pub struct StandardMaterial {
    id: Uuid,
    version: u64,

    pub name: Cow<'static, str>,
    pub color: Vec4,
    pub roughness: f32,
    pub metalness: f32,

    pub map: Option<TextureHandle>,
    pub map_repeat: Vec2,
    pub normal_map: Option<TextureHandle>,
    pub normal_scale: Vec2,
    pub roughness_map: Option<TextureHandle>,
    pub bump_map: Option<TextureHandle>,
    pub bump_scale: f32,
    pub anisotropy: u16,
}

impl StandardMaterial {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            color: Vec4::ONE,
            roughness: 1.0,
            metalness: 0.0,
            map: None,
            map_repeat: Vec2::ONE,
            normal_map: None,
            normal_scale: Vec2::ONE,
            roughness_map: None,
            bump_map: None,
            bump_scale: 1.0,
            anisotropy: 1,
        }
    }

    /// Stable identity. Mesh bindings reference materials by this id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Monotonic change counter; bumped exactly when this material's own
    /// resolved input changed.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Marks the parameter block as modified.
    pub(crate) fn mark_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Parses a `#rrggbb` color string into a linear-alpha RGBA vector.
///
/// Anything unparsable yields `None`; callers substitute the slot's
/// neutral default.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<Vec4> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Vec4::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        1.0,
    ))
}
