//! Scene node.

use glam::Affine3A;

use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeKey};

/// A scene node: hierarchy, transform and an optional mesh binding.
///
/// Nodes form a tree through parent/child handles. Board parts are created
/// once at assembly time and reused across frames; a part's node identity
/// never changes, only the contents of the material its mesh points at.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    pub transform: Transform,
    pub visible: bool,
    pub mesh: Option<MeshKey>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
        }
    }

    #[must_use]
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::new()
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// World matrix shorthand; valid after the frame's transform pass.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
