//! Scene container.

use bitflags::bitflags;
use glam::{Affine3A, Vec3, Vec4};
use slotmap::SlotMap;
use uuid::Uuid;

use crate::scene::node::Node;
use crate::scene::{MeshKey, NodeKey};

bitflags! {
    /// Per-mesh render behavior.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u32 {
        const CAST_SHADOW    = 1 << 0;
        const RECEIVE_SHADOW = 1 << 1;
    }
}

/// A drawable binding: geometry plus material, both referenced by stable id.
///
/// The binding itself never changes after assembly; selection switches
/// mutate the referenced material in place.
#[derive(Debug, Clone, Copy)]
pub struct Mesh {
    pub geometry: Uuid,
    pub material: Uuid,
    pub flags: RenderFlags,
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Vec4,
    pub near: f32,
    pub far: f32,
}

/// Environment lighting settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub intensity: f32,
    pub ambient_color: Vec3,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            ambient_color: Vec3::ZERO,
        }
    }
}

/// The scene graph: node arena, mesh pool, and global stage settings.
#[derive(Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,
    pub meshes: SlotMap<MeshKey, Mesh>,

    pub environment: Environment,
    pub background: Option<Vec4>,
    pub fog: Option<Fog>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node as a root.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Attaches `child` under `parent`, removing it from the roots.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.root_nodes.retain(|&k| k != child);
    }

    /// Binds a mesh to `node`, returning the mesh key.
    pub fn set_mesh(&mut self, node: NodeKey, mesh: Mesh) -> MeshKey {
        let key = self.meshes.insert(mesh);
        if let Some(node) = self.nodes.get_mut(node) {
            node.mesh = Some(key);
        }
        key
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Refreshes local and world matrices across the whole graph.
    ///
    /// Dirty-checked: a subtree is recomputed only when its own or an
    /// ancestor's local transform changed.
    pub fn update_world_transforms(&mut self) {
        let roots: Vec<NodeKey> = self.root_nodes.clone();
        for root in roots {
            self.propagate(root, Affine3A::IDENTITY, false);
        }
    }

    fn propagate(&mut self, key: NodeKey, parent_world: Affine3A, parent_changed: bool) {
        let (world, changed, children) = {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            let local_changed = node.transform.update_local_matrix();
            let changed = local_changed || parent_changed;
            if changed {
                node.transform.world_matrix = parent_world * node.transform.local_matrix;
            }
            (
                node.transform.world_matrix,
                changed,
                node.children.clone(),
            )
        };
        for child in children {
            self.propagate(child, world, changed);
        }
    }
}
