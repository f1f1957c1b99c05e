//! Scene graph and board assembly.
//!
//! - [`Node`] / [`Transform`] / [`Scene`]: a minimal hierarchical scene
//!   graph with dirty-checked local/world matrix caches.
//! - [`BoardGeometry`] / [`BoardAssembly`]: the fixed ten-part board
//!   skeleton, its authored per-part transforms, and the pose presets.

pub mod board;
pub mod node;
pub mod scene;
pub mod transform;

pub use board::{BoardAssembly, BoardGeometry, Geometry, PartId, PartTransform, Pose};
pub use node::Node;
pub use scene::{Environment, Fog, Mesh, RenderFlags, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MeshKey;
}
