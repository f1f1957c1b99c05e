//! Board assembly: the fixed ten-part skeleton and its authored transforms.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::catalog::Slot;
use crate::errors::{HalfpipeError, Result};
use crate::materials::MaterialSet;
use crate::scene::node::Node;
use crate::scene::scene::{Mesh, RenderFlags, Scene};
use crate::scene::transform::Transform;
use crate::scene::NodeKey;

/// The named parts every board mesh asset must expose. Exactly these ten;
/// a missing part is a fatal initialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartId {
    GripTape,
    Wheel1,
    Wheel2,
    Wheel3,
    Wheel4,
    Deck,
    Bolts,
    Baseplates,
    Truck1,
    Truck2,
}

impl PartId {
    pub const ALL: [PartId; 10] = [
        PartId::GripTape,
        PartId::Wheel1,
        PartId::Wheel2,
        PartId::Wheel3,
        PartId::Wheel4,
        PartId::Deck,
        PartId::Bolts,
        PartId::Baseplates,
        PartId::Truck1,
        PartId::Truck2,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PartId::GripTape => "GripTape",
            PartId::Wheel1 => "Wheel1",
            PartId::Wheel2 => "Wheel2",
            PartId::Wheel3 => "Wheel3",
            PartId::Wheel4 => "Wheel4",
            PartId::Deck => "Deck",
            PartId::Bolts => "Bolts",
            PartId::Baseplates => "Baseplates",
            PartId::Truck1 => "Truck1",
            PartId::Truck2 => "Truck2",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn is_wheel(self) -> bool {
        matches!(
            self,
            PartId::Wheel1 | PartId::Wheel2 | PartId::Wheel3 | PartId::Wheel4
        )
    }

    /// Which slot's material this part draws with. Grip tape uses the
    /// fixed grip material and is not slot-driven.
    #[must_use]
    pub fn slot(self) -> Option<Slot> {
        match self {
            PartId::GripTape => None,
            PartId::Wheel1 | PartId::Wheel2 | PartId::Wheel3 | PartId::Wheel4 => Some(Slot::Wheel),
            PartId::Deck => Some(Slot::Deck),
            PartId::Bolts => Some(Slot::Bolt),
            PartId::Baseplates | PartId::Truck1 | PartId::Truck2 => Some(Slot::Truck),
        }
    }

    /// The part's authored local transform within the assembly. These are
    /// fixed design constants, not derived values.
    #[must_use]
    pub const fn local_transform(self) -> PartTransform {
        match self {
            PartId::GripTape => PartTransform::at(0.0, 0.286, -0.002),
            PartId::Wheel1 => PartTransform::at(0.238, 0.086, 0.635),
            PartId::Wheel2 => PartTransform::at(-0.237, 0.086, 0.635),
            PartId::Wheel3 => PartTransform::flipped(0.237, 0.086, -0.635),
            PartId::Wheel4 => PartTransform::flipped(-0.238, 0.086, -0.635),
            PartId::Deck => PartTransform::at(0.0, 0.271, -0.002),
            PartId::Bolts => PartTransform::flipped(0.0, 0.198, 0.0),
            PartId::Baseplates => PartTransform::at(0.0, 0.211, 0.0),
            PartId::Truck1 => PartTransform::at(0.0, 0.101, -0.617),
            PartId::Truck2 => PartTransform::flipped(0.0, 0.101, 0.617),
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Authored local position and XYZ Euler rotation of one part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl PartTransform {
    const fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Vec3::ZERO,
        }
    }

    /// Rear-facing parts are authored rotated (π, 0, π).
    const fn flipped(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Vec3::new(PI, 0.0, PI),
        }
    }

    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// A fixed whole-board orientation preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Upright,
    Side,
}

impl Pose {
    /// Rotation (XYZ Euler) and position offset applied to the whole
    /// assembly.
    #[must_use]
    pub const fn offset(self) -> PartTransform {
        match self {
            Pose::Upright => PartTransform {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
            },
            Pose::Side => PartTransform {
                position: Vec3::new(0.0, 0.295, 0.0),
                rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
            },
        }
    }
}

/// An opaque geometry buffer reference from the host's mesh asset.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub id: Uuid,
    pub name: String,
}

impl Geometry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// The geometry-asset contract: one geometry per named board part.
#[derive(Debug)]
pub struct BoardGeometry {
    parts: FxHashMap<PartId, Geometry>,
}

impl BoardGeometry {
    /// Builds the contract from a mesh asset's named parts.
    ///
    /// Unknown part names are ignored (mesh assets may carry helper
    /// nodes); any missing required part aborts initialization.
    pub fn from_named_parts<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Geometry)>,
    {
        let mut map = FxHashMap::default();
        for (name, geometry) in parts {
            if let Some(part) = PartId::from_name(&name) {
                map.insert(part, geometry);
            }
        }
        for part in PartId::ALL {
            if !map.contains_key(&part) {
                return Err(HalfpipeError::MissingPart(part));
            }
        }
        Ok(Self { parts: map })
    }

    /// A complete geometry set with synthetic buffers. Stands in for the
    /// real mesh asset in headless hosts and tests.
    #[must_use]
    pub fn placeholder() -> Self {
        let parts = PartId::ALL
            .into_iter()
            .map(|p| (p, Geometry::new(p.name())))
            .collect();
        Self { parts }
    }

    #[must_use]
    pub fn part(&self, part: PartId) -> &Geometry {
        &self.parts[&part]
    }
}

/// The assembled board: one node per part under a pose root.
///
/// Part-to-material binding is 1:1 and stable. Nodes and meshes are
/// created exactly once; selection switches only mutate the referenced
/// materials in place.
pub struct BoardAssembly {
    root: NodeKey,
    parts: FxHashMap<PartId, NodeKey>,
    wheels: SmallVec<[NodeKey; 4]>,
    pose: Pose,
}

impl BoardAssembly {
    /// Builds the part hierarchy into `scene` and binds each part to its
    /// slot's material. All parts cast and receive shadows.
    pub fn build(
        scene: &mut Scene,
        geometry: &BoardGeometry,
        materials: &MaterialSet,
        pose: Pose,
    ) -> Self {
        let offset = pose.offset();
        let root = scene.add_node(Node::with_transform(Transform::from_position_rotation(
            offset.position,
            offset.rotation_quat(),
        )));

        let mut parts = FxHashMap::default();
        let mut wheels = SmallVec::new();

        for part in PartId::ALL {
            let local = part.local_transform();
            let node = scene.add_node(Node::with_transform(Transform::from_position_rotation(
                local.position,
                local.rotation_quat(),
            )));
            scene.attach(root, node);
            scene.set_mesh(
                node,
                Mesh {
                    geometry: geometry.part(part).id,
                    material: Self::material_id(part, materials),
                    flags: RenderFlags::CAST_SHADOW | RenderFlags::RECEIVE_SHADOW,
                },
            );
            if part.is_wheel() {
                wheels.push(node);
            }
            parts.insert(part, node);
        }

        Self {
            root,
            parts,
            wheels,
            pose,
        }
    }

    fn material_id(part: PartId, materials: &MaterialSet) -> Uuid {
        match part.slot() {
            None => materials.grip_tape().id(),
            Some(Slot::Wheel) => materials.wheel().id(),
            Some(Slot::Deck) => materials.deck().id(),
            Some(Slot::Truck) => materials.truck().id(),
            Some(Slot::Bolt) => materials.bolt().id(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    #[must_use]
    pub fn part_node(&self, part: PartId) -> NodeKey {
        self.parts[&part]
    }

    /// The four wheel nodes, in part order.
    #[must_use]
    pub fn wheels(&self) -> &[NodeKey] {
        &self.wheels
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Re-poses the whole assembly.
    pub fn set_pose(&mut self, scene: &mut Scene, pose: Pose) {
        if pose == self.pose {
            return;
        }
        self.pose = pose;
        let offset = pose.offset();
        if let Some(node) = scene.get_node_mut(self.root) {
            node.transform.position = offset.position;
            node.transform.rotation = offset.rotation_quat();
        }
    }
}
