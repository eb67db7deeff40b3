//! Core Data Model
//!
//! Shared types for the placement engine: world transforms, placed entities,
//! the pending object tracking the pointer, and the ray-hit context handed
//! in by the external scene-intersection collaborator.

use std::sync::Arc;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::building::catalog::{MaterialId, ShapeKind};
use crate::building::structure::StructureDefinition;

/// Unique id of a placed entity (block or group).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// World transform. Scale is applied first, then rotation (Euler angles in
/// radians, X then Y then Z), then translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Identity rotation and unit scale at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::ONE)
    }

    /// The rotation as a quaternion, composed X then Y then Z.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// A single placed block.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBlock {
    pub id: EntityId,
    pub shape: ShapeKind,
    pub material: MaterialId,
    pub transform: Transform,
}

/// A placed structure instance. References its definition, never copies it;
/// behaves as one entity for selection, removal, and history.
#[derive(Clone, Debug)]
pub struct PlacedGroup {
    pub id: EntityId,
    pub definition: Arc<StructureDefinition>,
    pub transform: Transform,
}

impl PlacedGroup {
    /// World-space sub-block transforms, for the external raycaster's
    /// per-sub-block hitboxes and for rendering.
    pub fn world_blocks(&self) -> Vec<(ShapeKind, MaterialId, Transform)> {
        self.definition.world_blocks(&self.transform)
    }
}

/// Anything living in the placed-entity collection.
#[derive(Clone, Debug)]
pub enum PlacedEntity {
    Block(PlacedBlock),
    Group(PlacedGroup),
}

impl PlacedEntity {
    pub fn id(&self) -> EntityId {
        match self {
            PlacedEntity::Block(block) => block.id,
            PlacedEntity::Group(group) => group.id,
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            PlacedEntity::Block(block) => &block.transform,
            PlacedEntity::Group(group) => &group.transform,
        }
    }
}

/// The object currently being positioned. It has no position of its own;
/// the contact resolver computes one fresh on every pointer move.
#[derive(Clone, Debug)]
pub enum PendingObject {
    Block {
        shape: ShapeKind,
        material: MaterialId,
        rotation: Vec3,
        scale: Vec3,
    },
    Structure {
        definition: Arc<StructureDefinition>,
        rotation: Vec3,
    },
}

impl PendingObject {
    /// Representative physical envelope as (shape, scale, rotation).
    ///
    /// A structure is represented by its pivot block, with the pending
    /// rotation added onto the pivot's own Euler angles. Multi-height
    /// structures therefore resolve contact from the pivot alone; a known
    /// simplification.
    pub fn envelope(&self) -> (ShapeKind, Vec3, Vec3) {
        match self {
            PendingObject::Block {
                shape,
                scale,
                rotation,
                ..
            } => (*shape, *scale, *rotation),
            PendingObject::Structure {
                definition,
                rotation,
            } => {
                let pivot = definition.pivot();
                (pivot.shape, pivot.scale, pivot.rotation + *rotation)
            }
        }
    }
}

/// Ray-hit context delivered by the external raycasting collaborator. The
/// core consumes hit results; it never intersects rays itself.
#[derive(Clone, Debug)]
pub struct HitContext {
    /// World-space impact point.
    pub point: Vec3,
    /// Unit-length surface normal at the impact point.
    pub normal: Vec3,
    /// What the ray struck.
    pub target: HitTarget,
}

/// The entity a pointer ray struck.
#[derive(Clone, Debug)]
pub enum HitTarget {
    /// The ground plane at y = 0.
    Ground,
    /// A placed block, with its world transform and shape.
    Block {
        transform: Transform,
        shape: ShapeKind,
    },
    /// A placed group. Sub-block shape and height are not resolved at the
    /// group level.
    Group { transform: Transform },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_quat_y_quarter_turn() {
        let tf = Transform::new(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ONE);
        let rotated = tf.rotation_quat() * Vec3::X;
        // +X turns to -Z under a positive quarter turn about Y.
        assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_pending_block_envelope() {
        let pending = PendingObject::Block {
            shape: ShapeKind::Slab,
            material: MaterialId(1),
            rotation: Vec3::new(0.0, 0.3, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        let (shape, scale, rotation) = pending.envelope();
        assert_eq!(shape, ShapeKind::Slab);
        assert_eq!(scale, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(rotation, Vec3::new(0.0, 0.3, 0.0));
    }
}
