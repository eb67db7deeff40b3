//! Structure Grouper
//!
//! Converts a selection of placed blocks into a reusable, pivot-relative
//! structure definition, and instantiates definitions back into the scene as
//! placed groups. The pivot is the lowest block of the original selection;
//! all offsets are stored relative to it.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::building::catalog::{MaterialId, ShapeKind};
use crate::building::types::{EntityId, PlacedBlock, PlacedEntity, PlacedGroup, Transform};

/// Grouping precondition failures. Both leave the placed-entity collection
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("cannot create a structure from an empty selection")]
    EmptySelection,
    #[error("structures cannot contain other structure instances")]
    NestedGroupNotAllowed,
}

/// One block of a structure, stored relative to the structure pivot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeBlock {
    pub shape: ShapeKind,
    pub material: MaterialId,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Offset from the pivot block's original world position.
    pub relative_position: Vec3,
}

/// A reusable multi-block prefab. Immutable once created; placed groups
/// share it by reference.
///
/// Invariant: block 0 is the pivot, the block with the minimum world Y among
/// the originally selected blocks, and its `relative_position` is zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureDefinition {
    pub name: String,
    pub blocks: Vec<RelativeBlock>,
}

impl StructureDefinition {
    /// The pivot block. Also serves as the representative physical envelope
    /// during contact resolution.
    pub fn pivot(&self) -> &RelativeBlock {
        &self.blocks[0]
    }

    /// Expand the definition to world-space sub-block transforms at the
    /// given group transform.
    ///
    /// Relative offsets rotate with the group frame; block and group Euler
    /// rotations compose by component addition, which is exact for the
    /// single-axis quarter turns the editor produces.
    pub fn world_blocks(&self, group: &Transform) -> Vec<(ShapeKind, MaterialId, Transform)> {
        let frame = group.rotation_quat();
        self.blocks
            .iter()
            .map(|block| {
                let position = group.position + frame * block.relative_position;
                let transform =
                    Transform::new(position, block.rotation + group.rotation, block.scale);
                (block.shape, block.material, transform)
            })
            .collect()
    }
}

/// Build a pivot-relative definition from the selected entities.
///
/// The selection is sorted ascending by world Y; equal heights keep the
/// selection order, so the pivot choice is deterministic up to the input
/// ordering. Rotation and scale are carried through unchanged. Fails with
/// no side effects if the selection is empty or contains a group.
pub fn create_structure(
    name: impl Into<String>,
    selection: &[&PlacedEntity],
) -> Result<StructureDefinition, GroupError> {
    if selection.is_empty() {
        return Err(GroupError::EmptySelection);
    }

    let mut blocks: Vec<&PlacedBlock> = Vec::with_capacity(selection.len());
    for entity in selection {
        match entity {
            PlacedEntity::Block(block) => blocks.push(block),
            PlacedEntity::Group(_) => return Err(GroupError::NestedGroupNotAllowed),
        }
    }

    // Stable sort: ties keep the original selection order.
    blocks.sort_by(|a, b| a.transform.position.y.total_cmp(&b.transform.position.y));

    let pivot_position = blocks[0].transform.position;
    let blocks = blocks
        .into_iter()
        .map(|block| RelativeBlock {
            shape: block.shape,
            material: block.material,
            rotation: block.transform.rotation,
            scale: block.transform.scale,
            relative_position: block.transform.position - pivot_position,
        })
        .collect();

    Ok(StructureDefinition {
        name: name.into(),
        blocks,
    })
}

/// Wrap a definition as a placed group at the given world position and
/// rotation. No block copying happens; the group references the shared
/// definition.
pub fn instantiate(
    definition: Arc<StructureDefinition>,
    id: EntityId,
    position: Vec3,
    rotation: Vec3,
) -> PlacedGroup {
    PlacedGroup {
        id,
        definition,
        transform: Transform::new(position, rotation, Vec3::ONE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_at(id: u32, position: Vec3) -> PlacedEntity {
        PlacedEntity::Block(PlacedBlock {
            id: EntityId(id),
            shape: ShapeKind::Cube,
            material: MaterialId(0),
            transform: Transform::from_position(position),
        })
    }

    #[test]
    fn test_pivot_is_lowest_block() {
        let a = block_at(1, Vec3::new(0.0, 1.5, 0.0));
        let b = block_at(2, Vec3::new(1.0, 0.5, 0.0));
        let def = create_structure("tower", &[&a, &b]).unwrap();

        assert_eq!(def.blocks[0].relative_position, Vec3::ZERO);
        assert_eq!(def.blocks[1].relative_position, Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn test_equal_heights_keep_selection_order() {
        let a = block_at(1, Vec3::new(2.0, 0.5, 0.0));
        let b = block_at(2, Vec3::new(0.0, 0.5, 0.0));
        let def = create_structure("row", &[&a, &b]).unwrap();

        // Both at y = 0.5: the first selected block stays the pivot.
        assert_eq!(def.blocks[0].relative_position, Vec3::ZERO);
        assert_eq!(def.blocks[1].relative_position, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_selection_fails() {
        assert_eq!(
            create_structure("nothing", &[]).unwrap_err(),
            GroupError::EmptySelection
        );
    }

    #[test]
    fn test_nested_group_fails() {
        let block = block_at(1, Vec3::new(0.0, 0.5, 0.0));
        let def = Arc::new(create_structure("inner", &[&block]).unwrap());
        let group = PlacedEntity::Group(instantiate(def, EntityId(2), Vec3::ZERO, Vec3::ZERO));

        assert_eq!(
            create_structure("outer", &[&block, &group]).unwrap_err(),
            GroupError::NestedGroupNotAllowed
        );
    }

    #[test]
    fn test_reinstantiation_reproduces_world_positions() {
        let origin = Vec3::new(3.0, 0.5, -2.0);
        let offsets = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        let entities: Vec<PlacedEntity> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| block_at(i as u32 + 1, origin + *offset))
            .collect();
        let refs: Vec<&PlacedEntity> = entities.iter().collect();
        let def = create_structure("cluster", &refs).unwrap();

        // Identity rotation at the original pivot position: exact round trip.
        let expanded = def.world_blocks(&Transform::from_position(origin));
        assert_eq!(expanded.len(), offsets.len());
        for ((_, _, transform), offset) in expanded.iter().zip(offsets.iter()) {
            assert!((transform.position - (origin + *offset)).length() < 1e-6);
        }
    }

    #[test]
    fn test_world_blocks_rotate_with_group_frame() {
        let a = block_at(1, Vec3::new(0.0, 0.5, 0.0));
        let b = block_at(2, Vec3::new(1.0, 0.5, 0.0));
        let def = create_structure("pair", &[&a, &b]).unwrap();

        let group = Transform::new(
            Vec3::new(10.0, 0.5, 0.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::ONE,
        );
        let expanded = def.world_blocks(&group);
        // The +X offset swings to -Z under the quarter turn.
        assert!((expanded[1].2.position - Vec3::new(10.0, 0.5, -1.0)).length() < 1e-5);
        assert!((expanded[1].2.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
