//! Contact Resolver
//!
//! Computes where the pending object should rest, given a pointer-ray hit
//! against the ground or an existing entity. Pure: the resolver reads the
//! hit, the pending object's envelope, and the optional height lock, and
//! touches no session state. It is simply not invoked when the pointer is
//! over no surface.

use glam::Vec3;

use crate::building::transform::{Footprint, PlacementGrid, footprint, physical_height};
use crate::building::types::{HitContext, HitTarget, PendingObject};

/// Assumed physical height of a group hit on a side face; per-sub-block
/// height is not tracked at the group level.
const GROUP_TARGET_HEIGHT: f32 = 1.0;

/// A resolved pending placement: the resting position plus the lateral
/// footprint the caller uses to size the placement guide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPlacement {
    pub position: Vec3,
    pub footprint: Footprint,
}

/// Resolve the resting position for the pending object against a hit.
///
/// With `height_lock` set, the vertical coordinate is frozen at the locked
/// value and the object slides freely under the cursor: no surface logic,
/// no normal offset. Otherwise the vertical comes from the contact surface
/// and the horizontal from the impact point pushed outward along the normal
/// by half the footprint, so the new object's face touches rather than
/// overlaps the surface it was placed against.
pub fn resolve_contact(
    hit: &HitContext,
    pending: &PendingObject,
    height_lock: Option<f32>,
    grid: &PlacementGrid,
) -> ResolvedPlacement {
    let (shape, scale, rotation) = pending.envelope();
    let guide = footprint(scale, rotation);
    let my_height = physical_height(shape, scale, rotation);

    let y = match height_lock {
        Some(locked) => locked,
        None => resolve_vertical(hit, my_height, grid),
    };

    let (x, z) = if height_lock.is_some() {
        (hit.point.x, hit.point.z)
    } else {
        (
            hit.point.x + hit.normal.x * guide.width * 0.5,
            hit.point.z + hit.normal.z * guide.depth * 0.5,
        )
    };

    ResolvedPlacement {
        position: Vec3::new(grid.snap_lateral(x), y, grid.snap_lateral(z)),
        footprint: guide,
    }
}

fn resolve_vertical(hit: &HitContext, my_height: f32, grid: &PlacementGrid) -> f32 {
    let half = my_height * 0.5;
    match &hit.target {
        HitTarget::Ground => grid.snap_vertical(half),
        // Stacking on top: the resting surface is exactly the impact point,
        // which tolerates non-cube tops. Nudged down instead of quantized so
        // the surfaces strictly overlap.
        HitTarget::Block { .. } | HitTarget::Group { .. } if hit.normal.y > 0.5 => {
            hit.point.y + half - grid.stack_epsilon
        }
        // Placing underneath: align to the target's own center height.
        // Intentionally asymmetric with the upward case; undersides are rare
        // and approximate alignment suffices.
        HitTarget::Block { transform, .. } | HitTarget::Group { transform }
            if hit.normal.y < -0.5 =>
        {
            grid.snap_vertical(transform.position.y + half)
        }
        // Side face: align to the target's floor level.
        HitTarget::Block { transform, shape } => {
            let target_height = physical_height(*shape, transform.scale, transform.rotation);
            grid.snap_vertical(transform.position.y - target_height * 0.5 + half)
        }
        HitTarget::Group { transform } => {
            grid.snap_vertical(transform.position.y - GROUP_TARGET_HEIGHT * 0.5 + half)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::catalog::{MaterialId, ShapeKind};
    use crate::building::types::Transform;
    use std::f32::consts::FRAC_PI_2;

    fn unit_cube() -> PendingObject {
        PendingObject::Block {
            shape: ShapeKind::Cube,
            material: MaterialId(0),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    fn ground_hit(point: Vec3) -> HitContext {
        HitContext {
            point,
            normal: Vec3::Y,
            target: HitTarget::Ground,
        }
    }

    #[test]
    fn test_unit_cube_rests_on_ground_at_half_height() {
        let grid = PlacementGrid::default();
        let resolved = resolve_contact(&ground_hit(Vec3::ZERO), &unit_cube(), None, &grid);
        assert_eq!(resolved.position, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_ground_horizontal_snaps_to_half_units() {
        let grid = PlacementGrid::default();
        let resolved = resolve_contact(
            &ground_hit(Vec3::new(1.3, 0.0, -0.7)),
            &unit_cube(),
            None,
            &grid,
        );
        assert_eq!(resolved.position.x, 1.5);
        assert_eq!(resolved.position.z, -0.5);
    }

    #[test]
    fn test_stacking_rests_on_impact_point_with_epsilon() {
        let grid = PlacementGrid::default();
        let hit = HitContext {
            point: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::Y,
            target: HitTarget::Block {
                transform: Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
                shape: ShapeKind::Cube,
            },
        };
        let resolved = resolve_contact(&hit, &unit_cube(), None, &grid);
        // 1.0 + 0.5 - 0.002, deliberately off the vertical grid.
        assert!((resolved.position.y - 1.498).abs() < 1e-6);
    }

    #[test]
    fn test_side_face_aligns_to_target_floor_and_offsets_outward() {
        let grid = PlacementGrid::default();
        let target = Transform::from_position(Vec3::new(0.0, 0.5, 0.0));
        let hit = HitContext {
            point: Vec3::new(0.5, 0.7, 0.0),
            normal: Vec3::X,
            target: HitTarget::Block {
                transform: target,
                shape: ShapeKind::Cube,
            },
        };
        let resolved = resolve_contact(&hit, &unit_cube(), None, &grid);
        // Floor of the target is 0.0; offset along +X by half the footprint.
        assert_eq!(resolved.position, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_underside_aligns_to_target_center() {
        let grid = PlacementGrid::default();
        let hit = HitContext {
            point: Vec3::new(0.0, 1.5, 0.0),
            normal: -Vec3::Y,
            target: HitTarget::Block {
                transform: Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
                shape: ShapeKind::Cube,
            },
        };
        let resolved = resolve_contact(&hit, &unit_cube(), None, &grid);
        assert_eq!(resolved.position.y, 2.5);
    }

    #[test]
    fn test_group_side_face_assumes_unit_height() {
        let grid = PlacementGrid::default();
        let hit = HitContext {
            point: Vec3::new(0.5, 0.5, 0.0),
            normal: Vec3::X,
            target: HitTarget::Group {
                transform: Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
            },
        };
        let resolved = resolve_contact(&hit, &unit_cube(), None, &grid);
        assert_eq!(resolved.position.y, 0.5);
    }

    #[test]
    fn test_height_lock_bypasses_all_surface_logic() {
        let grid = PlacementGrid::default();
        let hit = HitContext {
            point: Vec3::new(3.2, 7.0, -1.1),
            normal: Vec3::Y,
            target: HitTarget::Block {
                transform: Transform::from_position(Vec3::new(3.0, 6.5, -1.0)),
                shape: ShapeKind::Cube,
            },
        };
        let resolved = resolve_contact(&hit, &unit_cube(), Some(0.5), &grid);
        assert_eq!(resolved.position.y, 0.5);
        // Horizontal tracks the raw impact point (quantized), with no
        // normal-based offset.
        assert_eq!(resolved.position.x, 3.0);
        assert_eq!(resolved.position.z, -1.0);
    }

    #[test]
    fn test_tilted_pending_uses_side_extent_on_ground() {
        let grid = PlacementGrid::default();
        let pending = PendingObject::Block {
            shape: ShapeKind::Cube,
            material: MaterialId(0),
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        let resolved = resolve_contact(&ground_hit(Vec3::ZERO), &pending, None, &grid);
        // Toppled: physical height is scale.x = 2.0, so it rests at 1.0.
        assert_eq!(resolved.position.y, 1.0);
    }

    #[test]
    fn test_footprint_returned_for_guide() {
        let grid = PlacementGrid::default();
        let pending = PendingObject::Block {
            shape: ShapeKind::Cube,
            material: MaterialId(0),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        let resolved = resolve_contact(&ground_hit(Vec3::ZERO), &pending, None, &grid);
        assert_eq!(resolved.footprint.width, 1.0);
        assert_eq!(resolved.footprint.depth, 2.0);
    }
}
