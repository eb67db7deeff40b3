//! Transform Utilities
//!
//! Pure normalization and extent helpers, plus the placement grid
//! configuration used by the contact resolver. The normalization functions
//! are total: rotation and scale routinely arrive from loosely-typed project
//! files, so malformed or missing values fall back to defaults instead of
//! erroring.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::building::catalog::ShapeKind;

/// Tilt threshold on `|sin(angle)|`. Past this about X or Z the object is
/// treated as toppled onto a side face; about Y it counts as a quarter turn.
pub const TILT_THRESHOLD: f32 = 0.5;

/// Rotation or scale as found in project data: either a single scalar or a
/// full per-axis triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisInput {
    Uniform(f32),
    PerAxis([f32; 3]),
}

/// Canonical Euler rotation from loose input. A bare scalar means a Y-axis
/// rotation; anything invalid or missing yields zero rotation.
pub fn normalize_rotation(value: Option<AxisInput>) -> Vec3 {
    match value {
        Some(AxisInput::Uniform(y)) if y.is_finite() => Vec3::new(0.0, y, 0.0),
        Some(AxisInput::PerAxis(v)) if v.iter().all(|c| c.is_finite()) => Vec3::from_array(v),
        _ => Vec3::ZERO,
    }
}

/// Canonical per-axis scale from loose input. A bare scalar scales
/// uniformly; anything invalid, missing, or non-positive yields unit scale.
pub fn normalize_scale(value: Option<AxisInput>) -> Vec3 {
    match value {
        Some(AxisInput::Uniform(s)) if s.is_finite() && s > 0.0 => Vec3::splat(s),
        Some(AxisInput::PerAxis(v)) if v.iter().all(|c| c.is_finite() && *c > 0.0) => {
            Vec3::from_array(v)
        }
        _ => Vec3::ONE,
    }
}

/// Lateral extent of a placement guide along world X/Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

/// World-vertical extent of an object under scale and tilt.
///
/// This is the documented threshold approximation, not an oriented
/// bounding-box projection: tilted past the threshold about X or Z, the
/// object is assumed to have toppled onto a side face with extent `scale.x`.
/// The X tilt is tested first.
pub fn physical_height(shape: ShapeKind, scale: Vec3, rotation: Vec3) -> f32 {
    if rotation.x.sin().abs() > TILT_THRESHOLD || rotation.z.sin().abs() > TILT_THRESHOLD {
        return scale.x;
    }
    shape.base_height() * scale.y
}

/// Post-rotation X/Z extents. A quarter turn about Y swaps width and depth;
/// any lesser rotation keeps the unrotated extents.
pub fn footprint(scale: Vec3, rotation: Vec3) -> Footprint {
    if rotation.y.sin().abs() > TILT_THRESHOLD {
        Footprint {
            width: scale.z,
            depth: scale.x,
        }
    } else {
        Footprint {
            width: scale.x,
            depth: scale.z,
        }
    }
}

/// Snap a value to the nearest multiple of `step`.
pub fn snap(value: f32, step: f32) -> f32 {
    (value / step).round() * step
}

/// Grid configuration for contact resolution.
#[derive(Clone, Copy, Debug)]
pub struct PlacementGrid {
    /// Snap step for resolved X/Z.
    pub lateral: f32,
    /// Snap step for resolved Y.
    pub vertical: f32,
    /// Downward nudge applied when stacking on an upward face, so the new
    /// object strictly overlaps the surface instead of z-fighting on a
    /// shared plane.
    pub stack_epsilon: f32,
}

impl Default for PlacementGrid {
    fn default() -> Self {
        Self {
            lateral: 0.5,
            vertical: 0.25,
            stack_epsilon: 0.002,
        }
    }
}

impl PlacementGrid {
    pub fn snap_lateral(&self, value: f32) -> f32 {
        snap(value, self.lateral)
    }

    pub fn snap_vertical(&self, value: f32) -> f32 {
        snap(value, self.vertical)
    }
}
