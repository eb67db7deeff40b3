//! Shape Catalog
//!
//! Closed registry of the buildable shapes and the material palette.
//! Every shape carries its unscaled base dimensions here; nothing else in
//! the crate branches on shape names, so adding a shape is one variant plus
//! its match arms in this file.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A buildable shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cube,
    Slab,
    Column,
    Slope,
    Arch,
    Wedge,
}

impl ShapeKind {
    /// All shapes, in toolbar order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cube,
        ShapeKind::Slab,
        ShapeKind::Column,
        ShapeKind::Slope,
        ShapeKind::Arch,
        ShapeKind::Wedge,
    ];

    /// Unscaled height along the local Y axis, before scale is applied.
    pub fn base_height(self) -> f32 {
        match self {
            ShapeKind::Cube => 1.0,
            ShapeKind::Slab => 0.5,
            ShapeKind::Column => 2.0,
            ShapeKind::Slope => 1.0,
            ShapeKind::Arch => 2.0,
            ShapeKind::Wedge => 1.0,
        }
    }

    /// Scale applied when the shape is first selected as the pending object.
    pub fn default_scale(self) -> Vec3 {
        match self {
            ShapeKind::Column => Vec3::new(0.5, 1.0, 0.5),
            ShapeKind::Arch => Vec3::new(1.0, 1.0, 0.5),
            _ => Vec3::ONE,
        }
    }

    /// Name shown by the toolbar.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Slab => "Slab",
            ShapeKind::Column => "Column",
            ShapeKind::Slope => "Slope",
            ShapeKind::Arch => "Arch",
            ShapeKind::Wedge => "Wedge",
        }
    }
}

/// Material palette index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u8);

/// Display names for the material palette.
pub const MATERIAL_NAMES: [&str; 8] = [
    "Stone Gray",
    "Stone Light",
    "Stone Dark",
    "Wood Brown",
    "Wood Light",
    "Wood Dark",
    "Metal Iron",
    "Metal Bronze",
];

impl MaterialId {
    pub fn display_name(self) -> &'static str {
        MATERIAL_NAMES
            .get(self.0 as usize)
            .copied()
            .unwrap_or("Unknown")
    }
}
