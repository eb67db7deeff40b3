//! Building Engine
//!
//! The placement and contact-resolution core: shape catalog, transform
//! utilities, contact resolver, structure grouper, history manager, and the
//! placement session that orchestrates them.

pub mod catalog;
pub mod contact;
pub mod history;
pub mod session;
pub mod structure;
pub mod transform;
pub mod types;

pub use self::catalog::{MATERIAL_NAMES, MaterialId, ShapeKind};
pub use self::contact::{ResolvedPlacement, resolve_contact};
pub use self::history::{History, MAX_HISTORY_DEPTH, SceneSnapshot};
pub use self::session::{Axis, BuilderSession, EditorMode, ROTATE_STEP};
pub use self::structure::{
    GroupError, RelativeBlock, StructureDefinition, create_structure, instantiate,
};
pub use self::transform::{
    AxisInput, Footprint, PlacementGrid, TILT_THRESHOLD, footprint, normalize_rotation,
    normalize_scale, physical_height, snap,
};
pub use self::types::{
    EntityId, HitContext, HitTarget, PendingObject, PlacedBlock, PlacedEntity, PlacedGroup,
    Transform,
};
