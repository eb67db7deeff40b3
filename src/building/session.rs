//! Placement Session
//!
//! The orchestrator. Owns the placed-entity collection, the active tool
//! state, the structure library, and the undo history; resolves the pending
//! placement on every pointer move and commits entities with the
//! snapshot-then-mutate discipline. Keyboard and mouse behavior arrives as
//! explicit commands on this type; the session registers no listeners of
//! its own. Everything runs synchronously inside the caller's notification
//! turn.

use std::sync::Arc;

use glam::Vec3;
use log::{debug, info};

use crate::building::catalog::{MaterialId, ShapeKind};
use crate::building::contact::{ResolvedPlacement, resolve_contact};
use crate::building::history::History;
use crate::building::structure::{self, GroupError, StructureDefinition};
use crate::building::transform::{AxisInput, PlacementGrid, normalize_scale};
use crate::building::types::{
    EntityId, HitContext, PendingObject, PlacedBlock, PlacedEntity, Transform,
};

/// Rotation step applied by [`BuilderSession::rotate`].
pub const ROTATE_STEP: f32 = std::f32::consts::FRAC_PI_2;

/// Top-level editor mode. Pointer moves and commits are processed only in
/// `Construct`; selection commands only in `Select`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Construct,
    Select,
    View,
}

/// Rotation axis for the `rotate` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The placement session.
pub struct BuilderSession {
    entities: Vec<PlacedEntity>,
    definitions: Vec<Arc<StructureDefinition>>,
    history: History,
    grid: PlacementGrid,
    mode: EditorMode,
    pending: PendingObject,
    resolved: Option<ResolvedPlacement>,
    height_lock: Option<f32>,
    /// Selected entity ids in selection order.
    selection: Vec<EntityId>,
    next_id: u32,
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderSession {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            definitions: Vec::new(),
            history: History::new(),
            grid: PlacementGrid::default(),
            mode: EditorMode::Construct,
            pending: PendingObject::Block {
                shape: ShapeKind::Cube,
                material: MaterialId(0),
                rotation: Vec3::ZERO,
                scale: ShapeKind::Cube.default_scale(),
            },
            resolved: None,
            height_lock: None,
            selection: Vec::new(),
            next_id: 1,
        }
    }

    // ------------------------------------------------------------------
    // Read surface for collaborators (rendering, UI affordances)
    // ------------------------------------------------------------------

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn definitions(&self) -> &[Arc<StructureDefinition>] {
        &self.definitions
    }

    /// The currently resolved pending placement, for the placement guide
    /// and the translucent preview.
    pub fn resolved(&self) -> Option<&ResolvedPlacement> {
        self.resolved.as_ref()
    }

    pub fn pending(&self) -> &PendingObject {
        &self.pending
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn height_lock(&self) -> Option<f32> {
        self.height_lock
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Tool commands
    // ------------------------------------------------------------------

    /// Switch editor mode. Leaving `Construct` clears the height lock and
    /// the cached resolution as a side effect.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        if mode != EditorMode::Construct {
            self.height_lock = None;
            self.resolved = None;
        }
    }

    /// Step the pending object's rotation a quarter turn about the axis.
    pub fn rotate(&mut self, axis: Axis) {
        let rotation = match &mut self.pending {
            PendingObject::Block { rotation, .. } => rotation,
            PendingObject::Structure { rotation, .. } => rotation,
        };
        match axis {
            Axis::X => rotation.x += ROTATE_STEP,
            Axis::Y => rotation.y += ROTATE_STEP,
            Axis::Z => rotation.z += ROTATE_STEP,
        }
    }

    /// Arm a single block as the pending object, keeping the current
    /// material and rotation where they exist.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        let (material, rotation) = match &self.pending {
            PendingObject::Block {
                material, rotation, ..
            } => (*material, *rotation),
            PendingObject::Structure { rotation, .. } => (MaterialId(0), *rotation),
        };
        self.pending = PendingObject::Block {
            shape,
            material,
            rotation,
            scale: shape.default_scale(),
        };
    }

    pub fn set_material(&mut self, material: MaterialId) {
        if let PendingObject::Block { material: m, .. } = &mut self.pending {
            *m = material;
        }
    }

    /// Set the pending block's scale. Non-positive or non-finite components
    /// fall back to unit scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        if let PendingObject::Block { scale: s, .. } = &mut self.pending {
            *s = normalize_scale(Some(AxisInput::PerAxis(scale.to_array())));
        }
    }

    /// Arm a previously created structure as the pending object.
    pub fn arm_structure(&mut self, name: &str) -> bool {
        let Some(definition) = self.definitions.iter().find(|d| d.name == name) else {
            return false;
        };
        self.pending = PendingObject::Structure {
            definition: Arc::clone(definition),
            rotation: Vec3::ZERO,
        };
        true
    }

    /// Engage or release the height lock. Engaging captures the vertical
    /// coordinate of the currently resolved placement, if one exists; while
    /// held, every subsequent resolution keeps that Y and tracks the
    /// pointer horizontally only.
    pub fn set_height_lock(&mut self, active: bool) {
        self.height_lock = if active {
            self.resolved.map(|r| r.position.y)
        } else {
            None
        };
    }

    // ------------------------------------------------------------------
    // Pointer and commit
    // ------------------------------------------------------------------

    /// Resolve the pending placement for a pointer movement. A `None` hit
    /// (pointer over no surface) clears the resolution; outside `Construct`
    /// mode the notification is ignored.
    pub fn pointer_move(&mut self, hit: Option<&HitContext>) {
        if self.mode != EditorMode::Construct {
            return;
        }
        self.resolved =
            hit.map(|hit| resolve_contact(hit, &self.pending, self.height_lock, &self.grid));
    }

    /// Commit the pending object at the most recently resolved position.
    /// Returns the new entity's id, or `None` when there is nothing
    /// resolved or the session is not in `Construct` mode.
    pub fn commit(&mut self) -> Option<EntityId> {
        if self.mode != EditorMode::Construct {
            return None;
        }
        let placement = self.resolved?;
        self.history.record(&self.entities);

        let id = self.allocate_id();
        let entity = match &self.pending {
            PendingObject::Block {
                shape,
                material,
                rotation,
                scale,
            } => {
                debug!(
                    "placed {} at {:?}",
                    shape.display_name(),
                    placement.position
                );
                PlacedEntity::Block(PlacedBlock {
                    id,
                    shape: *shape,
                    material: *material,
                    transform: Transform::new(placement.position, *rotation, *scale),
                })
            }
            PendingObject::Structure {
                definition,
                rotation,
            } => {
                debug!(
                    "placed structure '{}' at {:?}",
                    definition.name, placement.position
                );
                PlacedEntity::Group(structure::instantiate(
                    Arc::clone(definition),
                    id,
                    placement.position,
                    *rotation,
                ))
            }
        };
        self.entities.push(entity);
        Some(id)
    }

    /// Remove a placed entity. Returns false if the id is unknown.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.id() == id) else {
            return false;
        };
        self.history.record(&self.entities);
        self.entities.remove(index);
        self.selection.retain(|s| *s != id);
        debug!("removed entity {}", id.0);
        true
    }

    /// Pick an existing entity up into the pending slot, copying its
    /// material/shape/rotation/scale (or structure reference) and removing
    /// it from the scene.
    pub fn grab(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.id() == id) else {
            return false;
        };
        self.history.record(&self.entities);
        let entity = self.entities.remove(index);
        self.selection.retain(|s| *s != id);
        self.pending = match entity {
            PlacedEntity::Block(block) => PendingObject::Block {
                shape: block.shape,
                material: block.material,
                rotation: block.transform.rotation,
                scale: block.transform.scale,
            },
            PlacedEntity::Group(group) => PendingObject::Structure {
                definition: group.definition,
                rotation: group.transform.rotation,
            },
        };
        true
    }

    /// Remove every placed entity as one undoable step.
    pub fn clear_all(&mut self) {
        if self.entities.is_empty() {
            return;
        }
        self.history.record(&self.entities);
        self.entities.clear();
        self.selection.clear();
        info!("cleared scene");
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Toggle an entity in or out of the selection. Only valid in `Select`
    /// mode and for ids that exist.
    pub fn toggle_select(&mut self, id: EntityId) -> bool {
        if self.mode != EditorMode::Select {
            return false;
        }
        if !self.entities.iter().any(|e| e.id() == id) {
            return false;
        }
        if let Some(index) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(index);
        } else {
            self.selection.push(id);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Grouping
    // ------------------------------------------------------------------

    /// Convert the current selection into a named structure definition.
    ///
    /// One atomic undo step: the snapshot precedes the removal of the
    /// source blocks, and the definition itself lives outside the
    /// snapshots, so a single undo restores the blocks while the structure
    /// stays in the library. On success the new structure is armed as the
    /// pending object. Precondition failures leave everything untouched.
    pub fn create_structure(
        &mut self,
        name: impl Into<String>,
    ) -> Result<Arc<StructureDefinition>, GroupError> {
        let selected: Vec<&PlacedEntity> = self
            .selection
            .iter()
            .filter_map(|id| self.entities.iter().find(|e| e.id() == *id))
            .collect();
        let definition = structure::create_structure(name, &selected)?;

        self.history.record(&self.entities);
        let absorbed: Vec<EntityId> = std::mem::take(&mut self.selection);
        self.entities.retain(|e| !absorbed.contains(&e.id()));

        let definition = Arc::new(definition);
        self.definitions.push(Arc::clone(&definition));
        self.pending = PendingObject::Structure {
            definition: Arc::clone(&definition),
            rotation: Vec3::ZERO,
        };
        info!(
            "created structure '{}' from {} blocks",
            definition.name,
            definition.blocks.len()
        );
        Ok(definition)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.entities);
        if applied {
            // Restored state may not contain the selected ids.
            self.selection.clear();
            self.resolved = None;
            debug!("undo, {} steps remain", self.history.undo_count());
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.entities);
        if applied {
            self.selection.clear();
            self.resolved = None;
            debug!("redo, {} steps remain", self.history.redo_count());
        }
        applied
    }

    // ------------------------------------------------------------------
    // Persistence hooks
    // ------------------------------------------------------------------

    /// Replace the whole scene, e.g. after decoding a project file. Resets
    /// history, selection, and the height lock: a freshly loaded state has
    /// no history.
    pub fn replace_scene(
        &mut self,
        entities: Vec<PlacedEntity>,
        definitions: Vec<Arc<StructureDefinition>>,
    ) {
        self.next_id = entities.iter().map(|e| e.id().0).max().map_or(1, |m| m + 1);
        info!(
            "scene replaced: {} entities, {} structure definitions",
            entities.len(),
            definitions.len()
        );
        self.entities = entities;
        self.definitions = definitions;
        self.history.clear();
        self.selection.clear();
        self.height_lock = None;
        self.resolved = None;
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }
}
