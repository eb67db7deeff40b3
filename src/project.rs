//! Project Persistence
//!
//! Serde records for the `{placed_entities, structure_definitions}` project
//! shape, plus the legacy bare block array older files used. Decoding never
//! touches live state: a failed load surfaces [`ProjectError::Malformed`]
//! and leaves the session exactly as it was.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::building::catalog::{MaterialId, ShapeKind};
use crate::building::session::BuilderSession;
use crate::building::structure::StructureDefinition;
use crate::building::transform::{AxisInput, normalize_rotation, normalize_scale};
use crate::building::types::{EntityId, PlacedBlock, PlacedEntity, PlacedGroup, Transform};

/// Load failure. The project file could not be understood; current state is
/// left untouched.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("malformed project data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProjectError {
    fn from(err: serde_json::Error) -> Self {
        ProjectError::Malformed(err.to_string())
    }
}

/// A placed block as stored on disk. Rotation and scale are optional and
/// loosely typed; they pass through the total normalization functions on
/// load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: EntityId,
    pub shape: ShapeKind,
    pub material: MaterialId,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<AxisInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisInput>,
}

/// A placed structure instance as stored on disk, referencing its
/// definition by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: EntityId,
    pub structure: String,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<AxisInput>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRecord {
    Block(BlockRecord),
    Group(GroupRecord),
}

/// The serializable project snapshot exposed to persistence collaborators.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub placed_entities: Vec<EntityRecord>,
    #[serde(default)]
    pub structure_definitions: Vec<StructureDefinition>,
}

/// Either the current project shape or a legacy bare array of blocks.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectFile {
    Full(ProjectData),
    Legacy(Vec<BlockRecord>),
}

/// A decoded project, ready for [`BuilderSession::replace_scene`].
#[derive(Debug)]
pub struct LoadedProject {
    pub entities: Vec<PlacedEntity>,
    pub definitions: Vec<Arc<StructureDefinition>>,
}

/// Snapshot the session into the serializable project shape.
pub fn snapshot(session: &BuilderSession) -> ProjectData {
    let placed_entities = session
        .entities()
        .iter()
        .map(|entity| match entity {
            PlacedEntity::Block(block) => EntityRecord::Block(BlockRecord {
                id: block.id,
                shape: block.shape,
                material: block.material,
                position: block.transform.position,
                rotation: Some(AxisInput::PerAxis(block.transform.rotation.to_array())),
                scale: Some(AxisInput::PerAxis(block.transform.scale.to_array())),
            }),
            PlacedEntity::Group(group) => EntityRecord::Group(GroupRecord {
                id: group.id,
                structure: group.definition.name.clone(),
                position: group.transform.position,
                rotation: Some(AxisInput::PerAxis(group.transform.rotation.to_array())),
            }),
        })
        .collect();
    let structure_definitions = session
        .definitions()
        .iter()
        .map(|def| def.as_ref().clone())
        .collect();
    ProjectData {
        placed_entities,
        structure_definitions,
    }
}

/// Encode the session as pretty JSON.
pub fn encode(session: &BuilderSession) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(&snapshot(session))?)
}

/// Decode a project file. Accepts the full project shape or a legacy bare
/// array of block records.
pub fn decode(json: &str) -> Result<LoadedProject, ProjectError> {
    let data = match serde_json::from_str::<ProjectFile>(json)? {
        ProjectFile::Full(data) => data,
        ProjectFile::Legacy(blocks) => ProjectData {
            placed_entities: blocks.into_iter().map(EntityRecord::Block).collect(),
            structure_definitions: Vec::new(),
        },
    };

    for def in &data.structure_definitions {
        if def.blocks.is_empty() {
            return Err(ProjectError::Malformed(format!(
                "structure '{}' has no blocks",
                def.name
            )));
        }
    }
    let definitions: Vec<Arc<StructureDefinition>> = data
        .structure_definitions
        .into_iter()
        .map(Arc::new)
        .collect();

    let mut entities = Vec::with_capacity(data.placed_entities.len());
    for record in data.placed_entities {
        match record {
            EntityRecord::Block(r) => {
                entities.push(PlacedEntity::Block(PlacedBlock {
                    id: r.id,
                    shape: r.shape,
                    material: r.material,
                    transform: Transform::new(
                        r.position,
                        normalize_rotation(r.rotation),
                        normalize_scale(r.scale),
                    ),
                }));
            }
            EntityRecord::Group(r) => {
                let Some(definition) = definitions.iter().find(|d| d.name == r.structure) else {
                    return Err(ProjectError::Malformed(format!(
                        "placed group {} references unknown structure '{}'",
                        r.id.0, r.structure
                    )));
                };
                entities.push(PlacedEntity::Group(PlacedGroup {
                    id: r.id,
                    definition: Arc::clone(definition),
                    transform: Transform::new(
                        r.position,
                        normalize_rotation(r.rotation),
                        Vec3::ONE,
                    ),
                }));
            }
        }
    }

    Ok(LoadedProject {
        entities,
        definitions,
    })
}

/// Decode a project file and apply it to the session. On failure the
/// session is left untouched; on success history, selection, and the
/// height lock are reset.
pub fn load_into(session: &mut BuilderSession, json: &str) -> Result<(), ProjectError> {
    let loaded = decode(json)?;
    session.replace_scene(loaded.entities, loaded.definitions);
    Ok(())
}
