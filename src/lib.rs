//! Blockwright
//!
//! Placement and contact-resolution core for a constructive block editor:
//! place, reposition, group, and remove solid blocks in a 3D scene to
//! assemble larger structures. The crate computes where a pending block (or
//! a saved multi-block structure) should rest given a pointer-ray hit,
//! handles grouping selections into reusable prefabs, and keeps a bounded
//! undo/redo history over the placed-entity collection.
//!
//! Rendering, hit-testing, input wiring, and file I/O are external
//! collaborators: the core consumes [`building::HitContext`] values and
//! explicit commands, and exposes the resolved placement, the placed-entity
//! collection, and a serializable project snapshot.
//!
//! # Modules
//!
//! - [`building`] - catalog, transform utilities, contact resolution,
//!   grouping, history, and the placement session
//! - [`project`] - project-file records and encode/decode
//!
//! # Example
//!
//! ```
//! use blockwright::building::{BuilderSession, HitContext, HitTarget};
//! use glam::Vec3;
//!
//! let mut session = BuilderSession::new();
//! let hit = HitContext {
//!     point: Vec3::ZERO,
//!     normal: Vec3::Y,
//!     target: HitTarget::Ground,
//! };
//! session.pointer_move(Some(&hit));
//! let id = session.commit().expect("resolved placement");
//!
//! // A unit cube rests on the ground at half its height.
//! assert_eq!(session.entities()[0].transform().position.y, 0.5);
//! assert_eq!(session.entities()[0].id(), id);
//! ```

pub mod building;
pub mod project;

pub use building::{BuilderSession, EditorMode};
pub use project::{ProjectData, ProjectError};
