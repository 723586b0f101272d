//! Foundation types for the logical view.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`EntityId`] - Stable handles into the entity arena
//! - [`Name`], [`Interner`] - String interning
//! - [`unify_file_path`], [`file_name`], [`flatten_file_path`] - Path helpers
//!
//! This module has NO dependencies on other logview modules.

mod entity_id;
mod intern;
mod path;

pub use entity_id::EntityId;
pub use intern::{Interner, Name};
pub use path::{file_name, flatten_file_path, unify_file_path};
