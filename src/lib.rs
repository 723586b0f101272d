//! # logical-view
//!
//! Logical view of DWARF debug information: a tree of scopes, symbols,
//! types and line records with resolved names, rendered as indented text
//! or YAML.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! render   → Text/YAML rendering, render passes, output sinks
//!   ↓
//! select   → Sorting, pattern matching, print eligibility
//!   ↓
//! resolve  → Name resolution through reference chains, qualified names
//!   ↓
//! view     → Entity arena, kinds, flags, summary counters
//!   ↓
//! base     → Primitives (EntityId, Name interning, path helpers)
//! ```
//!
//! `settings` and `error` are shared by every layer.
//!
//! ## Pipeline
//!
//! A reader builds a [`LogicalView`] with the `create_*` methods and
//! [`LogicalView::add_object`], then calls [`LogicalView::resolve`]. After
//! that the view is read-only apart from sorting, pattern matching and the
//! printed counters, which [`LogicalView::print_text`] and
//! [`LogicalView::print_yaml`] take care of.

// ============================================================================
// FOUNDATION
// ============================================================================

/// Foundation types: EntityId, Name interning, path helpers
pub mod base;

pub mod error;
pub mod settings;

// ============================================================================
// OBJECT MODEL AND PASSES
// ============================================================================

/// Entity arena and object kinds
pub mod view;

/// Name resolution
pub mod resolve;

/// Sorting, patterns and print eligibility
pub mod select;

/// Text and YAML output
pub mod render;

// Re-export commonly needed items
pub use base::{EntityId, Interner, Name};
pub use error::{Result, ViewError};
pub use render::{MemorySink, OutputSink, Printer, WriterSink};
pub use settings::{MatchMode, ObjectFilter, PatternSettings, PrintSettings, SortKey};
pub use view::{Entity, LogicalView, ObjectCounter, SummaryTable};
