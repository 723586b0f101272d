//! The logical view object model.
//!
//! A [`LogicalView`] is an arena of [`Entity`] records. Scopes own four
//! ordered lists (scopes, symbols, types, lines) plus a combined children
//! list that never holds lines. Parent links, type links and reference
//! links are plain [`EntityId`](crate::base::EntityId)s.

mod entity;
mod flags;
mod kind;
mod summary;
mod tree;

pub use entity::{
    Entity, EntityData, LineData, ScopeAttributes, ScopeData, SymbolData, TypeData,
};
pub use flags::{EntityFlags, LineFlag, LineFlags, ScopeFlag, ScopeFlags};
pub use kind::{
    AccessSpecifier, AggregateKind, BlockKind, FunctionKind, ImportKind, ScopeKind, SymbolKind,
    TemplateParamKind, TypeKind,
};
pub use summary::{ObjectCounter, SummaryTable};
pub use tree::LogicalView;
