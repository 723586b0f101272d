//! Entity records stored in the view arena.

use gimli::DwTag;

use super::flags::{EntityFlags, LineFlags, ScopeFlags};
use super::kind::{AccessSpecifier, ScopeKind, SymbolKind, TypeKind};
use crate::base::{EntityId, Name};

/// One node of the logical view.
///
/// Common fields live here; everything that depends on the kind of node is
/// in [`EntityData`]. Ownership links (`parent` and the child lists of a
/// scope) are maintained by [`LogicalView::add_object`](super::LogicalView::add_object);
/// `ty` and `reference` are plain cross-references.
#[derive(Clone, Debug)]
pub struct Entity {
    pub(crate) level: u32,
    pub(crate) parent: Option<EntityId>,
    /// Creation order, for tracing individual entities in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) instance: u32,

    /// Offset of the source die.
    pub offset: u64,
    pub tag: DwTag,
    pub name: Name,
    /// Cached `A::B::` prefix of enclosing scopes.
    pub(crate) qualified_name: Name,
    /// Path of the declaring source file.
    pub file_name: Name,
    pub line: u64,
    /// The entity's type, if any. Never owned.
    pub ty: Option<EntityId>,
    /// Specification or abstract-origin entity. Never owned.
    pub reference: Option<EntityId>,
    pub flags: EntityFlags,
    pub data: EntityData,
}

/// Kind-specific payload.
#[derive(Clone, Debug)]
pub enum EntityData {
    Scope(ScopeData),
    Symbol(SymbolData),
    Type(TypeData),
    Line(LineData),
}

#[derive(Clone, Debug)]
pub struct ScopeData {
    pub kind: ScopeKind,
    pub attributes: ScopeAttributes,
    pub(crate) flags: ScopeFlags,
    pub(crate) scopes: Vec<EntityId>,
    pub(crate) symbols: Vec<EntityId>,
    pub(crate) types: Vec<EntityId>,
    pub(crate) lines: Vec<EntityId>,
    /// Scopes, symbols and types in insertion (or sorted) order.
    pub(crate) children: Vec<EntityId>,
}

/// Extra attributes some scope kinds carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeAttributes {
    pub is_template: bool,
    /// `enum class`
    pub is_enum_class: bool,
    pub is_static: bool,
    pub is_declared_inline: bool,
    pub is_declaration: bool,
    /// The function has inlined instances.
    pub is_inlined: bool,
    /// Line of the call site of an inlined function.
    pub call_line: u64,
}

#[derive(Clone, Debug)]
pub struct SymbolData {
    pub kind: SymbolKind,
    pub access: AccessSpecifier,
}

#[derive(Clone, Debug)]
pub struct TypeData {
    pub kind: TypeKind,
    /// Inheritance access.
    pub access: AccessSpecifier,
    /// Enumerator or template-parameter value, kept as text.
    pub value: Name,
    /// Byte size of a base type.
    pub byte_size: u64,
    /// Element count of a subrange.
    pub count: u64,
}

#[derive(Clone, Debug)]
pub struct LineData {
    pub discriminator: u64,
    pub flags: LineFlags,
}

impl ScopeData {
    pub(crate) fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            attributes: ScopeAttributes::default(),
            flags: ScopeFlags::default(),
            scopes: Vec::new(),
            symbols: Vec::new(),
            types: Vec::new(),
            lines: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn flags(&self) -> ScopeFlags {
        self.flags
    }

    pub fn scopes(&self) -> &[EntityId] {
        &self.scopes
    }

    pub fn symbols(&self) -> &[EntityId] {
        &self.symbols
    }

    pub fn types(&self) -> &[EntityId] {
        &self.types
    }

    pub fn lines(&self) -> &[EntityId] {
        &self.lines
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn is_function(&self) -> bool {
        self.kind.is_function()
    }

    /// True for inlined instances and for functions that have them.
    pub fn is_inlined(&self) -> bool {
        self.kind == ScopeKind::InlinedFunction || self.attributes.is_inlined
    }
}

impl TypeData {
    pub(crate) fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            access: AccessSpecifier::Unspecified,
            value: Name::NONE,
            byte_size: 0,
            count: 0,
        }
    }
}

impl Entity {
    pub(crate) fn new(data: EntityData, tag: DwTag, offset: u64) -> Self {
        Self {
            level: 0,
            parent: None,
            #[cfg(debug_assertions)]
            instance: 0,
            offset,
            tag,
            name: Name::NONE,
            qualified_name: Name::NONE,
            file_name: Name::NONE,
            line: 0,
            ty: None,
            reference: None,
            flags: EntityFlags::default(),
            data,
        }
    }

    /// Depth in the tree. The root and the compile units are at level 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// The cached `A::B::` prefix; [`Name::NONE`] until resolved.
    pub fn qualified_name(&self) -> Name {
        self.qualified_name
    }

    /// Label for `{Kind}` headers, YAML `object` values and the summary.
    pub fn kind_label(&self) -> &'static str {
        match &self.data {
            EntityData::Scope(scope) => scope.kind.label(),
            EntityData::Symbol(symbol) => symbol.kind.label(),
            EntityData::Type(ty) => ty.kind.label(),
            EntityData::Line(line) if line.flags.is_line_record() => "CodeLine",
            EntityData::Line(_) => "Undefined",
        }
    }

    pub fn as_scope(&self) -> Option<&ScopeData> {
        match &self.data {
            EntityData::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn as_scope_mut(&mut self) -> Option<&mut ScopeData> {
        match &mut self.data {
            EntityData::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&SymbolData> {
        match &self.data {
            EntityData::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_symbol_mut(&mut self) -> Option<&mut SymbolData> {
        match &mut self.data {
            EntityData::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeData> {
        match &self.data {
            EntityData::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_type_mut(&mut self) -> Option<&mut TypeData> {
        match &mut self.data {
            EntityData::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineData> {
        match &self.data {
            EntityData::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineData> {
        match &mut self.data {
            EntityData::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn scope_kind(&self) -> Option<ScopeKind> {
        self.as_scope().map(|scope| scope.kind)
    }

    pub fn is_scope(&self) -> bool {
        matches!(self.data, EntityData::Scope(_))
    }

    pub fn is_line(&self) -> bool {
        matches!(self.data, EntityData::Line(_))
    }

    pub fn is_root(&self) -> bool {
        self.scope_kind() == Some(ScopeKind::Root)
    }

    pub fn is_function(&self) -> bool {
        self.scope_kind().is_some_and(ScopeKind::is_function)
    }

    /// Scopes carry the has-pattern bit of their subtree; other entities
    /// only their own match.
    pub fn has_pattern(&self) -> bool {
        match &self.data {
            EntityData::Scope(scope) => scope.flags.has_pattern(),
            _ => self.flags.has_pattern_match,
        }
    }

    /// Line shown in the line column: call line for inlined functions.
    pub fn display_line(&self) -> u64 {
        match &self.data {
            EntityData::Scope(scope) if scope.kind == ScopeKind::InlinedFunction => {
                scope.attributes.call_line
            }
            _ => self.line,
        }
    }
}
