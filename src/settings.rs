//! Display settings for rendering a logical view.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::view::{AggregateKind, Entity, EntityData, ScopeKind, SymbolKind, TypeKind};

/// Ordering applied to the children of every scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum SortKey {
    /// Keep insertion order.
    None,
    Kind,
    #[default]
    Line,
    Name,
    Offset,
}

/// How search patterns are compared with entity names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum MatchMode {
    /// The whole name equals the pattern.
    #[default]
    Exact,
    /// The name contains the pattern.
    Any,
    /// The pattern is a regular expression.
    Regex,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PatternSettings {
    pub mode: MatchMode,
    pub ignore_case: bool,
    pub patterns: Vec<String>,
}

/// Which kinds of entities get a row of their own.
///
/// The group switches (`scopes`, `symbols`, `types`, `lines`) turn on every
/// kind in their group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ObjectFilter {
    pub alias: bool,
    pub array: bool,
    pub block: bool,
    pub class: bool,
    pub codeline: bool,
    pub enumeration: bool,
    pub function: bool,
    pub member: bool,
    pub namespace: bool,
    pub parameter: bool,
    pub primitive_type: bool,
    pub structure: bool,
    pub template: bool,
    pub typedef: bool,
    pub union: bool,
    pub using: bool,
    pub variable: bool,

    pub scopes: bool,
    pub symbols: bool,
    pub types: bool,
    pub lines: bool,

    /// Give array subranges rows of their own. Off in every preset.
    pub arrays_encoded: bool,
}

impl Default for ObjectFilter {
    fn default() -> Self {
        Self::brief()
    }
}

impl ObjectFilter {
    /// Everything but primitive types and code lines.
    pub fn brief() -> Self {
        Self {
            primitive_type: false,
            codeline: false,
            ..Self::all()
        }
    }

    pub fn all() -> Self {
        Self {
            alias: true,
            array: true,
            block: true,
            class: true,
            codeline: true,
            enumeration: true,
            function: true,
            member: true,
            namespace: true,
            parameter: true,
            primitive_type: true,
            structure: true,
            template: true,
            typedef: true,
            union: true,
            using: true,
            variable: true,
            scopes: false,
            symbols: false,
            types: false,
            lines: false,
            arrays_encoded: false,
        }
    }

    pub fn none() -> Self {
        Self {
            alias: false,
            array: false,
            block: false,
            class: false,
            codeline: false,
            enumeration: false,
            function: false,
            member: false,
            namespace: false,
            parameter: false,
            primitive_type: false,
            structure: false,
            template: false,
            typedef: false,
            union: false,
            using: false,
            variable: false,
            scopes: false,
            symbols: false,
            types: false,
            lines: false,
            arrays_encoded: false,
        }
    }

    /// Whether `entity` gets its own row. Roots and compile units always do;
    /// subranges only when `arrays_encoded` is set.
    pub fn allows(&self, entity: &Entity) -> bool {
        match &entity.data {
            EntityData::Scope(scope) => {
                self.scopes
                    || match scope.kind {
                        ScopeKind::Root | ScopeKind::CompileUnit => true,
                        ScopeKind::Namespace => self.namespace,
                        ScopeKind::Function(_) | ScopeKind::InlinedFunction => self.function,
                        ScopeKind::Aggregate(AggregateKind::Class) => self.class,
                        ScopeKind::Aggregate(AggregateKind::Struct) => self.structure,
                        ScopeKind::Aggregate(AggregateKind::Union) => self.union,
                        ScopeKind::Enumeration => self.enumeration,
                        ScopeKind::Array => self.array,
                        ScopeKind::Alias => self.alias,
                        ScopeKind::TemplatePack => self.template,
                        ScopeKind::Block(_) => self.block,
                    }
            }
            EntityData::Symbol(symbol) => {
                self.symbols
                    || match symbol.kind {
                        SymbolKind::Variable => self.variable,
                        SymbolKind::Parameter | SymbolKind::UnspecifiedParameter => {
                            self.parameter
                        }
                        SymbolKind::Member => self.member,
                    }
            }
            EntityData::Type(ty) if ty.kind == TypeKind::Subrange => {
                self.arrays_encoded && (self.types || self.array)
            }
            EntityData::Type(ty) => {
                self.types
                    || match ty.kind {
                        TypeKind::Base => self.primitive_type,
                        TypeKind::Typedef => self.typedef,
                        TypeKind::Enumerator => self.enumeration,
                        TypeKind::TemplateParameter(_) => self.template,
                        TypeKind::Import(_) => self.using,
                        TypeKind::Inheritance => self.class || self.structure,
                        _ => false,
                    }
            }
            EntityData::Line(_) => self.lines || self.codeline,
        }
    }
}

/// Every switch that affects selection and rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PrintSettings {
    // Attribute columns.
    pub show_dwarf_offset: bool,
    pub show_dwarf_parent: bool,
    pub show_dwarf_tag: bool,
    pub show_level: bool,
    pub show_is_global: bool,

    pub show_indent: bool,
    /// Print `void` for functions and pointers without a type.
    pub show_void: bool,
    pub show_codeline_attributes: bool,
    pub show_block_attributes: bool,
    /// Keep unnamed, unlined functions (compiler-generated code).
    pub show_generated: bool,
    pub show_only_globals: bool,
    pub show_only_locals: bool,
    pub show_summary: bool,
    /// Suppress the tree unless it goes to split files.
    pub quiet: bool,

    pub sort: SortKey,
    pub patterns: PatternSettings,
    pub objects: ObjectFilter,
    /// Write each compile unit to its own file in this directory.
    pub split_location: Option<PathBuf>,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            show_dwarf_offset: false,
            show_dwarf_parent: false,
            show_dwarf_tag: false,
            show_level: false,
            show_is_global: false,
            show_indent: true,
            show_void: true,
            show_codeline_attributes: false,
            show_block_attributes: false,
            show_generated: false,
            show_only_globals: false,
            show_only_locals: false,
            show_summary: false,
            quiet: false,
            sort: SortKey::default(),
            patterns: PatternSettings::default(),
            objects: ObjectFilter::default(),
            split_location: None,
        }
    }
}

impl PrintSettings {
    /// Every object kind and every attribute column.
    pub fn all() -> Self {
        Self {
            show_dwarf_offset: true,
            show_dwarf_parent: true,
            show_dwarf_tag: true,
            show_level: true,
            show_is_global: true,
            show_codeline_attributes: true,
            show_block_attributes: true,
            show_generated: true,
            objects: ObjectFilter::all(),
            ..Self::default()
        }
    }

    pub fn has_patterns(&self) -> bool {
        !self.patterns.patterns.is_empty()
    }

    pub fn is_split(&self) -> bool {
        self.split_location.is_some()
    }

    /// Load settings from YAML; missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_yaml_str(text: &str) -> crate::Result<Self> {
        serde_yaml::from_str(text).map_err(|e| crate::ViewError::Config(e.to_string()))
    }
}
