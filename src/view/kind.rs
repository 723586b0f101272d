//! Entity kinds and their display labels.

/// The kind of a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// The input file; owns the compile units.
    Root,
    CompileUnit,
    Namespace,
    Function(FunctionKind),
    /// An inlined instance of a function.
    InlinedFunction,
    Aggregate(AggregateKind),
    Enumeration,
    Array,
    /// A template alias.
    Alias,
    TemplatePack,
    Block(BlockKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Subprogram,
    EntryPoint,
    SubroutineType,
    Label,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Class,
    Struct,
    Union,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Lexical,
    Try,
    Catch,
}

impl ScopeKind {
    /// Label used in `{Kind}` headers, YAML `object` values and the summary.
    pub fn label(self) -> &'static str {
        match self {
            ScopeKind::Root => "InputFile",
            ScopeKind::CompileUnit => "CompileUnit",
            ScopeKind::Namespace => "Namespace",
            ScopeKind::Function(_) | ScopeKind::InlinedFunction => "Function",
            ScopeKind::Aggregate(AggregateKind::Class) => "Class",
            ScopeKind::Aggregate(AggregateKind::Struct) => "Struct",
            ScopeKind::Aggregate(AggregateKind::Union) => "Union",
            ScopeKind::Enumeration => "Enum",
            ScopeKind::Array => "Array",
            ScopeKind::Alias => "Alias",
            ScopeKind::TemplatePack => "TemplateParameter",
            ScopeKind::Block(_) => "Block",
        }
    }

    pub fn is_function(self) -> bool {
        matches!(self, ScopeKind::Function(_) | ScopeKind::InlinedFunction)
    }

    /// Only compile units and functions may own line records.
    pub fn can_have_lines(self) -> bool {
        matches!(self, ScopeKind::CompileUnit) || self.is_function()
    }
}

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Parameter,
    /// The `...` of a variadic function.
    UnspecifiedParameter,
    Member,
}

impl SymbolKind {
    pub fn label(self) -> &'static str {
        match self {
            SymbolKind::Variable => "Variable",
            SymbolKind::Parameter | SymbolKind::UnspecifiedParameter => "Parameter",
            SymbolKind::Member => "Member",
        }
    }
}

/// The kind of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Base,
    Typedef,
    Enumerator,
    Subrange,
    TemplateParameter(TemplateParamKind),
    Import(ImportKind),
    Inheritance,
    Unspecified,
    Const,
    Volatile,
    Restrict,
    Pointer,
    PointerToMember,
    Reference,
    RvalueReference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateParamKind {
    Type,
    Value,
    Template,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Declaration,
    Module,
}

impl TypeKind {
    pub fn label(self) -> &'static str {
        match self {
            TypeKind::Base => "PrimitiveType",
            TypeKind::Typedef => "Alias",
            TypeKind::Enumerator => "Enumerator",
            TypeKind::Subrange => "Subrange",
            TypeKind::TemplateParameter(_) => "TemplateParameter",
            TypeKind::Import(_) => "Using",
            TypeKind::Inheritance => "Inherits",
            TypeKind::Unspecified
            | TypeKind::Const
            | TypeKind::Volatile
            | TypeKind::Restrict
            | TypeKind::Pointer
            | TypeKind::PointerToMember
            | TypeKind::Reference
            | TypeKind::RvalueReference => "Type",
        }
    }

    /// Qualifier, pointer and reference types, whose names are built from
    /// the type they modify.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TypeKind::Const
                | TypeKind::Volatile
                | TypeKind::Restrict
                | TypeKind::Pointer
                | TypeKind::PointerToMember
                | TypeKind::Reference
                | TypeKind::RvalueReference
        )
    }
}

/// Member and inheritance access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessSpecifier {
    #[default]
    Unspecified,
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    /// The keyword, or `None` when unspecified.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            AccessSpecifier::Unspecified => None,
            AccessSpecifier::Public => Some("public"),
            AccessSpecifier::Protected => Some("protected"),
            AccessSpecifier::Private => Some("private"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScopeKind::Root, "InputFile")]
    #[case(ScopeKind::CompileUnit, "CompileUnit")]
    #[case(ScopeKind::Function(FunctionKind::Subprogram), "Function")]
    #[case(ScopeKind::InlinedFunction, "Function")]
    #[case(ScopeKind::Aggregate(AggregateKind::Struct), "Struct")]
    #[case(ScopeKind::Enumeration, "Enum")]
    #[case(ScopeKind::TemplatePack, "TemplateParameter")]
    #[case(ScopeKind::Block(BlockKind::Try), "Block")]
    fn test_scope_labels(#[case] kind: ScopeKind, #[case] label: &str) {
        assert_eq!(kind.label(), label);
    }

    #[rstest]
    #[case(TypeKind::Base, "PrimitiveType")]
    #[case(TypeKind::Typedef, "Alias")]
    #[case(TypeKind::Import(ImportKind::Module), "Using")]
    #[case(TypeKind::Pointer, "Type")]
    fn test_type_labels(#[case] kind: TypeKind, #[case] label: &str) {
        assert_eq!(kind.label(), label);
    }

    #[test]
    fn test_line_capable_scopes() {
        assert!(ScopeKind::CompileUnit.can_have_lines());
        assert!(ScopeKind::Function(FunctionKind::Subprogram).can_have_lines());
        assert!(ScopeKind::InlinedFunction.can_have_lines());
        assert!(!ScopeKind::Namespace.can_have_lines());
        assert!(!ScopeKind::Block(BlockKind::Lexical).can_have_lines());
        assert!(!ScopeKind::Root.can_have_lines());
    }

    #[test]
    fn test_unspecified_parameter_is_a_parameter() {
        assert_eq!(SymbolKind::UnspecifiedParameter.label(), "Parameter");
    }
}
