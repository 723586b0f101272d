//! Printable type names built from fragments.

use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::base::EntityId;
use crate::view::{Entity, EntityData, LogicalView, ScopeKind, TemplateParamKind, TypeKind};

/// How an entity's full name is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameCategory {
    /// Aggregates, enumerations, namespaces, enumerators, inheritance and
    /// base types: own name followed by the parent type name.
    Named,
    /// Functions, labels, arrays, subranges, imports and typedefs: own name
    /// only.
    OwnName,
    /// Qualifiers, pointers and references: an optional leading keyword or
    /// trailing symbol around the parent type name.
    Modifier {
        leading: Option<&'static str>,
        trailing: Option<&'static str>,
        void_if_absent: bool,
    },
    /// Template parameters and blocks: parent type name only.
    Parameterized,
}

impl NameCategory {
    /// The category of `entity`, or `None` when its name cannot be built.
    pub fn of(entity: &Entity) -> Option<Self> {
        let modifier = |leading, trailing| NameCategory::Modifier {
            leading,
            trailing,
            void_if_absent: false,
        };
        match &entity.data {
            EntityData::Scope(scope) => match scope.kind {
                ScopeKind::CompileUnit
                | ScopeKind::Namespace
                | ScopeKind::Aggregate(_)
                | ScopeKind::Enumeration
                | ScopeKind::TemplatePack => Some(NameCategory::Named),
                ScopeKind::Function(_) | ScopeKind::InlinedFunction | ScopeKind::Array => {
                    Some(NameCategory::OwnName)
                }
                ScopeKind::Block(_) => Some(NameCategory::Parameterized),
                ScopeKind::Root | ScopeKind::Alias => None,
            },
            EntityData::Type(ty) => match ty.kind {
                TypeKind::Base
                | TypeKind::Unspecified
                | TypeKind::Enumerator
                | TypeKind::Inheritance => Some(NameCategory::Named),
                TypeKind::Subrange | TypeKind::Import(_) | TypeKind::Typedef => {
                    Some(NameCategory::OwnName)
                }
                TypeKind::Const => Some(modifier(Some("const"), None)),
                TypeKind::Restrict => Some(modifier(Some("restrict"), None)),
                TypeKind::Volatile => Some(modifier(Some("volatile"), None)),
                TypeKind::Pointer => Some(NameCategory::Modifier {
                    leading: None,
                    trailing: Some("*"),
                    void_if_absent: true,
                }),
                TypeKind::PointerToMember => Some(modifier(None, Some("*"))),
                TypeKind::RvalueReference => Some(modifier(None, Some("&&"))),
                TypeKind::Reference => Some(modifier(None, Some("&"))),
                TypeKind::TemplateParameter(TemplateParamKind::Template) => {
                    Some(modifier(None, None))
                }
                TypeKind::TemplateParameter(_) => Some(NameCategory::Parameterized),
            },
            EntityData::Symbol(_) | EntityData::Line(_) => None,
        }
    }

    fn uses_parent_type_name(self) -> bool {
        !matches!(self, NameCategory::OwnName)
    }

    fn uses_base_text(self) -> bool {
        !matches!(self, NameCategory::Parameterized)
    }

    fn own_name_is_base(self) -> bool {
        matches!(self, NameCategory::Named | NameCategory::OwnName)
    }
}

/// Join non-empty fragments with single spaces.
fn join_fragments<'a>(fragments: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let mut out = String::new();
    for fragment in fragments.into_iter().flatten() {
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(fragment);
    }
    // fragments may carry their own runs of spaces
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out
}

impl LogicalView {
    /// Build and store the printable name of `id`.
    ///
    /// The name is `[leading] [base] [parent type name] [trailing]`, where
    /// the parent type name comes from `base_type` or else `base_scope`, and
    /// the base text is `base_text` or, for categories that use it, the
    /// entity's own name. With a `spec_scope` the leading and trailing
    /// fragments are left out. Returns `false` and leaves the name alone
    /// when the entity has no [`NameCategory`].
    pub fn set_full_name(
        &mut self,
        id: EntityId,
        show_void: bool,
        base_type: Option<EntityId>,
        base_scope: Option<EntityId>,
        spec_scope: Option<EntityId>,
        base_text: Option<&str>,
    ) -> bool {
        let entity = self.entity(id);
        let Some(category) = NameCategory::of(entity) else {
            warn!(?id, kind = entity.kind_label(), "no full-name rule");
            return false;
        };

        let mut parent_name: Option<SmolStr> = base_type.or(base_scope).map(|p| self.name_of(p));
        let (leading, trailing) = match category {
            NameCategory::Modifier {
                leading,
                trailing,
                void_if_absent,
            } => {
                if void_if_absent && base_type.is_none() && entity.ty.is_none() && show_void {
                    parent_name = Some(SmolStr::new_static("void"));
                }
                (leading, trailing)
            }
            _ => (None, None),
        };

        let own_name = self.name_of(id);
        let base = match base_text {
            Some(text) => Some(text),
            None if category.own_name_is_base() => Some(own_name.as_str()),
            None => None,
        };
        let suppress = spec_scope.is_some();

        let full_name = join_fragments([
            leading.filter(|_| !suppress),
            base.filter(|_| category.uses_base_text()),
            parent_name
                .as_deref()
                .filter(|_| category.uses_parent_type_name()),
            trailing.filter(|_| !suppress),
        ]);

        let name = self.intern(&full_name);
        let entity = self.entity_mut(id);
        entity.name = name;
        entity.flags.name_resolved = true;
        trace!(?id, full_name, "full name");
        true
    }
}
