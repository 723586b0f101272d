//! Name resolution over a built view.
//!
//! Three things happen here:
//! - unnamed entities borrow the name of their specification or
//!   abstract-origin entity ([`LogicalView::resolve_name`]);
//! - named entities cache the `A::B::` prefix of their enclosing scopes
//!   ([`LogicalView::resolve_qualified_name`]);
//! - qualifier, pointer and reference types get a printable name built
//!   from the type they modify ([`LogicalView::set_full_name`]).
//!
//! [`LogicalView::resolve`] runs all three over the whole tree.

mod full_name;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::base::{EntityId, Name};
use crate::error::{Result, ViewError};
use crate::view::{EntityData, LogicalView, ScopeKind, TypeKind};

pub use full_name::NameCategory;

impl LogicalView {
    /// The name of `id`, borrowed through its reference chain when it has
    /// none of its own. Every unnamed entity on the chain caches the result.
    ///
    /// Chains are followed with a visited set; a chain that comes back to
    /// an entity already seen fails with [`ViewError::ReferenceCycle`].
    pub fn resolve_name(&mut self, id: EntityId) -> Result<Name> {
        let entity = self.entity(id);
        if entity.flags.name_resolved || entity.name.is_some() || entity.reference.is_none() {
            return Ok(entity.name);
        }

        let mut chain = vec![id];
        let mut visited: FxHashSet<EntityId> = chain.iter().copied().collect();
        let mut current = entity.reference;
        let mut name = Name::NONE;
        while let Some(target) = current {
            if !visited.insert(target) {
                warn!(?id, ?target, "reference cycle");
                return Err(ViewError::ReferenceCycle { id });
            }
            let entity = self.entity(target);
            if entity.name.is_some() || entity.flags.name_resolved {
                name = entity.name;
                break;
            }
            chain.push(target);
            current = entity.reference;
        }

        for link in chain {
            let entity = self.entity_mut(link);
            entity.name = name;
            entity.flags.name_resolved = true;
        }
        trace!(?id, ?name, "resolved name");
        Ok(name)
    }

    /// Cache the `A::B::` prefix for `id`, walking up from `explicit_parent`.
    ///
    /// Children of a function get no prefix. Otherwise the walk climbs
    /// until a compile unit or the root, skipping unnamed scopes and
    /// passing through any function on the way. `has_qualified_name` is
    /// only set for a non-empty prefix.
    pub fn resolve_qualified_name(&mut self, id: EntityId, explicit_parent: EntityId) -> Name {
        let entity = self.entity(id);
        if entity.flags.has_qualified_name {
            return entity.qualified_name;
        }
        if self.entity(explicit_parent).is_function() {
            return Name::NONE;
        }

        let mut parts = Vec::new();
        let mut current = Some(explicit_parent);
        while let Some(parent) = current {
            let entity = self.entity(parent);
            if matches!(
                entity.scope_kind(),
                Some(ScopeKind::Root | ScopeKind::CompileUnit) | None
            ) {
                break;
            }
            if entity.name.is_some() {
                parts.push(self.text(entity.name));
            }
            current = entity.parent();
        }

        if parts.is_empty() {
            return Name::NONE;
        }
        let mut prefix = String::new();
        for part in parts.iter().rev() {
            prefix.push_str(part);
            prefix.push_str("::");
        }
        let name = self.intern(&prefix);
        let entity = self.entity_mut(id);
        entity.qualified_name = name;
        entity.flags.has_qualified_name = true;
        name
    }

    /// The cached prefix of `id` followed by its own name.
    pub fn qualified_name(&self, id: EntityId) -> String {
        let entity = self.entity(id);
        let mut out = self.text(entity.qualified_name).to_string();
        out.push_str(&self.text(entity.name));
        out
    }

    /// Give an unnamed subrange the `[N]` name of its element count, or
    /// `[?]` when the count is unknown.
    fn resolve_subrange_name(&mut self, id: EntityId) {
        let entity = self.entity(id);
        let count = match entity.as_type() {
            Some(ty) if ty.kind == TypeKind::Subrange && entity.name.is_none() => ty.count,
            _ => return,
        };
        let text = match count {
            0 => "[?]".to_string(),
            count => format!("[{count}]"),
        };
        let name = self.intern(&text);
        self.entity_mut(id).name = name;
    }

    /// Resolve names, qualified names and modifier-type names for every
    /// attached entity.
    pub fn resolve(&mut self, show_void: bool) -> Result<()> {
        let order = self.descendants(self.root());
        debug!(entities = order.len(), "resolving logical view");

        for &id in &order {
            self.resolve_name(id)?;
            self.resolve_subrange_name(id);
        }
        let mut named_types = FxHashSet::default();
        for &id in &order {
            self.resolve_type_name(id, show_void, &mut named_types)?;
        }
        for &id in &order {
            let entity = self.entity(id);
            if entity.is_line() || entity.is_root() {
                continue;
            }
            if let Some(parent) = entity.parent() {
                self.resolve_qualified_name(id, parent);
            }
        }
        Ok(())
    }

    /// Name a modifier type after the type it modifies, naming that one
    /// first when it is a modifier too.
    fn resolve_type_name(
        &mut self,
        id: EntityId,
        show_void: bool,
        done: &mut FxHashSet<EntityId>,
    ) -> Result<()> {
        let mut pending = Vec::new();
        let mut current = Some(id);
        while let Some(link) = current {
            let entity = self.entity(link);
            let is_modifier = entity.as_type().is_some_and(|ty| ty.kind.is_modifier());
            if !is_modifier || entity.name.is_some() || done.contains(&link) {
                break;
            }
            if pending.contains(&link) {
                warn!(?id, ?link, "type reference cycle");
                return Err(ViewError::ReferenceCycle { id });
            }
            pending.push(link);
            current = entity.ty;
        }

        for link in pending.into_iter().rev() {
            let (base_type, base_scope) = match self.entity(link).ty {
                Some(target) => match self.entity(target).data {
                    EntityData::Scope(_) => (None, Some(target)),
                    _ => (Some(target), None),
                },
                None => (None, None),
            };
            let spec_scope = base_scope.filter(|scope| self.entity(*scope).flags.has_reference);
            self.set_full_name(link, show_void, base_type, base_scope, spec_scope, None);
            done.insert(link);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{AggregateKind, FunctionKind, SymbolKind};
    use rstest::rstest;
    use gimli::constants;

    fn unit(view: &mut LogicalView) -> EntityId {
        let cu = view.create_scope(ScopeKind::CompileUnit, constants::DW_TAG_compile_unit, 0xb);
        view.set_name(cu, "test.cpp");
        view.add_object(view.root(), cu).unwrap();
        cu
    }

    fn namespace(view: &mut LogicalView, parent: EntityId, name: &str) -> EntityId {
        let ns = view.create_scope(ScopeKind::Namespace, constants::DW_TAG_namespace, 0);
        view.set_name(ns, name);
        view.add_object(parent, ns).unwrap();
        ns
    }

    #[test]
    fn test_nested_namespaces_qualified_name() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let a = namespace(&mut view, cu, "A");
        let b = namespace(&mut view, a, "B");
        let c = namespace(&mut view, b, "C");

        let prefix = view.resolve_qualified_name(c, b);
        assert_eq!(view.text(prefix).as_str(), "A::B::");
        assert!(view.entity(c).flags.has_qualified_name);
        assert_eq!(view.qualified_name(c), "A::B::C");

        view.resolve(true).unwrap();
        assert_eq!(view.qualified_name(a), "A");
        assert_eq!(view.qualified_name(b), "A::B");
    }

    #[test]
    fn test_children_of_function_have_no_prefix() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let ns = namespace(&mut view, cu, "outer");
        let func = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            0,
        );
        view.set_name(func, "run");
        view.add_object(ns, func).unwrap();
        let var = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 0);
        view.set_name(var, "local");
        view.add_object(func, var).unwrap();

        assert_eq!(view.resolve_qualified_name(var, func), Name::NONE);
        assert!(!view.entity(var).flags.has_qualified_name);

        view.resolve(true).unwrap();
        assert_eq!(view.qualified_name(func), "outer::run");
        assert_eq!(view.qualified_name(var), "local");
    }

    #[test]
    fn test_qualified_name_walks_through_function() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let main = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            0x10,
        );
        view.set_name(main, "main");
        view.add_object(cu, main).unwrap();
        let local = view.create_scope(
            ScopeKind::Aggregate(AggregateKind::Class),
            constants::DW_TAG_class_type,
            0x20,
        );
        view.set_name(local, "Local");
        view.add_object(main, local).unwrap();
        let member = view.create_symbol(SymbolKind::Member, constants::DW_TAG_member, 0x30);
        view.set_name(member, "x");
        view.add_object(local, member).unwrap();

        view.resolve(true).unwrap();

        assert_eq!(view.qualified_name(local), "Local");
        assert_eq!(view.qualified_name(member), "main::Local::x");
    }

    #[test]
    fn test_qualified_name_skips_unnamed_scopes() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let a = namespace(&mut view, cu, "A");
        let anonymous = namespace(&mut view, a, "");
        let var = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 0);
        view.set_name(var, "x");
        view.add_object(anonymous, var).unwrap();

        view.resolve(true).unwrap();
        assert_eq!(view.qualified_name(var), "A::x");
    }

    #[test]
    fn test_resolve_name_through_chain() {
        let mut view = LogicalView::new("test.o");
        let decl = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            1,
        );
        view.set_name(decl, "foo");
        let middle = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            2,
        );
        let inlined =
            view.create_scope(ScopeKind::InlinedFunction, constants::DW_TAG_inlined_subroutine, 3);
        view.set_reference(middle, decl);
        view.set_reference(inlined, middle);

        let name = view.resolve_name(inlined).unwrap();

        assert_eq!(view.text(name).as_str(), "foo");
        assert_eq!(view.name_of(middle).as_str(), "foo");
        assert!(view.entity(middle).flags.name_resolved);
    }

    #[test]
    fn test_resolve_name_keeps_own_name() {
        let mut view = LogicalView::new("test.o");
        let decl = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 1);
        view.set_name(decl, "decl");
        let def = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 2);
        view.set_name(def, "def");
        view.set_reference(def, decl);

        let name = view.resolve_name(def).unwrap();
        assert_eq!(view.text(name).as_str(), "def");
    }

    #[test]
    fn test_resolve_name_detects_cycle() {
        let mut view = LogicalView::new("test.o");
        let a = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 1);
        let b = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 2);
        view.set_reference(a, b);
        view.set_reference(b, a);

        let err = view.resolve_name(a).unwrap_err();
        assert!(matches!(err, ViewError::ReferenceCycle { id } if id == a));
    }

    #[test]
    fn test_resolve_builds_pointer_names() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let int = view.create_type(TypeKind::Base, constants::DW_TAG_base_type, 1);
        view.set_name(int, "int");
        let constant = view.create_type(TypeKind::Const, constants::DW_TAG_const_type, 2);
        let pointer = view.create_type(TypeKind::Pointer, constants::DW_TAG_pointer_type, 3);
        view.set_type(pointer, constant);
        view.set_type(constant, int);
        // pointer first, so the const it points to must be named on demand
        for id in [pointer, constant, int] {
            view.add_object(cu, id).unwrap();
        }

        view.resolve(true).unwrap();

        assert_eq!(view.name_of(constant).as_str(), "const int");
        assert_eq!(view.name_of(pointer).as_str(), "const int *");
    }

    #[test]
    fn test_resolve_detects_type_cycle() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let a = view.create_type(TypeKind::Pointer, constants::DW_TAG_pointer_type, 1);
        let b = view.create_type(TypeKind::Const, constants::DW_TAG_const_type, 2);
        view.set_type(a, b);
        view.set_type(b, a);
        view.add_object(cu, a).unwrap();
        view.add_object(cu, b).unwrap();

        assert!(matches!(
            view.resolve(true),
            Err(ViewError::ReferenceCycle { .. })
        ));
    }

    #[rstest]
    #[case(4, "[4]")]
    #[case(0, "[?]")]
    fn test_resolve_names_subranges(#[case] count: u64, #[case] expected: &str) {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let subrange = view.create_type(TypeKind::Subrange, constants::DW_TAG_subrange_type, 1);
        view.entity_mut(subrange).as_type_mut().unwrap().count = count;
        view.add_object(cu, subrange).unwrap();

        view.resolve(true).unwrap();

        assert_eq!(view.name_of(subrange).as_str(), expected);
    }

    #[test]
    fn test_resolve_keeps_named_subrange() {
        let mut view = LogicalView::new("test.o");
        let cu = unit(&mut view);
        let subrange = view.create_type(TypeKind::Subrange, constants::DW_TAG_subrange_type, 1);
        view.set_name(subrange, "[0..9]");
        view.entity_mut(subrange).as_type_mut().unwrap().count = 10;
        view.add_object(cu, subrange).unwrap();

        view.resolve(true).unwrap();

        assert_eq!(view.name_of(subrange).as_str(), "[0..9]");
    }
}
