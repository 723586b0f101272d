//! The arena that owns every entity of a logical view.

use gimli::DwTag;
use smol_str::SmolStr;
use tracing::trace;

use super::entity::{Entity, EntityData, LineData, ScopeData, SymbolData, TypeData};
use super::flags::{LineFlags, ScopeFlag};
use super::kind::{ScopeKind, SymbolKind, TypeKind};
use super::summary::{ObjectCounter, SummaryTable};
use crate::base::{EntityId, Interner, Name, unify_file_path};
use crate::error::{Result, ViewError};

/// A logical view: the entity tree of one input file.
///
/// Entities are created detached with the `create_*` methods and then
/// attached with [`LogicalView::add_object`]. The view owns every entity;
/// dropping it releases the whole tree. Ids handed out by one view must not
/// be used with another.
#[derive(Debug)]
pub struct LogicalView {
    entities: Vec<Entity>,
    root: EntityId,
    interner: Interner,
    summary: SummaryTable,
}

impl LogicalView {
    /// Create a view whose root is named after the input file, with its
    /// separators normalized to `/`.
    pub fn new(input_file: &str) -> Self {
        let interner = Interner::new();
        let mut root = Entity::new(
            EntityData::Scope(ScopeData::new(ScopeKind::Root)),
            DwTag(0),
            0,
        );
        root.name = interner.intern(&unify_file_path(input_file));
        Self {
            entities: vec![root],
            root: EntityId::new(0),
            interner,
            summary: SummaryTable::new(),
        }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// The text of an interned name; empty for [`Name::NONE`].
    pub fn text(&self, name: Name) -> SmolStr {
        self.interner.value(name)
    }

    /// The (possibly resolved) name of an entity.
    pub fn name_of(&self, id: EntityId) -> SmolStr {
        self.text(self.entity(id).name)
    }

    /// # Panics
    /// Panics if `id` was not created by this view.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.slot()]
    }

    /// # Panics
    /// Panics if `id` was not created by this view.
    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.slot()]
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.slot())
    }

    pub fn scope(&self, id: EntityId) -> Option<&ScopeData> {
        self.entity(id).as_scope()
    }

    pub(crate) fn scope_mut(&mut self, id: EntityId) -> Option<&mut ScopeData> {
        self.entity_mut(id).as_scope_mut()
    }

    /// Number of entities, attached or not, including the root.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The compile units owned by the root.
    pub fn compile_units(&self) -> &[EntityId] {
        self.scope(self.root).map(ScopeData::scopes).unwrap_or_default()
    }

    /// Found counts gathered while the tree was built.
    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    pub(crate) fn take_summary(&mut self) -> SummaryTable {
        std::mem::take(&mut self.summary)
    }

    pub(crate) fn restore_summary(&mut self, summary: SummaryTable) {
        self.summary = summary;
    }

    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new(self.entities.len() as u32);
        #[cfg_attr(not(debug_assertions), allow(unused_mut))]
        let mut entity = entity;
        #[cfg(debug_assertions)]
        {
            entity.instance = id.index();
        }
        self.entities.push(entity);
        id
    }

    /// Create a detached scope.
    pub fn create_scope(&mut self, kind: ScopeKind, tag: DwTag, offset: u64) -> EntityId {
        self.push(Entity::new(EntityData::Scope(ScopeData::new(kind)), tag, offset))
    }

    /// Create a detached symbol.
    pub fn create_symbol(&mut self, kind: SymbolKind, tag: DwTag, offset: u64) -> EntityId {
        let data = SymbolData {
            kind,
            access: Default::default(),
        };
        let id = self.push(Entity::new(EntityData::Symbol(data), tag, offset));
        if kind == SymbolKind::UnspecifiedParameter {
            let dots = self.intern("...");
            self.entity_mut(id).name = dots;
        }
        id
    }

    /// Create a detached type.
    pub fn create_type(&mut self, kind: TypeKind, tag: DwTag, offset: u64) -> EntityId {
        self.push(Entity::new(EntityData::Type(TypeData::new(kind)), tag, offset))
    }

    /// Create a detached line record.
    pub fn create_line(&mut self, offset: u64, line: u64, flags: LineFlags) -> EntityId {
        let data = LineData {
            discriminator: 0,
            flags,
        };
        let id = self.push(Entity::new(EntityData::Line(data), DwTag(0), offset));
        self.entity_mut(id).line = line;
        id
    }

    /// Set the name of `id`. Root and compile-unit names are paths and get
    /// their separators normalized to `/`.
    pub fn set_name(&mut self, id: EntityId, name: &str) {
        let name = match self.entity(id).scope_kind() {
            Some(ScopeKind::Root | ScopeKind::CompileUnit) => self.intern(&unify_file_path(name)),
            _ => self.intern(name),
        };
        self.entity_mut(id).name = name;
    }

    /// Set the declaring file; separators are normalized to `/`.
    pub fn set_file_name(&mut self, id: EntityId, path: &str) {
        let name = self.intern(&unify_file_path(path));
        self.entity_mut(id).file_name = name;
    }

    pub fn set_type(&mut self, id: EntityId, ty: EntityId) {
        self.entity_mut(id).ty = Some(ty);
    }

    /// Link `id` to its specification or abstract-origin entity.
    pub fn set_reference(&mut self, id: EntityId, target: EntityId) {
        let entity = self.entity_mut(id);
        entity.reference = Some(target);
        entity.flags.has_reference = true;
    }

    // ========================================================================
    // OWNERSHIP
    // ========================================================================

    /// Attach `child` to the scope `parent`.
    ///
    /// The child goes into the owned list for its kind and, unless it is a
    /// line, into the parent's children. The has-globals/has-locals bit and
    /// the has-X bit for the child's kind are propagated from `parent`
    /// toward the root.
    ///
    /// Fails without changing the tree when `parent` is not a scope, when
    /// `child` already has an owner, or when a line is attached to a scope
    /// that is neither a compile unit nor a function.
    pub fn add_object(&mut self, parent: EntityId, child: EntityId) -> Result<()> {
        let parent_entity = self.entity(parent);
        let Some(parent_scope) = parent_entity.as_scope() else {
            return Err(ViewError::NotAScope { id: parent });
        };
        let child_entity = self.entity(child);
        if child_entity.parent.is_some() || child == self.root || child == parent {
            return Err(ViewError::AlreadyAttached { id: child });
        }
        if child_entity.is_line() && !parent_scope.kind.can_have_lines() {
            return Err(ViewError::LineNotAllowed {
                scope: parent,
                kind: parent_scope.kind.label(),
            });
        }

        let kind_flag = match child_entity.data {
            EntityData::Scope(_) => ScopeFlag::HasScopes,
            EntityData::Symbol(_) => ScopeFlag::HasSymbols,
            EntityData::Type(_) => ScopeFlag::HasTypes,
            EntityData::Line(_) => ScopeFlag::HasLines,
        };
        let visibility_flag = if child_entity.flags.is_global_reference {
            ScopeFlag::HasGlobals
        } else {
            ScopeFlag::HasLocals
        };
        let label = child_entity.kind_label();
        let level = if parent == self.root {
            0
        } else {
            parent_entity.level + 1
        };

        if let Some(scope) = self.scope_mut(parent) {
            match kind_flag {
                ScopeFlag::HasScopes => scope.scopes.push(child),
                ScopeFlag::HasSymbols => scope.symbols.push(child),
                ScopeFlag::HasTypes => scope.types.push(child),
                _ => scope.lines.push(child),
            }
            if kind_flag != ScopeFlag::HasLines {
                scope.children.push(child);
            }
        }
        self.entity_mut(child).parent = Some(parent);
        self.set_subtree_level(child, level);
        self.summary.increment_found(label);

        self.propagate_flag(parent, visibility_flag);
        self.propagate_flag(parent, kind_flag);

        trace!(?parent, ?child, kind = label, level, "attached");
        Ok(())
    }

    /// Set `flag` on `start` and its ancestors, stopping at the first scope
    /// that already has it.
    pub(crate) fn propagate_flag(&mut self, start: EntityId, flag: ScopeFlag) {
        let mut current = Some(start);
        while let Some(id) = current {
            let entity = self.entity_mut(id);
            let parent = entity.parent;
            let Some(scope) = entity.as_scope_mut() else {
                break;
            };
            if scope.flags.contains(flag) {
                break;
            }
            scope.flags.insert(flag);
            current = parent;
        }
    }

    /// Subtrees may be attached after they were populated, so levels are
    /// pushed down from the new attachment point.
    fn set_subtree_level(&mut self, id: EntityId, level: u32) {
        let mut stack = vec![(id, level)];
        while let Some((id, level)) = stack.pop() {
            let entity = self.entity_mut(id);
            entity.level = level;
            if let Some(scope) = entity.as_scope() {
                stack.extend(
                    scope
                        .children
                        .iter()
                        .chain(&scope.lines)
                        .map(|child| (*child, level + 1)),
                );
            }
        }
    }

    // ========================================================================
    // TRAVERSAL
    // ========================================================================

    /// `id` and everything it owns, parents before children, lines after
    /// the structural children of their scope.
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(scope) = self.scope(id) {
                stack.extend(scope.lines.iter().rev());
                stack.extend(scope.children.iter().rev());
            }
        }
        out
    }

    /// Walk the owning-parent chain starting at the parent of `id`.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(self.entity(id).parent, |id| self.entity(*id).parent)
    }
}
