//! Stable sorting of scope contents.

use std::cmp::Ordering;

use tracing::debug;

use crate::base::EntityId;
use crate::settings::SortKey;
use crate::view::LogicalView;

/// Total order over two entities of the same view.
pub type Comparator = fn(&LogicalView, EntityId, EntityId) -> Ordering;

/// The comparator for `key`; `None` keeps insertion order.
pub fn comparator(key: SortKey) -> Option<Comparator> {
    match key {
        SortKey::None => None,
        SortKey::Kind => Some(compare_kind),
        SortKey::Line => Some(compare_line),
        SortKey::Name => Some(compare_name),
        SortKey::Offset => Some(compare_offset),
    }
}

fn compare_kind(view: &LogicalView, a: EntityId, b: EntityId) -> Ordering {
    let (ea, eb) = (view.entity(a), view.entity(b));
    ea.kind_label()
        .cmp(eb.kind_label())
        .then_with(|| ea.line.cmp(&eb.line))
        .then_with(|| compare_name(view, a, b))
}

fn compare_line(view: &LogicalView, a: EntityId, b: EntityId) -> Ordering {
    let (ea, eb) = (view.entity(a), view.entity(b));
    ea.line
        .cmp(&eb.line)
        .then_with(|| ea.kind_label().cmp(eb.kind_label()))
        .then_with(|| compare_name(view, a, b))
}

fn compare_name(view: &LogicalView, a: EntityId, b: EntityId) -> Ordering {
    view.name_of(a).cmp(&view.name_of(b))
}

fn compare_offset(view: &LogicalView, a: EntityId, b: EntityId) -> Ordering {
    view.entity(a).offset.cmp(&view.entity(b).offset)
}

fn sort_ids(view: &LogicalView, ids: &mut [EntityId], compare: Comparator) {
    ids.sort_by(|a, b| compare(view, *a, *b));
}

impl LogicalView {
    /// Sort the whole tree by `key`.
    pub fn sort(&mut self, key: SortKey) {
        self.sort_scope(self.root(), key);
    }

    /// Stably sort the scopes, symbols, types and children of `scope` and of
    /// every scope below it. Lines keep their stored order.
    pub fn sort_scope(&mut self, scope: EntityId, key: SortKey) {
        let Some(compare) = comparator(key) else {
            return;
        };
        debug!(?scope, ?key, "sorting");
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            let Some(data) = self.scope_mut(id) else {
                continue;
            };
            let mut lists = [
                std::mem::take(&mut data.scopes),
                std::mem::take(&mut data.symbols),
                std::mem::take(&mut data.types),
                std::mem::take(&mut data.children),
            ];
            for list in &mut lists {
                sort_ids(self, list, compare);
            }
            stack.extend(lists[0].iter().copied());

            let [scopes, symbols, types, children] = lists;
            if let Some(data) = self.scope_mut(id) {
                data.scopes = scopes;
                data.symbols = symbols;
                data.types = types;
                data.children = children;
            }
        }
    }

    /// Sort only the compile units directly under the root.
    pub fn sort_compile_units(&mut self, key: SortKey) {
        let Some(compare) = comparator(key) else {
            return;
        };
        let root = self.root();
        let Some(data) = self.scope_mut(root) else {
            return;
        };
        let mut scopes = std::mem::take(&mut data.scopes);
        let mut children = std::mem::take(&mut data.children);
        sort_ids(self, &mut scopes, compare);
        sort_ids(self, &mut children, compare);
        if let Some(data) = self.scope_mut(root) {
            data.scopes = scopes;
            data.children = children;
        }
    }
}
