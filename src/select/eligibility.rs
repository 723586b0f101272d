//! Whether an entity takes part in a render pass.

use crate::base::EntityId;
use crate::settings::PrintSettings;
use crate::view::LogicalView;

/// Decide if `id` and its subtree are rendered.
///
/// Only scopes are checked; symbols, types and lines are always eligible
/// and are filtered by their parent's pattern walk instead. A scope must
/// pass three checks:
/// - visibility: with exactly one of globals-only/locals-only requested,
///   the scope must contain (or be) an entity of that visibility;
/// - generated code: unless `show_generated` is set, functions with no
///   name and no line are skipped;
/// - patterns: when patterns are configured, the scope or something
///   below it must have matched.
pub fn is_print_eligible(view: &LogicalView, id: EntityId, settings: &PrintSettings) -> bool {
    let entity = view.entity(id);
    let Some(scope) = entity.as_scope() else {
        return true;
    };
    let flags = scope.flags();
    let is_global = entity.flags.is_global_reference;

    let only_globals = settings.show_only_globals;
    let only_locals = settings.show_only_locals;
    if only_globals != only_locals
        && ((only_globals && !(flags.has_globals() || is_global))
            || (only_locals && !(flags.has_locals() || !is_global)))
    {
        return false;
    }

    let generated = scope.is_function()
        && !settings.show_generated
        && entity.name.is_none()
        && entity.line == 0;
    if generated {
        return false;
    }

    !settings.has_patterns() || entity.has_pattern()
}
