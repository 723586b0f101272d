//! One-entity text rendering.
//!
//! Each entity renders as a `{Kind}` header followed by zero or more
//! attribute sub-lines. The column block, line column and tree indent in
//! front of the header are added by the printer.

use crate::base::{EntityId, file_name};
use crate::error::Result;
use crate::settings::PrintSettings;
use crate::view::{
    AggregateKind, BlockKind, Entity, EntityData, ImportKind, LineData, LogicalView, ScopeData,
    ScopeKind, SymbolData, SymbolKind, TemplateParamKind, TypeData, TypeKind,
};

use super::layout::{Layout, format_offset, indent};

/// Render `id` as its header plus attribute sub-lines, without a trailing
/// newline.
pub fn entity_text(
    view: &LogicalView,
    id: EntityId,
    settings: &PrintSettings,
    layout: &Layout,
) -> Result<String> {
    let entity = view.entity(id);
    let (header, attributes) = match &entity.data {
        EntityData::Scope(scope) => scope_text(view, id, entity, scope, settings)?,
        EntityData::Symbol(symbol) => (symbol_text(view, id, entity, symbol), Vec::new()),
        EntityData::Type(ty) => (type_text(view, id, entity, ty), Vec::new()),
        EntityData::Line(line) => line_text(entity, line, settings),
    };

    let mut text = header;
    if !attributes.is_empty() {
        let prefix = layout.sub_line_prefix(&indent(view, id, settings));
        for attribute in attributes {
            text.push('\n');
            text.push_str(&prefix);
            text.push_str(&attribute);
        }
    }
    Ok(text)
}

/// `"<prefix><name>"` of a type reference.
pub(crate) fn type_name(view: &LogicalView, ty: EntityId) -> String {
    view.qualified_name(ty)
}

/// `[offset]"<type>"` for the arrow of functions and aliases.
fn type_reference(
    view: &LogicalView,
    ty: Option<EntityId>,
    settings: &PrintSettings,
) -> Result<String> {
    Ok(match ty {
        Some(ty) => {
            let offset = if settings.show_dwarf_offset {
                format_offset(view.entity(ty).offset)?
            } else {
                String::new()
            };
            format!("{offset}\"{}\"", type_name(view, ty))
        }
        None if settings.show_void => "\"void\"".to_string(),
        None => "\"\"".to_string(),
    })
}

fn scope_text(
    view: &LogicalView,
    id: EntityId,
    entity: &Entity,
    scope: &ScopeData,
    settings: &PrintSettings,
) -> Result<(String, Vec<String>)> {
    let label = scope.kind.label();
    let name = view.name_of(id);
    let mut attributes = Vec::new();

    let header = match scope.kind {
        ScopeKind::Root | ScopeKind::CompileUnit | ScopeKind::TemplatePack => {
            format!("{{{label}}} \"{name}\"")
        }
        ScopeKind::Namespace => {
            let qualified = view.qualified_name(id);
            if qualified.is_empty() {
                format!("{{{label}}}")
            } else {
                format!("{{{label}}} \"{qualified}\"")
            }
        }
        ScopeKind::Function(_) | ScopeKind::InlinedFunction => {
            let mut header = format!("{{{label}}}");
            if scope.attributes.is_static {
                header.push_str(" static");
            }
            if scope.attributes.is_declared_inline {
                header.push_str(" inline");
            }
            header.push_str(&format!(
                " \"{}\" -> {}",
                view.qualified_name(id),
                type_reference(view, entity.ty, settings)?
            ));

            match entity.reference {
                Some(decl) => attributes.push(format!("Declaration @ {}", declaration(view, decl))),
                None if !scope.attributes.is_declaration => {
                    attributes.push("No declaration".to_string())
                }
                None => {}
            }
            if scope.attributes.is_template {
                attributes.push("Template".to_string());
            }
            if scope.is_inlined() {
                attributes.push("Inlined".to_string());
            }
            if scope.attributes.is_declaration {
                attributes.push("Is declaration".to_string());
            }
            header
        }
        ScopeKind::Aggregate(_) => {
            if scope.attributes.is_template {
                attributes.push("Template".to_string());
            }
            format!("{{{label}}} \"{}\"", view.qualified_name(id))
        }
        ScopeKind::Enumeration => {
            let mut header = format!("{{{label}}}");
            if scope.attributes.is_enum_class {
                header.push_str(" class");
            }
            header.push_str(&format!(" \"{name}\""));
            if let Some(ty) = entity.ty {
                let underlying = type_name(view, ty);
                if underlying != name.as_str() {
                    header.push_str(&format!(" -> \"{underlying}\""));
                }
            }
            header
        }
        ScopeKind::Array => {
            let offset = match entity.ty {
                Some(ty) if settings.show_dwarf_offset => format_offset(view.entity(ty).offset)?,
                _ => String::new(),
            };
            format!("{{{label}}} {offset}\"{name}\"")
        }
        ScopeKind::Alias => format!(
            "{{{label}}} \"{name}\" -> {}",
            type_reference(view, entity.ty, settings)?
        ),
        ScopeKind::Block(kind) => {
            if settings.show_block_attributes {
                match kind {
                    BlockKind::Try => attributes.push("try".to_string()),
                    BlockKind::Catch => attributes.push("catch".to_string()),
                    BlockKind::Lexical => {}
                }
            }
            format!("{{{label}}}")
        }
    };
    Ok((header, attributes))
}

/// `<file>,<line>` of a declaration, `?` for an unknown file.
fn declaration(view: &LogicalView, decl: EntityId) -> String {
    let entity = view.entity(decl);
    let file = if entity.flags.invalid_file_name {
        "?".to_string()
    } else {
        file_name(&view.text(entity.file_name)).to_string()
    };
    format!("{file},{}", entity.line)
}

fn symbol_text(view: &LogicalView, id: EntityId, entity: &Entity, symbol: &SymbolData) -> String {
    let mut text = format!("{{{}}}", symbol.kind.label());
    if symbol.kind == SymbolKind::Member {
        if let Some(keyword) = symbol.access.keyword() {
            text.push(' ');
            text.push_str(keyword);
        }
    }
    text.push_str(&format!(" \"{}\"", view.qualified_name(id)));
    if let Some(ty) = entity.ty {
        text.push_str(&format!(" -> \"{}\"", type_name(view, ty)));
    }
    text
}

/// Access of an inheritance entry; unspecified means public for structs and
/// private otherwise.
pub(crate) fn inheritance_access(
    view: &LogicalView,
    entity: &Entity,
    ty: &TypeData,
) -> &'static str {
    if let Some(keyword) = ty.access.keyword() {
        return keyword;
    }
    let parent_is_struct = entity
        .ty
        .and_then(|parent| view.entity(parent).scope_kind())
        .is_some_and(|kind| kind == ScopeKind::Aggregate(AggregateKind::Struct));
    if parent_is_struct { "public" } else { "private" }
}

/// Value of a template parameter: quoted type or template name, bare value.
pub(crate) fn template_value(view: &LogicalView, entity: &Entity, ty: &TypeData) -> String {
    match ty.kind {
        TypeKind::TemplateParameter(TemplateParamKind::Type) => match entity.ty {
            Some(arg) => format!("\"{}\"", type_name(view, arg)),
            None => "\"\"".to_string(),
        },
        TypeKind::TemplateParameter(TemplateParamKind::Value) => view.text(ty.value).to_string(),
        _ => format!("\"{}\"", view.text(ty.value)),
    }
}

fn type_text(view: &LogicalView, id: EntityId, entity: &Entity, ty: &TypeData) -> String {
    let label = ty.kind.label();
    let name = view.qualified_name(id);
    let target = entity.ty.map(|target| type_name(view, target));
    match ty.kind {
        TypeKind::Base => format!("{{{label}}} -> \"{name}\""),
        TypeKind::Typedef => format!(
            "{{{label}}} \"{name}\" -> \"{}\"",
            target.unwrap_or_default()
        ),
        TypeKind::Enumerator => format!("{{{label}}} \"{name}\" = {}", view.text(ty.value)),
        TypeKind::TemplateParameter(_) => format!(
            "{{{label}}} \"{name}\" <- {}",
            template_value(view, entity, ty)
        ),
        TypeKind::Import(kind) => {
            let imported = target.unwrap_or_else(|| name.clone());
            match kind {
                ImportKind::Module => format!("{{{label}}} namespace -> \"{imported}\""),
                ImportKind::Declaration => format!("{{{label}}} -> \"{imported}\""),
            }
        }
        TypeKind::Inheritance => format!(
            "{{{label}}} {} -> \"{}\"",
            inheritance_access(view, entity, ty),
            target.unwrap_or_default()
        ),
        _ => format!("{{{label}}} \"{name}\""),
    }
}

fn line_text(entity: &Entity, line: &LineData, settings: &PrintSettings) -> (String, Vec<String>) {
    let header = format!("{{{}}}", entity.kind_label());
    let mut attributes = Vec::new();
    if settings.show_codeline_attributes {
        let flags = line.flags;
        if flags.is_new_statement() {
            attributes.push("NewStatement".to_string());
        }
        if flags.is_prologue_end() {
            attributes.push("PrologueEnd".to_string());
        }
        if flags.is_end_sequence() {
            attributes.push("EndSequence".to_string());
        }
        if flags.is_new_basic_block() {
            attributes.push("BasicBlock".to_string());
        }
        if flags.has_discriminator() {
            attributes.push(format!("Discriminator {}", line.discriminator));
        }
        if flags.is_epilogue_begin() {
            attributes.push("EpilogueBegin".to_string());
        }
    }
    (header, attributes)
}
