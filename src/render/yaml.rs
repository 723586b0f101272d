//! One-entity YAML rendering.
//!
//! Every entity renders as a mapping with the keys `object`, `name`,
//! `type`, `source`, `dwarf` and `attributes`, in that order. Absent values
//! are `null`, empty lists `[]`.

use std::fmt::Write as _;

use crate::base::{EntityId, file_name};
use crate::view::{
    AggregateKind, BlockKind, Entity, EntityData, LineData, LogicalView, ScopeData, ScopeKind,
    SymbolKind, TypeData, TypeKind,
};

use super::text::{inheritance_access, template_value, type_name};

/// Double-quoted YAML scalar. Control characters use the YAML escapes.
pub(crate) fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn quoted_or_null(text: &str) -> String {
    if text.is_empty() {
        "null".to_string()
    } else {
        quoted(text)
    }
}

/// Render `id` as a YAML mapping starting at column 0, one key per line,
/// each line ending in a newline.
pub fn entity_yaml(view: &LogicalView, id: EntityId) -> String {
    let entity = view.entity(id);
    let mut out = String::new();

    let _ = writeln!(out, "object: {}", quoted(entity.kind_label()));
    let _ = writeln!(out, "name: {}", quoted_or_null(&view.qualified_name(id)));
    let _ = writeln!(out, "type: {}", yaml_type(view, entity));

    out.push_str("source:\n");
    let line = entity.display_line();
    if line == 0 {
        out.push_str("  line: null\n");
    } else {
        let _ = writeln!(out, "  line: {line}");
    }
    let _ = writeln!(out, "  file: {}", source_file(view, entity));

    out.push_str("dwarf:\n");
    let _ = writeln!(out, "  offset: 0x{:x}", entity.offset);
    let tag = entity
        .tag
        .static_string()
        .map_or_else(|| "null".to_string(), quoted);
    let _ = writeln!(out, "  tag: {tag}");

    let attributes = match &entity.data {
        EntityData::Scope(scope) => scope_attributes(view, entity, scope),
        EntityData::Symbol(symbol) if symbol.kind == SymbolKind::Member => {
            let access = symbol.access.keyword().map_or_else(|| "null".to_string(), quoted);
            vec![format!("access_specifier: {access}")]
        }
        EntityData::Symbol(_) => Vec::new(),
        EntityData::Type(ty) => type_attributes(view, entity, ty),
        EntityData::Line(line) => line_attributes(line),
    };
    if attributes.is_empty() {
        out.push_str("attributes: {}\n");
    } else {
        out.push_str("attributes:\n");
        for attribute in attributes {
            for line in attribute.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    out
}

fn yaml_type(view: &LogicalView, entity: &Entity) -> String {
    match (&entity.data, entity.ty) {
        (EntityData::Type(ty), _) if matches!(ty.kind, TypeKind::TemplateParameter(_)) => {
            "null".to_string()
        }
        (_, Some(ty)) => quoted(&type_name(view, ty)),
        (_, None) if entity.is_function() => quoted("void"),
        (_, None) => "null".to_string(),
    }
}

fn source_file(view: &LogicalView, entity: &Entity) -> String {
    if entity.flags.invalid_file_name {
        return quoted("?");
    }
    if entity.file_name.is_none() {
        return "null".to_string();
    }
    quoted(file_name(&view.text(entity.file_name)))
}

fn flag(key: &str, value: bool) -> String {
    format!("{key}: {value}")
}

/// `key: []` or `key:` followed by the items as a block sequence.
pub(crate) fn sequence(key: &str, items: Vec<String>) -> String {
    if items.is_empty() {
        return format!("{key}: []");
    }
    let mut out = format!("{key}:");
    for item in items {
        for (index, line) in item.lines().enumerate() {
            let marker = if index == 0 { "- " } else { "  " };
            let _ = write!(out, "\n  {marker}{line}");
        }
    }
    out
}

fn scope_attributes(view: &LogicalView, entity: &Entity, scope: &ScopeData) -> Vec<String> {
    let attributes = &scope.attributes;
    match scope.kind {
        ScopeKind::Block(kind) => vec![
            flag("try", kind == BlockKind::Try),
            flag("catch", kind == BlockKind::Catch),
        ],
        ScopeKind::Aggregate(kind) => {
            let mut out = vec![flag("is_template", attributes.is_template)];
            if kind != AggregateKind::Union {
                let parents = scope
                    .types()
                    .iter()
                    .map(|&id| view.entity(id))
                    .filter_map(|parent| match &parent.data {
                        EntityData::Type(ty) if ty.kind == TypeKind::Inheritance => Some(format!(
                            "parent: {}\naccess_specifier: {}",
                            quoted(&parent.ty.map(|ty| type_name(view, ty)).unwrap_or_default()),
                            quoted(inheritance_access(view, parent, ty))
                        )),
                        _ => None,
                    })
                    .collect();
                out.push(sequence("inherits_from", parents));
            }
            out
        }
        ScopeKind::Enumeration => {
            let enumerators = scope
                .types()
                .iter()
                .map(|&id| view.entity(id))
                .filter_map(|enumerator| match &enumerator.data {
                    EntityData::Type(ty) if ty.kind == TypeKind::Enumerator => Some(format!(
                        "enumerator: {}\nvalue: {}",
                        quoted(&view.text(enumerator.name)),
                        view.text(ty.value)
                    )),
                    _ => None,
                })
                .collect();
            vec![
                flag("class", attributes.is_enum_class),
                sequence("enumerators", enumerators),
            ]
        }
        ScopeKind::Function(_) | ScopeKind::InlinedFunction => {
            let declaration = match entity.reference {
                Some(decl) => {
                    let decl = view.entity(decl);
                    let line = if decl.line == 0 {
                        "null".to_string()
                    } else {
                        decl.line.to_string()
                    };
                    format!(
                        "declaration:\n  file: {}\n  line: {line}",
                        source_file(view, decl)
                    )
                }
                None => "declaration:\n  file: null\n  line: null".to_string(),
            };
            vec![
                declaration,
                flag("is_template", attributes.is_template),
                flag("static", attributes.is_static),
                flag("inline", attributes.is_declared_inline),
                flag("is_inlined", scope.is_inlined()),
                flag("is_declaration", attributes.is_declaration),
            ]
        }
        ScopeKind::TemplatePack => {
            let values = scope
                .types()
                .iter()
                .map(|&id| view.entity(id))
                .filter_map(|param| match &param.data {
                    EntityData::Type(ty) if matches!(ty.kind, TypeKind::TemplateParameter(_)) => {
                        Some(template_value(view, param, ty))
                    }
                    _ => None,
                })
                .collect();
            vec![sequence("types", values)]
        }
        ScopeKind::Root
        | ScopeKind::CompileUnit
        | ScopeKind::Namespace
        | ScopeKind::Array
        | ScopeKind::Alias => Vec::new(),
    }
}

fn type_attributes(view: &LogicalView, entity: &Entity, ty: &TypeData) -> Vec<String> {
    match ty.kind {
        TypeKind::Base => vec![format!("size: {}", ty.byte_size)],
        TypeKind::Enumerator => vec![format!("value: {}", view.text(ty.value))],
        TypeKind::TemplateParameter(_) => {
            vec![format!("value: {}", template_value(view, entity, ty))]
        }
        _ => Vec::new(),
    }
}

fn line_attributes(line: &LineData) -> Vec<String> {
    let flags = line.flags;
    vec![
        flag("NewStatement", flags.is_new_statement()),
        flag("PrologueEnd", flags.is_prologue_end()),
        flag("EndSequence", flags.is_end_sequence()),
        flag("BasicBlock", flags.is_new_basic_block()),
        format!("Discriminator: {}", line.discriminator),
        flag("EpilogueBegin", flags.is_epilogue_begin()),
    ]
}
