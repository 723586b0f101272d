//! Column layout of text rows.

use crate::base::EntityId;
use crate::error::{Result, ViewError};
use crate::settings::PrintSettings;
use crate::view::LogicalView;

/// Widest formatted numeric field that fits its fixed column.
const MAX_FIELD_WIDTH: usize = 15;

const LEVEL_WIDTH: usize = 3;
const GLOBAL_WIDTH: usize = 1;
const TAG_WIDTH: usize = 42;

/// Spaces between the column block and an attribute sub-line: the
/// separators around the line column plus the line column itself.
const SUB_LINE_GAP: usize = 3 + 8 + 4;

/// `[0x%08x]`
pub fn format_offset(offset: u64) -> Result<String> {
    let text = format!("[0x{offset:08x}]");
    if text.len() > MAX_FIELD_WIDTH {
        return Err(ViewError::MalformedField {
            field: "offset",
            value: offset,
        });
    }
    Ok(text)
}

/// Right-aligned line number plus two spaces, or eight spaces for line 0.
pub fn format_line(line: u64) -> Result<String> {
    if line == 0 {
        return Ok(" ".repeat(8));
    }
    let text = format!("{line:>5}   ");
    if text.len() > MAX_FIELD_WIDTH {
        return Err(ViewError::MalformedField {
            field: "line",
            value: line,
        });
    }
    Ok(text)
}

/// Widths of the optional attribute columns, measured once per render pass
/// from the first entity dumped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub offset_width: usize,
    pub parent_width: usize,
    pub level_width: usize,
    pub global_width: usize,
    pub tag_width: usize,
    /// Sum of the enabled column widths.
    pub indentation_size: usize,
}

impl Layout {
    /// Measure the columns `settings` enables on the entity `first`.
    pub fn measure(view: &LogicalView, first: EntityId, settings: &PrintSettings) -> Result<Self> {
        let entity = view.entity(first);
        let parent_offset = entity.parent().map_or(0, |parent| view.entity(parent).offset);
        let mut layout = Layout {
            offset_width: format_offset(entity.offset)?.len(),
            parent_width: format_offset(parent_offset)?.len(),
            level_width: LEVEL_WIDTH,
            global_width: GLOBAL_WIDTH,
            tag_width: TAG_WIDTH,
            indentation_size: 0,
        };
        layout.indentation_size = layout.enabled_width(settings);
        Ok(layout)
    }

    /// Layout for rendering a single entity outside a render pass.
    pub fn fixed(settings: &PrintSettings) -> Self {
        let mut layout = Layout {
            offset_width: 12,
            parent_width: 12,
            level_width: LEVEL_WIDTH,
            global_width: GLOBAL_WIDTH,
            tag_width: TAG_WIDTH,
            indentation_size: 0,
        };
        layout.indentation_size = layout.enabled_width(settings);
        layout
    }

    fn enabled_width(&self, settings: &PrintSettings) -> usize {
        [
            (settings.show_dwarf_offset, self.offset_width),
            (settings.show_dwarf_parent, self.parent_width),
            (settings.show_level, self.level_width),
            (settings.show_is_global, self.global_width),
            (settings.show_dwarf_tag, self.tag_width),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, width)| width)
        .sum()
    }

    /// Prefix of an attribute sub-line for an entity with tree indent `indent`.
    pub fn sub_line_prefix(&self, indent: &str) -> String {
        format!(
            "{}{}- ",
            " ".repeat(self.indentation_size + SUB_LINE_GAP),
            indent
        )
    }
}

/// Tree indent of `id`: two spaces per level plus two, none for the root.
pub fn indent(view: &LogicalView, id: EntityId, settings: &PrintSettings) -> String {
    let entity = view.entity(id);
    if entity.is_root() || !settings.show_indent {
        return String::new();
    }
    " ".repeat((entity.level() as usize + 1) * 2)
}
