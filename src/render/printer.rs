//! Render passes over a whole view.

use std::path::PathBuf;

use gimli::DwTag;
use tracing::{debug, trace};

use crate::base::{EntityId, Name, file_name, flatten_file_path};
use crate::error::Result;
use crate::select::is_print_eligible;
use crate::settings::PrintSettings;
use crate::view::{LogicalView, ObjectCounter, ScopeKind};

use super::layout::{Layout, format_line, format_offset, indent};
use super::sink::{OutputSink, ScopedSink};
use super::text::entity_text;
use super::yaml::{entity_yaml, quoted, sequence};

/// State of one render pass.
///
/// The layout is measured from the first entity dumped and reused for the
/// rest of the pass. `last_file` tracks the source file of the previous
/// row so a `{Source}` marker is written only when it changes.
pub struct Printer<'a> {
    view: &'a LogicalView,
    settings: &'a PrintSettings,
    counter: &'a mut dyn ObjectCounter,
    layout: Option<Layout>,
    last_file: Name,
}

impl<'a> Printer<'a> {
    pub fn new(
        view: &'a LogicalView,
        settings: &'a PrintSettings,
        counter: &'a mut dyn ObjectCounter,
    ) -> Self {
        Self {
            view,
            settings,
            counter,
            layout: None,
            last_file: Name::NONE,
        }
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    /// Write the text rendering of the whole view.
    pub fn print_text(&mut self, out: &mut dyn OutputSink) -> Result<()> {
        let root = self.view.root();
        if !self.settings.is_split() && !self.settings.quiet {
            self.dump_text(out, root)?;
        }
        if let Some(scope) = self.view.scope(root) {
            for &child in scope.children() {
                self.print_text_unit(out, child)?;
            }
        }
        out.write_str("\n")?;
        Ok(())
    }

    fn print_text_unit(&mut self, out: &mut dyn OutputSink, id: EntityId) -> Result<()> {
        match self.split_path(id, "txt") {
            Some(path) => {
                let mut split = ScopedSink::open(out, &path)?;
                self.print_text_tree(&mut split, id)?;
                split.close()
            }
            None => self.print_text_tree(out, id),
        }
    }

    fn print_text_tree(&mut self, out: &mut dyn OutputSink, id: EntityId) -> Result<()> {
        let view = self.view;
        let settings = self.settings;
        let entity = view.entity(id);
        if !is_print_eligible(view, id, settings) || (settings.quiet && !settings.is_split()) {
            return Ok(());
        }
        self.dump_text(out, id)?;

        if let Some(scope) = entity.as_scope() {
            for &child in scope.children().iter().chain(scope.lines()) {
                if settings.has_patterns() && !view.entity(child).has_pattern() {
                    continue;
                }
                self.print_text_tree(out, child)?;
            }
        }
        Ok(())
    }

    /// Write the row of `id`, preceded by a `{Source}` marker when the
    /// source file changed. Kinds the object filter excludes are skipped.
    pub fn dump_text(&mut self, out: &mut dyn OutputSink, id: EntityId) -> Result<()> {
        let view = self.view;
        let settings = self.settings;
        let entity = view.entity(id);
        if !settings.objects.allows(entity) {
            return Ok(());
        }
        self.counter.increment_printed(entity.kind_label());

        let layout = match self.layout {
            Some(layout) => layout,
            None => {
                let layout = Layout::measure(view, id, settings)?;
                debug!(indentation = layout.indentation_size, "measured layout");
                *self.layout.insert(layout)
            }
        };

        let is_unit = entity.scope_kind() == Some(ScopeKind::CompileUnit);
        let mut row = String::new();
        if is_unit {
            self.last_file = Name::NONE;
            row.push('\n');
        }

        if entity.flags.invalid_file_name {
            row.push_str(&format!(
                "\n{}  {{Source}} {}\n",
                " ".repeat(layout.indentation_size),
                format_offset(entity.offset)?
            ));
        } else if entity.file_name.is_some() && entity.file_name != self.last_file && !is_unit {
            self.last_file = entity.file_name;
            row.push_str(&format!(
                "\n{}  {{Source}} \"{}\"\n",
                " ".repeat(layout.indentation_size),
                file_name(&view.text(entity.file_name))
            ));
        }

        row.push_str(&self.columns(id, &layout)?);
        row.push(' ');
        row.push_str(&format_line(entity.display_line())?);
        row.push(' ');
        row.push_str(&indent(view, id, settings));
        row.push(' ');
        row.push_str(&entity_text(view, id, settings, &layout)?);
        row.push('\n');

        trace!(?id, "dump");
        out.write_str(&row)?;
        Ok(())
    }

    /// The attribute column block of `id`.
    fn columns(&self, id: EntityId, layout: &Layout) -> Result<String> {
        let view = self.view;
        let settings = self.settings;
        let entity = view.entity(id);
        if entity.is_root() {
            return Ok(" ".repeat(layout.indentation_size));
        }

        let mut columns = String::new();
        if settings.show_dwarf_offset {
            columns.push_str(&format_offset(entity.offset)?);
        }
        if settings.show_dwarf_parent {
            let parent = entity.parent().map_or(0, |parent| view.entity(parent).offset);
            columns.push_str(&format_offset(parent)?);
        }
        if settings.show_level {
            columns.push_str(&format!("{:03}", entity.level()));
        }
        if settings.show_is_global {
            columns.push(if entity.flags.is_global_reference { 'X' } else { ' ' });
        }
        if settings.show_dwarf_tag {
            let tag = if entity.is_line() {
                "DW_AT_stml_list".to_string()
            } else {
                tag_name(entity.tag)
            };
            columns.push_str(&format!("{:<width$}", format!("[{tag}]"), width = layout.tag_width));
        }
        Ok(columns)
    }

    // ========================================================================
    // YAML
    // ========================================================================

    /// Write the YAML rendering of the whole view: one document, or one
    /// document per compile unit when splitting.
    pub fn print_yaml(&mut self, out: &mut dyn OutputSink) -> Result<()> {
        let view = self.view;
        let root = view.root();
        let units = view.scope(root).map(|scope| scope.children()).unwrap_or_default();
        let input_file = view.name_of(root);

        if self.settings.is_split() {
            for &unit in units {
                let items = self.yaml_items(unit);
                if let Some(path) = self.split_path(unit, "yaml") {
                    let mut split = ScopedSink::open(out, &path)?;
                    split.write_str(&yaml_document(&input_file, items))?;
                    split.close()?;
                }
            }
            return Ok(());
        }
        if self.settings.quiet {
            return Ok(());
        }

        let mut items = Vec::new();
        for &unit in units {
            items.extend(self.yaml_items(unit));
        }
        out.write_str(&yaml_document(&input_file, items))?;
        Ok(())
    }

    /// The YAML items for `id`: its own mapping with nested `children`, or
    /// the items of its children when its kind is filtered out.
    fn yaml_items(&mut self, id: EntityId) -> Vec<String> {
        let view = self.view;
        let settings = self.settings;
        let entity = view.entity(id);
        if !is_print_eligible(view, id, settings) {
            return Vec::new();
        }

        let mut nested = Vec::new();
        if let Some(scope) = entity.as_scope() {
            for &child in scope.children().iter().chain(scope.lines()) {
                if settings.has_patterns() && !view.entity(child).has_pattern() {
                    continue;
                }
                nested.extend(self.yaml_items(child));
            }
        }
        if !settings.objects.allows(entity) {
            return nested;
        }

        self.counter.increment_printed(entity.kind_label());
        let mut item = entity_yaml(view, id);
        if entity.is_scope() {
            item.push_str(&sequence("children", nested));
            item.push('\n');
        }
        vec![item]
    }

    /// Split file for a compile unit, `None` when not splitting or `id` is
    /// not a compile unit.
    fn split_path(&self, id: EntityId, extension: &str) -> Option<PathBuf> {
        let location = self.settings.split_location.as_ref()?;
        if self.view.entity(id).scope_kind() != Some(ScopeKind::CompileUnit) {
            return None;
        }
        let stem = flatten_file_path(&self.view.name_of(id));
        Some(location.join(format!("{stem}.{extension}")))
    }
}

fn tag_name(tag: DwTag) -> String {
    match tag.static_string() {
        Some(name) => name.to_string(),
        None if tag.0 == 0 => "DW_TAG_file".to_string(),
        None => format!("DW_TAG_unknown_{:#x}", tag.0),
    }
}

fn yaml_document(input_file: &str, items: Vec<String>) -> String {
    format!(
        "input_file: {}\n{}\n",
        quoted(input_file),
        sequence("objects", items)
    )
}

impl LogicalView {
    /// Sort, match patterns and write the text rendering to `out`, followed
    /// by the summary table when enabled.
    pub fn print_text(&mut self, settings: &PrintSettings, out: &mut dyn OutputSink) -> Result<()> {
        self.render_pass(settings, out, |printer, out| printer.print_text(out))?;
        if settings.show_summary {
            out.write_str(&self.summary().render())?;
        }
        Ok(())
    }

    /// Sort, match patterns and write the YAML rendering to `out`. The
    /// summary table is never appended, so the output stays one document.
    pub fn print_yaml(&mut self, settings: &PrintSettings, out: &mut dyn OutputSink) -> Result<()> {
        self.render_pass(settings, out, |printer, out| printer.print_yaml(out))
    }

    fn render_pass<F>(
        &mut self,
        settings: &PrintSettings,
        out: &mut dyn OutputSink,
        pass: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Printer<'_>, &mut dyn OutputSink) -> Result<()>,
    {
        self.sort(settings.sort);
        if settings.has_patterns() {
            self.match_patterns(&settings.patterns)?;
        }

        let mut summary = self.take_summary();
        summary.reset_printed();
        let result = {
            let mut printer = Printer::new(self, settings, &mut summary);
            pass(&mut printer, &mut *out)
        };
        self.restore_summary(summary);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySink;
    use crate::view::{FunctionKind, LineFlag, LineFlags, SummaryTable};
    use gimli::constants;
    use std::path::Path;

    /// Root, one unit, one function with one line.
    fn small_view() -> (LogicalView, EntityId, EntityId) {
        let mut view = LogicalView::new("test.o");
        let cu = view.create_scope(ScopeKind::CompileUnit, constants::DW_TAG_compile_unit, 0xb);
        view.set_name(cu, "test.cpp");
        view.add_object(view.root(), cu).unwrap();
        let func = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            0x20,
        );
        view.set_name(func, "foo");
        view.set_file_name(func, "test.cpp");
        view.entity_mut(func).line = 2;
        view.add_object(cu, func).unwrap();
        let line = view.create_line(0x30, 2, LineFlags::default().with(LineFlag::IsLineRecord));
        view.add_object(func, line).unwrap();
        (view, cu, func)
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name(constants::DW_TAG_subprogram), "DW_TAG_subprogram");
        assert_eq!(tag_name(DwTag(0)), "DW_TAG_file");
    }

    #[test]
    fn test_dump_text_columns() {
        let (view, _, func) = small_view();
        let settings = PrintSettings {
            show_level: true,
            show_indent: false,
            ..PrintSettings::default()
        };
        let mut counter = SummaryTable::new();
        let mut printer = Printer::new(&view, &settings, &mut counter);
        let mut out = MemorySink::new();

        printer.dump_text(&mut out, func).unwrap();

        let text = out.main();
        assert!(text.starts_with("\n     {Source} \"test.cpp\"\n"));
        assert!(text.contains("001     2     {Function} \"foo\" -> \"void\"\n"));
    }

    #[test]
    fn test_source_marker_only_on_change() {
        let (view, _, func) = small_view();
        let settings = PrintSettings::default();
        let mut counter = SummaryTable::new();
        let mut printer = Printer::new(&view, &settings, &mut counter);
        let mut out = MemorySink::new();

        printer.dump_text(&mut out, func).unwrap();
        printer.dump_text(&mut out, func).unwrap();

        assert_eq!(out.main().matches("{Source}").count(), 1);
    }

    #[test]
    fn test_filtered_kind_not_counted() {
        let (view, cu, _) = small_view();
        let settings = PrintSettings::default();
        let mut counter = SummaryTable::new();
        let mut out = MemorySink::new();
        Printer::new(&view, &settings, &mut counter)
            .print_text(&mut out)
            .unwrap();

        assert_eq!(counter.printed("CompileUnit"), 1);
        assert_eq!(counter.printed("Function"), 1);
        assert_eq!(counter.printed("CodeLine"), 0);
        assert!(out.main().contains("{CompileUnit} \"test.cpp\""));
        assert!(view.entity(cu).is_scope());
    }

    #[test]
    fn test_quiet_without_split_prints_nothing() {
        let (mut view, _, _) = small_view();
        let settings = PrintSettings {
            quiet: true,
            ..PrintSettings::default()
        };
        let mut out = MemorySink::new();
        view.print_text(&settings, &mut out).unwrap();

        assert_eq!(out.main(), "\n");
    }

    #[test]
    fn test_split_text_per_unit() {
        let (mut view, _, _) = small_view();
        let settings = PrintSettings {
            split_location: Some(PathBuf::from("out")),
            ..PrintSettings::default()
        };
        let mut out = MemorySink::new();
        view.print_text(&settings, &mut out).unwrap();

        assert!(!out.main().contains("{InputFile}"));
        let unit = out.file(Path::new("out/test_cpp.txt")).unwrap();
        assert!(unit.contains("{CompileUnit} \"test.cpp\""));
        assert!(unit.contains("{Function} \"foo\""));
    }

    #[test]
    fn test_yaml_hoists_filtered_children() {
        let (mut view, _, _) = small_view();
        let settings = PrintSettings::default();
        let mut out = MemorySink::new();
        view.print_yaml(&settings, &mut out).unwrap();

        let yaml = out.main();
        assert!(yaml.starts_with("input_file: \"test.o\"\nobjects:\n  - object: \"CompileUnit\"\n"));
        assert!(yaml.contains("    children:\n      - object: \"Function\"\n"));
        assert!(yaml.contains("        children: []\n"));
        assert!(!yaml.contains("CodeLine"));
    }

    #[test]
    fn test_summary_appended() {
        let (mut view, _, _) = small_view();
        let settings = PrintSettings {
            show_summary: true,
            ..PrintSettings::default()
        };
        let mut out = MemorySink::new();
        view.print_text(&settings, &mut out).unwrap();
        view.print_text(&settings, &mut out).unwrap();

        assert!(out.main().contains("\nLogical View:\n"));
        assert_eq!(view.summary().found("Function"), 1);
        assert_eq!(view.summary().printed("Function"), 1);
    }

    #[test]
    fn test_yaml_never_carries_summary() {
        let (mut view, _, _) = small_view();
        let settings = PrintSettings {
            show_summary: true,
            ..PrintSettings::default()
        };
        let mut out = MemorySink::new();
        view.print_yaml(&settings, &mut out).unwrap();

        let yaml = out.main();
        assert!(!yaml.contains("Logical View:"));
        assert!(yaml.ends_with("        children: []\n"));
        let doc: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<_> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(|key| key.as_str())
            .collect();
        assert_eq!(keys, ["input_file", "objects"]);
        assert_eq!(view.summary().printed("Function"), 1);
    }
}
