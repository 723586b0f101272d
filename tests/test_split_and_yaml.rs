//! YAML documents and split output written to disk.

use std::fs;

use gimli::constants;
use logview::error::codes;
use logview::view::{FunctionKind, ScopeKind};
use logview::{LogicalView, MemorySink, PrintSettings, ViewError, WriterSink};
use serde_yaml::Value;
use tempfile::TempDir;

/// Two units, each with one function; the second function has no type.
fn two_units() -> LogicalView {
    let mut view = LogicalView::new("program.o");
    for (offset, unit, function) in [(0x10, "src/a.cpp", "alpha"), (0x80, "src/b.cpp", "beta")] {
        let cu = view.create_scope(ScopeKind::CompileUnit, constants::DW_TAG_compile_unit, offset);
        view.set_name(cu, unit);
        view.add_object(view.root(), cu).unwrap();
        let func = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            offset + 0x10,
        );
        view.set_name(func, function);
        view.entity_mut(func).line = 3;
        view.add_object(cu, func).unwrap();
    }
    view.resolve(true).unwrap();
    view
}

#[test]
fn test_yaml_document_parses() {
    let mut view = two_units();
    let mut out = MemorySink::new();
    view.print_yaml(&PrintSettings::default(), &mut out).unwrap();

    let doc: Value = serde_yaml::from_str(out.main()).unwrap();
    assert_eq!(doc["input_file"], Value::from("program.o"));
    let objects = doc["objects"].as_sequence().unwrap();
    assert_eq!(objects.len(), 2);

    let unit = &objects[0];
    assert_eq!(unit["object"], Value::from("CompileUnit"));
    assert_eq!(unit["name"], Value::from("src/a.cpp"));
    assert_eq!(unit["dwarf"]["tag"], Value::from("DW_TAG_compile_unit"));
    assert!(unit["type"].is_null());

    let function = &unit["children"][0];
    assert_eq!(function["object"], Value::from("Function"));
    assert_eq!(function["type"], Value::from("void"));
    assert_eq!(function["source"]["line"], Value::from(3));
    assert_eq!(function["attributes"]["static"], Value::Bool(false));
    assert!(function["attributes"]["declaration"]["file"].is_null());
    assert_eq!(function["children"].as_sequence().map(Vec::len), Some(0));
}

#[test]
fn test_split_text_files() {
    let dir = TempDir::new().unwrap();
    let settings = PrintSettings {
        split_location: Some(dir.path().join("views")),
        ..PrintSettings::default()
    };
    let mut view = two_units();
    let mut sink = WriterSink::new(Vec::new());
    view.print_text(&settings, &mut sink).unwrap();

    let first = fs::read_to_string(dir.path().join("views/src_a_cpp.txt")).unwrap();
    let second = fs::read_to_string(dir.path().join("views/src_b_cpp.txt")).unwrap();
    assert!(first.contains("{CompileUnit} \"src/a.cpp\""));
    assert!(first.contains("{Function} \"alpha\""));
    assert!(!first.contains("beta"));
    assert!(second.contains("{Function} \"beta\""));

    let main = String::from_utf8(sink.into_inner()).unwrap();
    assert!(!main.contains("{InputFile}"));
}

#[test]
fn test_split_yaml_files() {
    let dir = TempDir::new().unwrap();
    let settings = PrintSettings {
        split_location: Some(dir.path().to_path_buf()),
        ..PrintSettings::default()
    };
    let mut view = two_units();
    let mut sink = WriterSink::new(Vec::new());
    view.print_yaml(&settings, &mut sink).unwrap();

    let text = fs::read_to_string(dir.path().join("src_b_cpp.yaml")).unwrap();
    let doc: Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(doc["objects"][0]["name"], Value::from("src/b.cpp"));
    assert_eq!(doc["objects"][0]["children"][0]["name"], Value::from("beta"));
}

#[test]
fn test_split_open_failure_aborts() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "").unwrap();
    let settings = PrintSettings {
        split_location: Some(blocker),
        ..PrintSettings::default()
    };
    let mut view = two_units();
    let mut sink = WriterSink::new(Vec::new());

    let err = view.print_text(&settings, &mut sink).unwrap_err();

    assert!(matches!(err, ViewError::SplitOpen { .. }));
    assert_eq!(err.code(), codes::SPLIT_UNABLE_TO_OPEN_FILE);
    assert!(err.to_string().starts_with("Unable to open file '"));
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_yaml_names_with_control_characters_parse_back() {
    let mut view = LogicalView::new("program.o");
    let cu = view.create_scope(ScopeKind::CompileUnit, constants::DW_TAG_compile_unit, 0x10);
    view.set_name(cu, "line1\nline2");
    view.add_object(view.root(), cu).unwrap();
    let func = view.create_scope(
        ScopeKind::Function(FunctionKind::Subprogram),
        constants::DW_TAG_subprogram,
        0x20,
    );
    view.set_name(func, "tab\there \"quoted\" \u{1b}[0m");
    view.entity_mut(func).line = 1;
    view.add_object(cu, func).unwrap();
    view.resolve(true).unwrap();

    let mut out = MemorySink::new();
    view.print_yaml(&PrintSettings::default(), &mut out).unwrap();

    let doc: Value = serde_yaml::from_str(out.main()).unwrap();
    let unit = &doc["objects"][0];
    assert_eq!(unit["name"], Value::from("line1\nline2"));
    assert_eq!(unit["children"][0]["name"], Value::from("tab\there \"quoted\" \u{1b}[0m"));
}

#[test]
fn test_yaml_with_summary_is_one_document() {
    let settings = PrintSettings {
        show_summary: true,
        ..PrintSettings::default()
    };
    let mut view = two_units();
    let mut out = MemorySink::new();
    view.print_yaml(&settings, &mut out).unwrap();

    let doc: Value = serde_yaml::from_str(out.main()).unwrap();
    let keys: Vec<_> = doc.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, [Value::from("input_file"), Value::from("objects")]);

    let mut text = MemorySink::new();
    view.print_text(&settings, &mut text).unwrap();
    assert!(text.main().contains("Logical View:"));
}
