//! Per-kind found/printed statistics.

use indexmap::IndexMap;
use std::fmt::Write as _;

/// Receives one notification per entity found while building and per
/// entity printed while rendering, keyed by kind label.
pub trait ObjectCounter {
    fn increment_found(&mut self, kind: &'static str);
    fn increment_printed(&mut self, kind: &'static str);
}

const ROWS: [&str; 16] = [
    "Alias",
    "Block",
    "Class",
    "CodeLine",
    "CompileUnit",
    "Enum",
    "Function",
    "Member",
    "Namespace",
    "Parameter",
    "PrimitiveType",
    "Struct",
    "TemplateParameter",
    "Union",
    "Using",
    "Variable",
];

const LABEL_WIDTH: usize = 20;
const COLUMN_WIDTH: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counts {
    found: usize,
    printed: usize,
}

/// The summary table: a fixed set of rows plus totals.
///
/// Labels outside the fixed rows (arrays, enumerators, modifier types and
/// the like) are not tracked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryTable {
    rows: IndexMap<&'static str, Counts>,
}

impl Default for SummaryTable {
    fn default() -> Self {
        Self {
            rows: ROWS.iter().map(|label| (*label, Counts::default())).collect(),
        }
    }
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(&self, kind: &str) -> usize {
        self.rows.get(kind).map_or(0, |counts| counts.found)
    }

    pub fn printed(&self, kind: &str) -> usize {
        self.rows.get(kind).map_or(0, |counts| counts.printed)
    }

    pub fn total_found(&self) -> usize {
        self.rows.values().map(|counts| counts.found).sum()
    }

    pub fn total_printed(&self) -> usize {
        self.rows.values().map(|counts| counts.printed).sum()
    }

    /// Zero every printed count, keeping the found counts.
    pub fn reset_printed(&mut self) {
        for counts in self.rows.values_mut() {
            counts.printed = 0;
        }
    }

    /// Render the table.
    ///
    /// ```text
    /// Logical View:
    ///   Object                   Found   Printed
    ///   ------------------------------------------
    ///   Alias                        0         0
    /// ```
    pub fn render(&self) -> String {
        let rule = "-".repeat(LABEL_WIDTH + 2 * COLUMN_WIDTH);
        let mut out = String::from("\nLogical View:\n");
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "Object", "Found", "Printed"
        );
        let _ = writeln!(out, "  {rule}");
        for (label, counts) in &self.rows {
            let _ = writeln!(
                out,
                "  {:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
                label, counts.found, counts.printed
            );
        }
        let _ = writeln!(out, "  {rule}");
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "Totals",
            self.total_found(),
            self.total_printed()
        );
        out
    }
}

impl ObjectCounter for SummaryTable {
    fn increment_found(&mut self, kind: &'static str) {
        if let Some(counts) = self.rows.get_mut(kind) {
            counts.found += 1;
        }
    }

    fn increment_printed(&mut self, kind: &'static str) {
        if let Some(counts) = self.rows.get_mut(kind) {
            counts.printed += 1;
        }
    }
}
