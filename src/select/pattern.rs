//! Search patterns over entity names.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{Result, ViewError};
use crate::settings::{MatchMode, PatternSettings};
use crate::view::{LogicalView, ScopeFlag};

/// Compiled form of [`PatternSettings`].
#[derive(Debug)]
pub struct PatternMatcher {
    mode: MatchMode,
    ignore_case: bool,
    patterns: Vec<String>,
    regexes: Vec<Regex>,
}

impl PatternMatcher {
    pub fn new(settings: &PatternSettings) -> Result<Self> {
        let regexes = match settings.mode {
            MatchMode::Regex => settings
                .patterns
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(settings.ignore_case)
                        .build()
                        .map_err(|e| ViewError::InvalidPattern {
                            pattern: pattern.clone(),
                            message: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };
        let patterns = settings
            .patterns
            .iter()
            .map(|pattern| {
                if settings.ignore_case {
                    pattern.to_lowercase()
                } else {
                    pattern.clone()
                }
            })
            .collect();
        Ok(Self {
            mode: settings.mode,
            ignore_case: settings.ignore_case,
            patterns,
            regexes,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pattern matches `text`.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if self.mode == MatchMode::Regex {
            return self.regexes.iter().any(|regex| regex.is_match(text));
        }
        let lowered;
        let text = if self.ignore_case {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };
        self.patterns.iter().any(|pattern| match self.mode {
            MatchMode::Exact => text == pattern.as_str(),
            _ => text.contains(pattern.as_str()),
        })
    }
}

impl LogicalView {
    /// Mark every attached entity whose name matches, and propagate
    /// has-pattern from each match toward the root. Returns the number of
    /// matches.
    pub fn match_patterns(&mut self, settings: &PatternSettings) -> Result<usize> {
        let matcher = PatternMatcher::new(settings)?;
        if matcher.is_empty() {
            return Ok(0);
        }

        let mut matches = 0;
        for id in self.descendants(self.root()) {
            let entity = self.entity(id);
            if entity.is_root() || entity.is_line() {
                continue;
            }
            if !matcher.matches(&self.name_of(id)) {
                continue;
            }
            matches += 1;
            let entity = self.entity_mut(id);
            entity.flags.has_pattern_match = true;
            let start = if entity.is_scope() {
                Some(id)
            } else {
                entity.parent()
            };
            if let Some(start) = start {
                self.propagate_flag(start, ScopeFlag::HasPattern);
            }
        }
        debug!(matches, "pattern matching");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{FunctionKind, ScopeKind, SymbolKind};
    use gimli::constants;
    use rstest::rstest;

    fn settings(mode: MatchMode, ignore_case: bool, patterns: &[&str]) -> PatternSettings {
        PatternSettings {
            mode,
            ignore_case,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[rstest]
    #[case(MatchMode::Exact, false, "foo", "foo", true)]
    #[case(MatchMode::Exact, false, "foo", "foobar", false)]
    #[case(MatchMode::Any, false, "oba", "foobar", true)]
    #[case(MatchMode::Any, true, "OBA", "foobar", true)]
    #[case(MatchMode::Regex, false, "^f.*r$", "foobar", true)]
    #[case(MatchMode::Regex, true, "^FOO", "foobar", true)]
    #[case(MatchMode::Regex, false, "^FOO", "foobar", false)]
    fn test_matches(
        #[case] mode: MatchMode,
        #[case] ignore_case: bool,
        #[case] pattern: &str,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        let matcher = PatternMatcher::new(&settings(mode, ignore_case, &[pattern])).unwrap();
        assert_eq!(matcher.matches(text), expected);
    }

    #[test]
    fn test_invalid_regex() {
        let err = PatternMatcher::new(&settings(MatchMode::Regex, false, &["("])).unwrap_err();
        assert!(matches!(err, ViewError::InvalidPattern { .. }));
    }

    #[test]
    fn test_match_patterns_marks_ancestors() {
        let mut view = LogicalView::new("test.o");
        let cu = view.create_scope(ScopeKind::CompileUnit, constants::DW_TAG_compile_unit, 0);
        view.add_object(view.root(), cu).unwrap();
        let func = view.create_scope(
            ScopeKind::Function(FunctionKind::Subprogram),
            constants::DW_TAG_subprogram,
            0,
        );
        view.set_name(func, "main");
        view.add_object(cu, func).unwrap();
        let hit = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 0);
        view.set_name(hit, "counter");
        view.add_object(func, hit).unwrap();
        let miss = view.create_symbol(SymbolKind::Variable, constants::DW_TAG_variable, 0);
        view.set_name(miss, "other");
        view.add_object(func, miss).unwrap();

        let count = view
            .match_patterns(&settings(MatchMode::Any, false, &["count"]))
            .unwrap();

        assert_eq!(count, 1);
        assert!(view.entity(hit).has_pattern());
        assert!(!view.entity(miss).has_pattern());
        assert!(view.entity(func).has_pattern());
        assert!(!view.entity(func).flags.has_pattern_match);
        assert!(view.entity(cu).has_pattern());
    }
}
