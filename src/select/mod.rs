//! Selection: sorting, pattern matching and print eligibility.

mod eligibility;
mod pattern;
mod sort;

pub use eligibility::is_print_eligible;
pub use pattern::PatternMatcher;
pub use sort::{Comparator, comparator};
