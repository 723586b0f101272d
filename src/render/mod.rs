//! Rendering: text rows, YAML documents and the sinks they are written to.
//!
//! [`entity_text`] and [`entity_yaml`] render a single entity. A
//! [`Printer`] drives a whole render pass, applying print eligibility, the
//! object filter, split output and the printed counters.

mod layout;
mod printer;
mod sink;
mod text;
mod yaml;

pub use layout::{Layout, format_line, format_offset, indent};
pub use printer::Printer;
pub use sink::{MemorySink, OutputSink, ScopedSink, WriterSink};
pub use text::entity_text;
pub use yaml::entity_yaml;
