//! Error types for building, resolving and rendering a logical view.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::base::EntityId;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewError>;

/// Stable error codes, one per [`ViewError`] variant.
pub mod codes {
    /// A line record was attached to a scope that cannot hold lines.
    pub const LINE_NOT_ALLOWED: &str = "ERR_LINE_NOT_ALLOWED";
    /// A child was attached under an entity that is not a scope.
    pub const NOT_A_SCOPE: &str = "ERR_NOT_A_SCOPE";
    /// An entity was attached to a second parent.
    pub const ALREADY_ATTACHED: &str = "ERR_ALREADY_ATTACHED";
    /// The output file for a split compile unit could not be opened.
    pub const SPLIT_UNABLE_TO_OPEN_FILE: &str = "ERR_SPLIT_UNABLE_TO_OPEN_FILE";
    /// Writing to an output sink failed.
    pub const OUTPUT: &str = "ERR_OUTPUT";
    /// A fixed-width field could not hold its value.
    pub const MALFORMED_FIELD: &str = "ERR_MALFORMED_FIELD";
    /// A specification/abstract-origin chain refers back to itself.
    pub const REFERENCE_CYCLE: &str = "ERR_REFERENCE_CYCLE";
    /// A search pattern is not a valid regular expression.
    pub const INVALID_PATTERN: &str = "ERR_INVALID_PATTERN";
    /// Settings could not be loaded.
    pub const CONFIG: &str = "ERR_CONFIG";
}

/// Errors produced by the logical view.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Line records may only live in compile units and functions.
    ///
    /// Reported before anything is changed, so the tree stays as it was.
    #[error("cannot attach a line record to {kind} scope {scope}")]
    LineNotAllowed { scope: EntityId, kind: &'static str },

    /// Children can only be attached to scopes.
    #[error("{id} is not a scope and cannot own children")]
    NotAScope { id: EntityId },

    /// Every entity has exactly one owner; the root has none.
    #[error("{id} already has an owner")]
    AlreadyAttached { id: EntityId },

    /// Opening the per-compile-unit output file failed.
    ///
    /// This aborts the whole render pass.
    #[error("Unable to open file '{}' for Logical View Split.", path.display())]
    SplitOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to an output sink failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// A numeric field does not fit its fixed column width.
    #[error("malformed {field} field: {value:#x}")]
    MalformedField { field: &'static str, value: u64 },

    /// Following the reference chain of an entity came back to an entity
    /// already visited.
    #[error("reference cycle while resolving the name of {id}")]
    ReferenceCycle { id: EntityId },

    /// A regular-expression pattern failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Settings could not be parsed.
    #[error("invalid settings: {0}")]
    Config(String),
}

impl ViewError {
    /// The stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ViewError::LineNotAllowed { .. } => codes::LINE_NOT_ALLOWED,
            ViewError::NotAScope { .. } => codes::NOT_A_SCOPE,
            ViewError::AlreadyAttached { .. } => codes::ALREADY_ATTACHED,
            ViewError::SplitOpen { .. } => codes::SPLIT_UNABLE_TO_OPEN_FILE,
            ViewError::Io(_) => codes::OUTPUT,
            ViewError::MalformedField { .. } => codes::MALFORMED_FIELD,
            ViewError::ReferenceCycle { .. } => codes::REFERENCE_CYCLE,
            ViewError::InvalidPattern { .. } => codes::INVALID_PATTERN,
            ViewError::Config(_) => codes::CONFIG,
        }
    }
}
