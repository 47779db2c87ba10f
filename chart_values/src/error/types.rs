//! Primary error enum for value merging flows.

use std::fmt;

use thiserror::Error;

use crate::strvals::{AssignmentError, ValueShape};

/// The assignment syntax an expression was supplied through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpressionKind {
    /// `--set-json`: values are JSON documents.
    Json,
    /// `--set`: values have their type inferred.
    Typed,
    /// `--set-string`: values are always strings.
    Text,
    /// `--set-file`: values are the contents of the named file.
    File,
    /// `--set-literal`: the right-hand side is taken verbatim.
    Literal,
}

impl ExpressionKind {
    /// Command-line flag that carries expressions of this kind.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Json => "--set-json",
            Self::Typed => "--set",
            Self::Text => "--set-string",
            Self::File => "--set-file",
            Self::Literal => "--set-literal",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Errors that can occur while merging values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValuesError {
    /// A values file, or standard input, could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path exactly as supplied; `-` for standard input.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A values file was read but is not a valid values document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path exactly as supplied; `-` for standard input.
        path: String,
        /// Underlying decoder failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An assignment expression could not be applied.
    #[error("failed parsing {kind} data '{expression}': {source}")]
    Expression {
        /// Syntax the expression was supplied through.
        kind: ExpressionKind,
        /// Raw expression text.
        expression: String,
        /// Grammar or read failure reported by the parser.
        #[source]
        source: AssignmentError,
    },

    /// An assignment path runs through a value of the wrong shape.
    #[error(
        "failed parsing {kind} data '{expression}': cannot assign through '{key}': \
         expected {expected}, found {found}"
    )]
    AssignmentConflict {
        /// Syntax the expression was supplied through.
        kind: ExpressionKind,
        /// Raw expression text.
        expression: String,
        /// Key whose existing value has the wrong shape.
        key: String,
        /// Shape the assignment path requires.
        expected: ValueShape,
        /// Shape already present in the document.
        found: ValueShape,
    },

    /// The merged document does not fit the requested type.
    #[error("failed to deserialise merged values: {0}")]
    Deserialize(#[from] serde_json::Error),
}
