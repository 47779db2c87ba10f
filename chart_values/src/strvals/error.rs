//! Failures reported by the assignment grammar.

use std::fmt;
use std::num::ParseIntError;

use serde_json::Value;
use thiserror::Error;

use super::{MAX_INDEX, MAX_NESTED_NAME_LEVEL};

/// Coarse shape of a value, used to describe assignment conflicts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueShape {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An ordered sequence.
    Sequence,
    /// A nested document.
    Document,
}

impl ValueShape {
    /// Classify `value`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Document,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "a boolean",
            Self::Number => "a number",
            Self::String => "a string",
            Self::Sequence => "a sequence",
            Self::Document => "a document",
        })
    }
}

/// Errors produced while parsing assignment expressions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssignmentError {
    /// Input ended before `=` was reached.
    #[error("key \"{key}\" has no value")]
    NoValue {
        /// The dangling key.
        key: String,
    },

    /// A key was followed directly by a comma.
    #[error("key \"{key}\" has no value (cannot end with ,)")]
    TrailingComma {
        /// The dangling key.
        key: String,
    },

    /// A dotted key led nowhere.
    #[error("key map \"{key}\" has no value")]
    EmptyKeyMap {
        /// The key that was descended into.
        key: String,
    },

    /// Too many dotted segments and indices in one path.
    #[error(
        "value name nested level is greater than maximum supported nested level of {max}",
        max = MAX_NESTED_NAME_LEVEL
    )]
    TooDeep,

    /// `[` without a matching `]`.
    #[error("error parsing index: missing closing ']'")]
    UnclosedIndex,

    /// The text between brackets is not an integer.
    #[error("error parsing index: invalid index \"{raw}\"")]
    InvalidIndex {
        /// Text found between the brackets.
        raw: String,
        /// Integer parsing failure.
        #[source]
        source: ParseIntError,
    },

    /// Indices must not be negative.
    #[error("negative {index} index not allowed")]
    NegativeIndex {
        /// The rejected index.
        index: i64,
    },

    /// Indices are capped to keep sequences bounded.
    #[error(
        "index of {index} is greater than maximum supported index of {max}",
        max = MAX_INDEX
    )]
    IndexTooLarge {
        /// The rejected index.
        index: i64,
    },

    /// Input ended straight after an index.
    #[error("error parsing index: expected '=', '[' or '.' after ']'")]
    MissingIndexValue,

    /// Literal assignments reject text between `]` and the next token.
    #[error("unexpected data at end of array index: \"{data}\"")]
    UnexpectedIndexData {
        /// The stray text.
        data: String,
    },

    /// A character the grammar has no rule for.
    #[error("parse error: unexpected token {token:?}")]
    UnexpectedToken {
        /// The offending character.
        token: char,
    },

    /// A `{` list was not closed.
    #[error("list must terminate with '}}'")]
    UnterminatedList,

    /// A `--set-json` value is not valid JSON.
    #[error("invalid JSON value: {source}")]
    Json {
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// A `--set-json` assignment ended without a decodable value.
    #[error("expected a JSON value")]
    MissingJsonValue,

    /// The path runs through an existing value of the wrong shape.
    #[error("cannot assign through '{key}': expected {expected}, found {found}")]
    Conflict {
        /// Key or index whose value has the wrong shape.
        key: String,
        /// Shape the path requires.
        expected: ValueShape,
        /// Shape already stored there.
        found: ValueShape,
    },

    /// A `--set-file` target is not UTF-8 text.
    #[error("'{path}' is not valid UTF-8: {source}")]
    InvalidText {
        /// Path named on the right-hand side.
        path: String,
        /// Decoding failure.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A `--set-file` target could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path named on the right-hand side.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl AssignmentError {
    pub(super) fn conflict(key: impl Into<String>, expected: ValueShape, found: &Value) -> Self {
        Self::Conflict {
            key: key.into(),
            expected,
            found: ValueShape::of(found),
        }
    }
}
