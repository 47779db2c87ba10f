//! Error types produced while merging values.

mod constructors;
mod types;

pub use types::{ExpressionKind, ValuesError};
