//! Parser for the `--set` family of assignment expressions.
//!
//! An expression is a comma-separated list of `path=value` assignments. A path
//! is a sequence of `.`-separated keys, each optionally followed by one or
//! more `[index]` suffixes:
//!
//! ```text
//! image.tag=1.4.2,replicas=3
//! servers[0].port=8080
//! annotations.example\.com/role=edge
//! tolerations={a,b,c}
//! ```
//!
//! Backslash escapes any character, so keys may contain `.`, `=`, `,`, `[` or
//! `]`. Literal expressions (`--set-literal`) take everything after the first
//! `=` verbatim and honour neither escapes nor commas.
//!
//! Assignments write into an existing document in place. Intermediate
//! documents and sequences are created on demand; walking through a value of
//! the wrong shape fails with [`AssignmentError::Conflict`].
//!
//! # Examples
//!
//! ```rust
//! use chart_values::strvals;
//! use serde_json::json;
//!
//! let values = strvals::parse("name=web,ports[1]=443,debug=true")?;
//! assert_eq!(
//!     serde_json::Value::Object(values),
//!     json!({"name": "web", "ports": [null, 443], "debug": true}),
//! );
//! # Ok::<_, chart_values::AssignmentError>(())
//! ```

mod error;
mod parser;
mod scanner;

use serde_json::{Map, Value};

pub use error::{AssignmentError, ValueShape};
use parser::{Parser, ValueMode};

/// Deepest chain of dotted keys and `[index]` suffixes accepted in one
/// assignment.
pub const MAX_NESTED_NAME_LEVEL: usize = 30;

/// Largest sequence index accepted in one assignment.
pub const MAX_INDEX: usize = 65_536;

/// Parse `expression` into a fresh document, inferring value types.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed.
pub fn parse(expression: &str) -> Result<Map<String, Value>, AssignmentError> {
    let mut values = Map::new();
    parse_into(expression, &mut values)?;
    Ok(values)
}

/// Parse `expression` into a fresh document, keeping every value a string.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed.
pub fn parse_string(expression: &str) -> Result<Map<String, Value>, AssignmentError> {
    let mut values = Map::new();
    parse_into_string(expression, &mut values)?;
    Ok(values)
}

/// Parse a literal assignment into a fresh document.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the path is malformed.
pub fn parse_literal(expression: &str) -> Result<Map<String, Value>, AssignmentError> {
    let mut values = Map::new();
    parse_literal_into(expression, &mut values)?;
    Ok(values)
}

/// Parse `expression` into a fresh document, resolving each value through
/// `reader`.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed or the
/// reader fails.
pub fn parse_file<F>(expression: &str, reader: F) -> Result<Map<String, Value>, AssignmentError>
where
    F: FnMut(&str) -> Result<Value, AssignmentError>,
{
    let mut values = Map::new();
    parse_into_file(expression, &mut values, reader)?;
    Ok(values)
}

/// Apply `expression` to `dest`, inferring value types.
///
/// `true`, `false` and `null` are matched case-insensitively. Decimal
/// integers become numbers unless they have a leading zero; everything else,
/// including floating-point text such as `1.5`, stays a string.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed.
pub fn parse_into(expression: &str, dest: &mut Map<String, Value>) -> Result<(), AssignmentError> {
    Parser::new(expression, ValueMode::Typed).parse(dest)
}

/// Apply `expression` to `dest`, keeping every value a string.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed.
pub fn parse_into_string(
    expression: &str,
    dest: &mut Map<String, Value>,
) -> Result<(), AssignmentError> {
    Parser::new(expression, ValueMode::Text).parse(dest)
}

/// Apply `expression` to `dest`, decoding each value as JSON.
///
/// An empty right-hand side assigns `null`.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the path is malformed or a value is not
/// valid JSON.
pub fn parse_json(expression: &str, dest: &mut Map<String, Value>) -> Result<(), AssignmentError> {
    Parser::new(expression, ValueMode::Json).parse(dest)
}

/// Apply `expression` to `dest`, replacing each right-hand side with the value
/// `reader` returns for it.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the expression is malformed or the
/// reader fails.
pub fn parse_into_file<F>(
    expression: &str,
    dest: &mut Map<String, Value>,
    mut reader: F,
) -> Result<(), AssignmentError>
where
    F: FnMut(&str) -> Result<Value, AssignmentError>,
{
    Parser::new(expression, ValueMode::File(&mut reader)).parse(dest)
}

/// Apply a literal assignment to `dest`.
///
/// Everything after the first `=` becomes a single string value.
///
/// # Errors
///
/// Returns an [`AssignmentError`] when the path is malformed.
pub fn parse_literal_into(
    expression: &str,
    dest: &mut Map<String, Value>,
) -> Result<(), AssignmentError> {
    Parser::new(expression, ValueMode::Literal).parse(dest)
}

/// Infer the type of an unquoted `--set` value.
fn typed_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if raw == "0" {
        return Value::from(0_i64);
    }
    if !raw.is_empty()
        && !raw.starts_with('0')
        && let Ok(number) = raw.parse::<i64>()
    {
        return Value::from(number);
    }
    Value::String(raw.to_owned())
}

#[cfg(test)]
mod tests;
