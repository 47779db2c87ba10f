//! Decoding values files into documents.

use serde_json::{Map, Value};
use serde_saphyr::Options;

use crate::{ValuesError, ValuesResult};

/// Decode the contents of a values file.
///
/// Contents are parsed as YAML, which also accepts JSON. Plain scalars resolve
/// booleans the YAML 1.1 way, so unquoted `yes`, `on`, `no` and `off` are
/// booleans; quote them to keep the text. Empty or `null` documents yield an
/// empty document.
///
/// # Examples
///
/// ```rust
/// use chart_values::parse_document;
///
/// let values = parse_document("values.yaml", b"image:\n  tag: '1.4'\n")?;
/// assert_eq!(values["image"]["tag"], "1.4");
/// # Ok::<_, chart_values::ValuesError>(())
/// ```
///
/// # Errors
///
/// Returns [`ValuesError::Parse`] naming `origin` when the contents are not
/// UTF-8, are not valid YAML, or do not describe a mapping at the top level.
pub fn parse_document(origin: &str, bytes: &[u8]) -> ValuesResult<Map<String, Value>> {
    let text = std::str::from_utf8(bytes).map_err(|err| ValuesError::parse(origin, err))?;
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_saphyr::from_str_with_options(
        text,
        Options {
            strict_booleans: false,
            ..Options::default()
        },
    )
    .map_err(|err| ValuesError::parse(origin, err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ValuesError::parse(
            origin,
            format!(
                "expected a mapping at the top level, found {}",
                crate::ValueShape::of(&other)
            ),
        )),
    }
}
