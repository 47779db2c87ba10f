//! Typed access to merged values.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Values, ValuesResult};

/// Deserialise a merged document into `T`.
///
/// # Examples
///
/// ```rust
/// use chart_values::{from_values, strvals};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Image {
///     repository: String,
///     tag: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Chart {
///     image: Image,
///     replicas: u16,
/// }
///
/// let values = strvals::parse("image.repository=nginx,image.tag=1.25,replicas=2")?;
/// let chart: Chart = from_values(values).expect("values fit the chart");
/// assert_eq!(chart.image.tag, "1.25");
/// assert_eq!(chart.replicas, 2);
/// # Ok::<_, chart_values::AssignmentError>(())
/// ```
///
/// # Errors
///
/// Returns [`crate::ValuesError::Deserialize`] when the document does not fit
/// `T`.
pub fn from_values<T: DeserializeOwned>(values: Values) -> ValuesResult<T> {
    Ok(serde_json::from_value(Value::Object(values))?)
}
