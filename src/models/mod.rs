//! Typed records for the three portfolio data documents.
//!
//! Every field is optional: an absent field leaves its page element
//! untouched. Documents that do not fit these shapes fail to load.

mod about;
mod project;
mod skill;

pub use about::{About, FALLBACK_INITIAL};
pub use project::Project;
pub use skill::Skill;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON string or number as text. `null` reads as absent.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a string or a number",
        )),
    }
}

/// Accept a list of tag strings. Anything that is not an array reads as
/// absent, so a malformed tag list renders no tags instead of failing the
/// whole document.
pub(crate) fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a tag string")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}
