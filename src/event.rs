//! Inbound event record and the acknowledgment returned for it.
//!
//! An [`Event`] lives for exactly one request: decoded from the body, logged,
//! then dropped. Nothing here is stored or shared.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Identifies this service in every [`ProcessResult`].
pub const SERVICE_NAME: &str = "gcp-go-orchestrator";

/// A file-arrival notification.
///
/// No field is required. A missing key or an explicit `null` both decode to
/// the empty string; unknown keys are ignored. Keys match field names
/// ignoring ASCII case, see [`Event::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Event {
    /// Origin system, opaque to this service.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,
    /// Payload shape tag. Not checked against any known set.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schema_version: String,
}

impl Event {
    const FIELDS: [&'static str; 3] = ["source", "filename", "schema_version"];

    /// Decode the first JSON value in `body` as an event.
    ///
    /// Bytes after a complete value are ignored. A top-level `null` yields an
    /// empty event. Any other non-object value is rejected, even an array that
    /// serde could read positionally into the struct.
    ///
    /// Each key is matched to a field exactly if possible, otherwise ignoring
    /// ASCII case. When several keys land on the same field the last one in
    /// the document wins.
    pub fn decode(body: &[u8]) -> Result<Self, AppError> {
        let entries = serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<Entries>>()
            .next()
            .ok_or(AppError::EmptyBody)??;

        let Some(Entries(entries)) = entries else {
            return Ok(Self::default());
        };

        let mut fields = Map::new();
        for (key, value) in entries {
            let field = Self::FIELDS
                .iter()
                .find(|f| **f == key)
                .or_else(|| Self::FIELDS.iter().find(|f| f.eq_ignore_ascii_case(&key)));
            if let Some(field) = field {
                fields.insert((*field).to_string(), value);
            }
        }

        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Key/value pairs of a JSON object in document order, duplicates kept.
struct Entries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Entries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgment body for a successfully decoded [`Event`].
///
/// Serialises as `{"status": ..., "service": ..., "env": ...}` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub status: String,
    pub service: String,
    pub env: String,
}

impl ProcessResult {
    /// The only outcome there is: processed, stamped with the current `env`.
    pub fn processed(env: impl Into<String>) -> Self {
        Self {
            status: "processed".into(),
            service: SERVICE_NAME.into(),
            env: env.into(),
        }
    }
}
