//! OData verbose JSON plumbing
//!
//! Envelopes, entity key encoding, timestamp codec and query options shared
//! by every entity set.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer};

/// Entity set names on the REST endpoint.
pub const ASSETS: &str = "Assets";
pub const ACCESS_POLICIES: &str = "AccessPolicies";
pub const LOCATORS: &str = "Locators";
pub const MEDIA_PROCESSORS: &str = "MediaProcessors";

/// Characters left as-is inside a quoted entity key.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Single entity response: `{"d": {...}}`
#[derive(Debug, Deserialize)]
pub struct EntityEnvelope<T> {
    pub d: T,
}

/// Collection response: `{"d": {"results": [...]}}`
#[derive(Debug, Deserialize)]
pub struct CollectionEnvelope<T> {
    pub d: CollectionResults<T>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionResults<T> {
    pub results: Vec<T>,
}

/// Build the path of a single entity, e.g. `Assets('nb%3Acid%3A...')`.
///
/// Single quotes in the id are doubled before percent-encoding, as the
/// OData key syntax requires.
#[must_use]
pub fn entity_path(entity_set: &str, id: &str) -> String {
    let escaped = id.replace('\'', "''");
    format!("{entity_set}('{}')", utf8_percent_encode(&escaped, KEY_ENCODE_SET))
}

/// Deserialize a string field the service may send as `null`.
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// OData query options for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filter: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub order_by: Option<String>,
}

/// Media processors take the generic query options.
pub type ListMediaProcessorsOptions = ListOptions;

impl ListOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an OData `$filter` expression, e.g. `Name eq 'movie'`
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Query string pairs, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref filter) = self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(ref order_by) = self.order_by {
            pairs.push(("$orderby", order_by.clone()));
        }
        pairs
    }
}

/// Timestamp codec.
///
/// Reads both the legacy `/Date(<millis>)/` form and ISO 8601 (with or
/// without an offset; a missing offset means UTC). Writes RFC 3339 with
/// millisecond precision.
pub mod wire_date {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse a single wire timestamp.
    #[must_use]
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();

        if let Some(inner) = value
            .strip_prefix("/Date(")
            .and_then(|rest| rest.strip_suffix(")/"))
        {
            // Offset suffix (e.g. "+0000") does not shift the instant.
            let end = inner
                .char_indices()
                .skip(1)
                .find(|(_, c)| *c == '+' || *c == '-')
                .map_or(inner.len(), |(i, _)| i);
            let millis: i64 = inner[..end].parse().ok()?;
            return DateTime::from_timestamp_millis(millis);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// serde adapter for `Option<DateTime<Utc>>`, used with `#[serde(with = ...)]`.
    pub mod option {
        use super::{format, parse, DateTime, Deserialize, Deserializer, Serializer, Utc};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_str(&format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.is_empty() => Ok(None),
                Some(raw) => parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}
