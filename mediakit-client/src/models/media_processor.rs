use serde::{Deserialize, Serialize};

use crate::odata::string_or_null;

/// A processing capability offered by the service. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaProcessorInfo {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub sku: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub vendor: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub version: String,
}
