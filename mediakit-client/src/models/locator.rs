use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::odata::{string_or_null, wire_date};

/// Kind of access path a locator grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LocatorType {
    #[default]
    None,
    /// Shared access signature URL into blob storage
    Sas,
    /// On-demand streaming origin URL
    Origin,
}

impl LocatorType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sas => "sas",
            Self::Origin => "origin",
        }
    }
}

impl TryFrom<i32> for LocatorType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Sas),
            2 => Ok(Self::Origin),
            other => Err(format!("unknown locator type code: {other}")),
        }
    }
}

impl From<LocatorType> for i32 {
    fn from(locator_type: LocatorType) -> Self {
        match locator_type {
            LocatorType::None => 0,
            LocatorType::Sas => 1,
            LocatorType::Origin => 2,
        }
    }
}

impl FromStr for LocatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "sas" => Ok(Self::Sas),
            "origin" => Ok(Self::Origin),
            _ => Err(format!("Invalid locator type: {s}")),
        }
    }
}

impl Display for LocatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a locator as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocatorInfo {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub access_policy_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub asset_id: String,
    #[serde(rename = "Type", default)]
    pub locator_type: LocatorType,
    /// Computed by the service
    #[serde(default, deserialize_with = "string_or_null")]
    pub path: String,
    #[serde(default, with = "wire_date::option")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "wire_date::option")]
    pub expiration_date_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_deserialize() {
        let json = r#"{
            "Id": "nb:lid:UUID:1",
            "AccessPolicyId": "nb:pid:UUID:1",
            "AssetId": "nb:cid:UUID:1",
            "Type": 1,
            "Path": "https://storage.example.com/asset-1?sv=2012-02-12&sig=abc",
            "StartTime": "2012-05-07T05:34:01.597Z",
            "ExpirationDateTime": null
        }"#;
        let locator: LocatorInfo = serde_json::from_str(json).unwrap();
        assert_eq!(locator.locator_type, LocatorType::Sas);
        assert_eq!(locator.access_policy_id, "nb:pid:UUID:1");
        assert_eq!(locator.asset_id, "nb:cid:UUID:1");
        assert_eq!(locator.start_time.unwrap().timestamp_millis(), 1_336_368_841_597);
        assert!(locator.expiration_date_time.is_none());
    }

    #[test]
    fn test_locator_type_round_trip_code() {
        for locator_type in [LocatorType::None, LocatorType::Sas, LocatorType::Origin] {
            assert_eq!(LocatorType::try_from(i32::from(locator_type)), Ok(locator_type));
            assert_eq!(locator_type.as_str().parse(), Ok(locator_type));
        }
        assert!(LocatorType::try_from(3).is_err());
    }

    #[test]
    fn test_locator_serializes_type_field() {
        let locator = LocatorInfo {
            id: "nb:lid:UUID:1".to_string(),
            access_policy_id: String::new(),
            asset_id: String::new(),
            locator_type: LocatorType::Origin,
            path: String::new(),
            start_time: None,
            expiration_date_time: None,
        };
        let value = serde_json::to_value(&locator).unwrap();
        assert_eq!(value["Type"], 2);
        assert!(value["StartTime"].is_null());
    }
}
