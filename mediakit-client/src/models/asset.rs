use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::odata::{string_or_null, wire_date};

/// Storage encryption applied to an asset's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum EncryptionOption {
    #[default]
    None,
    StorageEncrypted,
    CommonEncryptionProtected,
}

impl EncryptionOption {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StorageEncrypted => "storage_encrypted",
            Self::CommonEncryptionProtected => "common_encryption_protected",
        }
    }
}

impl TryFrom<i32> for EncryptionOption {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::StorageEncrypted),
            2 => Ok(Self::CommonEncryptionProtected),
            other => Err(format!("unknown encryption option code: {other}")),
        }
    }
}

impl From<EncryptionOption> for i32 {
    fn from(option: EncryptionOption) -> Self {
        match option {
            EncryptionOption::None => 0,
            EncryptionOption::StorageEncrypted => 1,
            EncryptionOption::CommonEncryptionProtected => 2,
        }
    }
}

impl FromStr for EncryptionOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::None),
            "storage_encrypted" => Ok(Self::StorageEncrypted),
            "common_encryption_protected" => Ok(Self::CommonEncryptionProtected),
            _ => Err(format!("Invalid encryption option: {s}")),
        }
    }
}

impl Display for EncryptionOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AssetState {
    #[default]
    Initialized,
    Published,
    Deleted,
}

impl AssetState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Published => "published",
            Self::Deleted => "deleted",
        }
    }
}

impl TryFrom<i32> for AssetState {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Initialized),
            1 => Ok(Self::Published),
            2 => Ok(Self::Deleted),
            other => Err(format!("unknown asset state code: {other}")),
        }
    }
}

impl From<AssetState> for i32 {
    fn from(state: AssetState) -> Self {
        match state {
            AssetState::Initialized => 0,
            AssetState::Published => 1,
            AssetState::Deleted => 2,
        }
    }
}

impl FromStr for AssetState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initialized" => Ok(Self::Initialized),
            "published" => Ok(Self::Published),
            "deleted" => Ok(Self::Deleted),
            _ => Err(format!("Invalid asset state: {s}")),
        }
    }
}

impl Display for AssetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an asset as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetInfo {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub alternate_id: String,
    #[serde(default)]
    pub options: EncryptionOption,
    #[serde(default)]
    pub state: AssetState,
    #[serde(default, with = "wire_date::option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "wire_date::option")]
    pub last_modified: Option<DateTime<Utc>>,
}
