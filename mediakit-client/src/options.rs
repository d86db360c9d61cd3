//! Option builders
//!
//! Each struct is built once and consumed by a single call. Unset fields are
//! left out of the request body, so the service keeps (or defaults) them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AccessPolicyPermissions, AssetState, EncryptionOption, LocatorType};
use crate::odata::wire_date;

/// Optional fields for `create_asset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAssetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<EncryptionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AssetState>,
}

impl CreateAssetOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_alternate_id(mut self, alternate_id: impl Into<String>) -> Self {
        self.alternate_id = Some(alternate_id.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: EncryptionOption) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: AssetState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Partial update for `update_asset`. An empty value changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateAssetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<EncryptionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AssetState>,
}

impl UpdateAssetOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_alternate_id(mut self, alternate_id: impl Into<String>) -> Self {
        self.alternate_id = Some(alternate_id.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: EncryptionOption) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: AssetState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.alternate_id.is_none()
            && self.options.is_none()
            && self.state.is_none()
    }
}

/// Optional fields for `create_access_policy`.
///
/// Starts with no permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateAccessPolicyOptions {
    pub permissions: AccessPolicyPermissions,
}

impl CreateAccessPolicyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_permissions(mut self, permissions: AccessPolicyPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    #[must_use]
    pub fn add_permissions(mut self, permissions: AccessPolicyPermissions) -> Self {
        self.permissions.add(permissions);
        self
    }

    #[must_use]
    pub fn remove_permissions(mut self, permissions: AccessPolicyPermissions) -> Self {
        self.permissions.remove(permissions);
        self
    }
}

/// Optional fields for `create_locator`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateLocatorOptions {
    pub start_time: Option<DateTime<Utc>>,
    pub expiration_date_time: Option<DateTime<Utc>>,
}

impl CreateLocatorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub const fn with_expiration_date_time(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration_date_time = Some(expiration);
        self
    }
}

/// Partial update for `update_locator`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLocatorOptions {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub expiration_date_time: Option<DateTime<Utc>>,
}

impl UpdateLocatorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub const fn with_expiration_date_time(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration_date_time = Some(expiration);
        self
    }
}

/// Request body for `POST /AccessPolicies`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AccessPolicyRequest<'a> {
    pub name: &'a str,
    pub duration_in_minutes: f64,
    pub permissions: AccessPolicyPermissions,
}

/// Request body for `POST /Locators`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LocatorRequest<'a> {
    pub access_policy_id: &'a str,
    pub asset_id: &'a str,
    #[serde(rename = "Type")]
    pub locator_type: LocatorType,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub expiration_date_time: Option<DateTime<Utc>>,
}
