//! Media Services contract
//!
//! [`MediaContract`] is the operation surface callers program against;
//! [`MediaService`] implements it over [`MediaClient`].

use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::MediaClient;
use crate::config::ClientConfig;
use crate::error::MediaError;
use crate::models::{AccessPolicyInfo, AssetInfo, LocatorInfo, LocatorType, MediaProcessorInfo};
use crate::odata::{
    ListMediaProcessorsOptions, ListOptions, ACCESS_POLICIES, ASSETS, LOCATORS, MEDIA_PROCESSORS,
};
use crate::options::{
    AccessPolicyRequest, CreateAccessPolicyOptions, CreateAssetOptions, CreateLocatorOptions,
    LocatorRequest, UpdateAssetOptions, UpdateLocatorOptions,
};

/// Unified Media Services interface
///
/// Every failure reported by the service arrives as [`MediaError::Service`];
/// callers inspect [`MediaError::status`] to tell not-found from bad input.
#[async_trait]
pub trait MediaContract: Send + Sync {
    /// Create an asset. `None` lets the service pick every default.
    async fn create_asset(&self, options: Option<CreateAssetOptions>) -> Result<AssetInfo, MediaError>;

    async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, MediaError>;

    async fn list_assets(&self, options: Option<ListOptions>) -> Result<Vec<AssetInfo>, MediaError>;

    /// Partial update; re-fetch with [`MediaContract::get_asset`] to observe it.
    async fn update_asset(&self, asset_id: &str, options: UpdateAssetOptions) -> Result<(), MediaError>;

    async fn delete_asset(&self, asset_id: &str) -> Result<(), MediaError>;

    async fn create_access_policy(
        &self,
        name: &str,
        duration_in_minutes: f64,
        options: Option<CreateAccessPolicyOptions>,
    ) -> Result<AccessPolicyInfo, MediaError>;

    async fn get_access_policy(&self, access_policy_id: &str) -> Result<AccessPolicyInfo, MediaError>;

    async fn list_access_policies(
        &self,
        options: Option<ListOptions>,
    ) -> Result<Vec<AccessPolicyInfo>, MediaError>;

    async fn delete_access_policy(&self, access_policy_id: &str) -> Result<(), MediaError>;

    /// Bind an access policy to an asset.
    async fn create_locator(
        &self,
        access_policy_id: &str,
        asset_id: &str,
        locator_type: LocatorType,
        options: Option<CreateLocatorOptions>,
    ) -> Result<LocatorInfo, MediaError>;

    async fn get_locator(&self, locator_id: &str) -> Result<LocatorInfo, MediaError>;

    async fn list_locators(&self, options: Option<ListOptions>) -> Result<Vec<LocatorInfo>, MediaError>;

    async fn update_locator(&self, locator_id: &str, options: UpdateLocatorOptions) -> Result<(), MediaError>;

    async fn delete_locator(&self, locator_id: &str) -> Result<(), MediaError>;

    async fn list_media_processors(
        &self,
        options: Option<ListMediaProcessorsOptions>,
    ) -> Result<Vec<MediaProcessorInfo>, MediaError>;
}

/// Media Services implementation
///
/// Makes the actual HTTP calls. Holds no state besides the client, so every
/// call observes the service as it is right now.
#[derive(Debug, Clone)]
pub struct MediaService {
    client: MediaClient,
}

impl MediaService {
    #[must_use]
    pub const fn new(client: MediaClient) -> Self {
        Self { client }
    }

    /// Build a service with its own connection pool from configuration
    pub fn create(config: &ClientConfig) -> Result<Self, MediaError> {
        Ok(Self::new(MediaClient::from_config(config)?))
    }

    #[must_use]
    pub const fn client(&self) -> &MediaClient {
        &self.client
    }
}

impl From<MediaClient> for MediaService {
    fn from(client: MediaClient) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl MediaContract for MediaService {
    async fn create_asset(&self, options: Option<CreateAssetOptions>) -> Result<AssetInfo, MediaError> {
        let options = options.unwrap_or_default();
        let asset: AssetInfo = self.client.create_entity(ASSETS, &options).await?;
        info!(asset_id = %asset.id, "Created asset");
        Ok(asset)
    }

    async fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, MediaError> {
        self.client.get_entity(ASSETS, asset_id).await
    }

    async fn list_assets(&self, options: Option<ListOptions>) -> Result<Vec<AssetInfo>, MediaError> {
        self.client.list_entities(ASSETS, options.as_ref()).await
    }

    async fn update_asset(&self, asset_id: &str, options: UpdateAssetOptions) -> Result<(), MediaError> {
        if options.is_empty() {
            debug!(asset_id, "Sending empty asset update");
        }
        self.client.merge_entity(ASSETS, asset_id, &options).await
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<(), MediaError> {
        self.client.delete_entity(ASSETS, asset_id).await?;
        info!(asset_id, "Deleted asset");
        Ok(())
    }

    async fn create_access_policy(
        &self,
        name: &str,
        duration_in_minutes: f64,
        options: Option<CreateAccessPolicyOptions>,
    ) -> Result<AccessPolicyInfo, MediaError> {
        let options = options.unwrap_or_default();
        let body = AccessPolicyRequest {
            name,
            duration_in_minutes,
            permissions: options.permissions,
        };
        let policy: AccessPolicyInfo = self.client.create_entity(ACCESS_POLICIES, &body).await?;
        info!(access_policy_id = %policy.id, "Created access policy");
        Ok(policy)
    }

    async fn get_access_policy(&self, access_policy_id: &str) -> Result<AccessPolicyInfo, MediaError> {
        self.client.get_entity(ACCESS_POLICIES, access_policy_id).await
    }

    async fn list_access_policies(
        &self,
        options: Option<ListOptions>,
    ) -> Result<Vec<AccessPolicyInfo>, MediaError> {
        self.client.list_entities(ACCESS_POLICIES, options.as_ref()).await
    }

    async fn delete_access_policy(&self, access_policy_id: &str) -> Result<(), MediaError> {
        self.client.delete_entity(ACCESS_POLICIES, access_policy_id).await?;
        info!(access_policy_id, "Deleted access policy");
        Ok(())
    }

    async fn create_locator(
        &self,
        access_policy_id: &str,
        asset_id: &str,
        locator_type: LocatorType,
        options: Option<CreateLocatorOptions>,
    ) -> Result<LocatorInfo, MediaError> {
        let options = options.unwrap_or_default();
        let body = LocatorRequest {
            access_policy_id,
            asset_id,
            locator_type,
            start_time: options.start_time,
            expiration_date_time: options.expiration_date_time,
        };
        let locator: LocatorInfo = self.client.create_entity(LOCATORS, &body).await?;
        info!(locator_id = %locator.id, asset_id, access_policy_id, "Created locator");
        Ok(locator)
    }

    async fn get_locator(&self, locator_id: &str) -> Result<LocatorInfo, MediaError> {
        self.client.get_entity(LOCATORS, locator_id).await
    }

    async fn list_locators(&self, options: Option<ListOptions>) -> Result<Vec<LocatorInfo>, MediaError> {
        self.client.list_entities(LOCATORS, options.as_ref()).await
    }

    async fn update_locator(&self, locator_id: &str, options: UpdateLocatorOptions) -> Result<(), MediaError> {
        self.client.merge_entity(LOCATORS, locator_id, &options).await
    }

    async fn delete_locator(&self, locator_id: &str) -> Result<(), MediaError> {
        self.client.delete_entity(LOCATORS, locator_id).await?;
        info!(locator_id, "Deleted locator");
        Ok(())
    }

    async fn list_media_processors(
        &self,
        options: Option<ListMediaProcessorsOptions>,
    ) -> Result<Vec<MediaProcessorInfo>, MediaError> {
        self.client.list_entities(MEDIA_PROCESSORS, options.as_ref()).await
    }
}
