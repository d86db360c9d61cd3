//! Media Services client
//!
//! Typed client for the Media Services REST API: assets, access policies,
//! locators and media processors.
//!
//! Layout:
//! - `client`: HTTP transport (headers, OData envelopes, status mapping)
//! - `service`: the [`MediaContract`] operation surface and its implementation
//! - `models` / `options`: wire snapshots and per-call option builders
//!
//! # Example
//!
//! ```no_run
//! use mediakit_client::{CreateAssetOptions, MediaClient, MediaContract, MediaService};
//!
//! # async fn example() -> Result<(), mediakit_client::MediaError> {
//! let client = MediaClient::with_token("https://media.windows.net/API/", "token")?;
//! let service = MediaService::new(client);
//! let asset = service
//!     .create_asset(Some(CreateAssetOptions::new().with_name("trailer")))
//!     .await?;
//! let fetched = service.get_asset(&asset.id).await?;
//! assert_eq!(fetched.name, "trailer");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod odata;
pub mod options;
pub mod service;

pub use client::MediaClient;
pub use config::ClientConfig;
pub use error::MediaError;
pub use models::{
    AccessPolicyInfo, AccessPolicyPermissions, AssetInfo, AssetState, EncryptionOption,
    LocatorInfo, LocatorType, MediaProcessorInfo,
};
pub use odata::{ListMediaProcessorsOptions, ListOptions};
pub use options::{
    CreateAccessPolicyOptions, CreateAssetOptions, CreateLocatorOptions, UpdateAssetOptions,
    UpdateLocatorOptions,
};
pub use service::{MediaContract, MediaService};
