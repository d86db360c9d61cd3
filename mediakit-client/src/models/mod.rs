//! Resource models
//!
//! Immutable snapshots of service entities, decoded from the OData wire shape.

mod access_policy;
mod asset;
mod locator;
mod media_processor;

pub use access_policy::{AccessPolicyInfo, AccessPolicyPermissions};
pub use asset::{AssetInfo, AssetState, EncryptionOption};
pub use locator::{LocatorInfo, LocatorType};
pub use media_processor::MediaProcessorInfo;
