//! Command execution
//!
//! Every command talks to the service only through [`MediaContract`] and
//! produces a JSON value that `main` prints to stdout.

use mediakit_client::{
    CreateAccessPolicyOptions, CreateAssetOptions, CreateLocatorOptions, MediaContract, MediaError,
    UpdateAssetOptions, UpdateLocatorOptions,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::cli::{AssetCommand, AssetFields, Command, LocatorCommand, PolicyCommand, ProcessorCommand};

/// Outcome of [`cleanup`]. Failures are recorded, not fatal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub locators_deleted: usize,
    pub assets_deleted: usize,
    pub failures: Vec<String>,
}

/// Execute a command and print its JSON result.
pub async fn run(service: &dyn MediaContract, command: Command) -> anyhow::Result<()> {
    let output = execute(service, command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub async fn execute(service: &dyn MediaContract, command: Command) -> Result<Value, MediaError> {
    match command {
        Command::Asset(cmd) => asset(service, cmd).await,
        Command::Policy(cmd) => policy(service, cmd).await,
        Command::Locator(cmd) => locator(service, cmd).await,
        Command::Processor(ProcessorCommand::List(args)) => {
            to_json(&service.list_media_processors(args.into_options()).await?)
        }
        Command::Cleanup { prefix } => to_json(&cleanup(service, &prefix).await?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, MediaError> {
    Ok(serde_json::to_value(value)?)
}

async fn asset(service: &dyn MediaContract, command: AssetCommand) -> Result<Value, MediaError> {
    match command {
        AssetCommand::List(args) => to_json(&service.list_assets(args.into_options()).await?),
        AssetCommand::Create(fields) => {
            let options = create_asset_options(fields);
            to_json(&service.create_asset(options).await?)
        }
        AssetCommand::Get { id } => to_json(&service.get_asset(&id).await?),
        AssetCommand::Update { id, fields } => {
            service.update_asset(&id, update_asset_options(fields)).await?;
            Ok(json!({ "updated": id }))
        }
        AssetCommand::Delete { id } => {
            service.delete_asset(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

/// No flags at all means "let the service choose everything".
fn create_asset_options(fields: AssetFields) -> Option<CreateAssetOptions> {
    let AssetFields {
        name,
        alternate_id,
        encryption,
        state,
    } = fields;
    if name.is_none() && alternate_id.is_none() && encryption.is_none() && state.is_none() {
        return None;
    }
    Some(CreateAssetOptions {
        name,
        alternate_id,
        options: encryption,
        state,
    })
}

fn update_asset_options(fields: AssetFields) -> UpdateAssetOptions {
    UpdateAssetOptions {
        name: fields.name,
        alternate_id: fields.alternate_id,
        options: fields.encryption,
        state: fields.state,
    }
}

async fn policy(service: &dyn MediaContract, command: PolicyCommand) -> Result<Value, MediaError> {
    match command {
        PolicyCommand::List(args) => to_json(&service.list_access_policies(args.into_options()).await?),
        PolicyCommand::Create {
            name,
            duration_minutes,
            permissions,
        } => {
            let options = CreateAccessPolicyOptions::new().with_permissions(permissions);
            to_json(
                &service
                    .create_access_policy(&name, duration_minutes, Some(options))
                    .await?,
            )
        }
        PolicyCommand::Get { id } => to_json(&service.get_access_policy(&id).await?),
        PolicyCommand::Delete { id } => {
            service.delete_access_policy(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn locator(service: &dyn MediaContract, command: LocatorCommand) -> Result<Value, MediaError> {
    match command {
        LocatorCommand::List(args) => to_json(&service.list_locators(args.into_options()).await?),
        LocatorCommand::Create {
            policy_id,
            asset_id,
            locator_type,
            start_time,
            expires,
        } => {
            let options = CreateLocatorOptions {
                start_time,
                expiration_date_time: expires,
            };
            to_json(
                &service
                    .create_locator(&policy_id, &asset_id, locator_type, Some(options))
                    .await?,
            )
        }
        LocatorCommand::Get { id } => to_json(&service.get_locator(&id).await?),
        LocatorCommand::Update {
            id,
            start_time,
            expires,
        } => {
            let options = UpdateLocatorOptions {
                start_time,
                expiration_date_time: expires,
            };
            service.update_locator(&id, options).await?;
            Ok(json!({ "updated": id }))
        }
        LocatorCommand::Delete { id } => {
            service.delete_locator(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

/// Remove all locators, then every asset whose name starts with `prefix`.
///
/// Locators go first since the service refuses to delete an asset that
/// still has one. Listing failures abort; individual delete failures are
/// logged and reported.
pub async fn cleanup(service: &dyn MediaContract, prefix: &str) -> Result<CleanupReport, MediaError> {
    let mut report = CleanupReport::default();

    for locator in service.list_locators(None).await? {
        match service.delete_locator(&locator.id).await {
            Ok(()) => report.locators_deleted += 1,
            Err(e) => {
                warn!(locator_id = %locator.id, error = %e, "Failed to delete locator");
                report.failures.push(format!("locator {}: {e}", locator.id));
            }
        }
    }

    let assets = service.list_assets(None).await?;
    for asset in assets.iter().filter(|a| a.name.starts_with(prefix)) {
        match service.delete_asset(&asset.id).await {
            Ok(()) => report.assets_deleted += 1,
            Err(e) => {
                warn!(asset_id = %asset.id, error = %e, "Failed to delete asset");
                report.failures.push(format!("asset {}: {e}", asset.id));
            }
        }
    }

    info!(
        prefix,
        locators_deleted = report.locators_deleted,
        assets_deleted = report.assets_deleted,
        failures = report.failures.len(),
        "Cleanup finished"
    );
    Ok(report)
}
