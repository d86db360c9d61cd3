use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use mediakit_client::{
    AccessPolicyPermissions, AssetState, EncryptionOption, ListOptions, LocatorType,
};

#[derive(Parser, Debug)]
#[command(name = "mediakit")]
#[command(about = "Media Services command line client", long_about = None)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, env = "MEDIAKIT_CONFIG_FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage assets
    #[command(subcommand)]
    Asset(AssetCommand),

    /// Manage access policies
    #[command(subcommand)]
    Policy(PolicyCommand),

    /// Manage locators
    #[command(subcommand)]
    Locator(LocatorCommand),

    /// Inspect media processors
    #[command(subcommand)]
    Processor(ProcessorCommand),

    /// Delete every locator, then every asset whose name starts with PREFIX
    Cleanup {
        #[arg(long, default_value = "testAsset")]
        prefix: String,
    },
}

/// OData query options shared by every list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// `$filter` expression, e.g. "Name eq 'clip'"
    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long)]
    pub top: Option<u32>,

    #[arg(long)]
    pub skip: Option<u32>,

    /// `$orderby` expression, e.g. "Created desc"
    #[arg(long)]
    pub order_by: Option<String>,
}

impl ListArgs {
    /// `None` when no option was given, so the request carries no query string.
    pub fn into_options(self) -> Option<ListOptions> {
        if self.filter.is_none() && self.top.is_none() && self.skip.is_none() && self.order_by.is_none() {
            return None;
        }

        let mut options = ListOptions::new();
        if let Some(filter) = self.filter {
            options = options.with_filter(filter);
        }
        if let Some(top) = self.top {
            options = options.with_top(top);
        }
        if let Some(skip) = self.skip {
            options = options.with_skip(skip);
        }
        if let Some(order_by) = self.order_by {
            options = options.with_order_by(order_by);
        }
        Some(options)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct AssetFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub alternate_id: Option<String>,

    /// none, storage-encrypted or common-encryption-protected
    #[arg(long)]
    pub encryption: Option<EncryptionOption>,

    /// initialized, published or deleted
    #[arg(long)]
    pub state: Option<AssetState>,
}

#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    List(ListArgs),
    Create(AssetFields),
    Get {
        id: String,
    },
    /// Change only the fields given
    Update {
        id: String,
        #[command(flatten)]
        fields: AssetFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    List(ListArgs),
    Create {
        name: String,

        #[arg(long)]
        duration_minutes: f64,

        /// Comma separated: read, write, delete, list (or none)
        #[arg(long, default_value = "none")]
        permissions: AccessPolicyPermissions,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocatorCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        policy_id: String,

        #[arg(long)]
        asset_id: String,

        /// sas or origin
        #[arg(long = "type")]
        locator_type: LocatorType,

        /// RFC 3339 timestamp
        #[arg(long)]
        start_time: Option<DateTime<Utc>>,

        /// RFC 3339 timestamp
        #[arg(long)]
        expires: Option<DateTime<Utc>>,
    },
    Get {
        id: String,
    },
    Update {
        id: String,

        #[arg(long)]
        start_time: Option<DateTime<Utc>>,

        #[arg(long)]
        expires: Option<DateTime<Utc>>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProcessorCommand {
    List(ListArgs),
}
