//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::ports::ConfigStore;
use crate::commands::{self, ConnectionArgs};
use crate::domain::{ClientConfig, HammertimeConfig};
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::OsFs;
use crate::infra::grpc::GrpcClientFactory;

/// A basic CLI client to flintlock
#[derive(Parser)]
#[command(
    name = "hammertime",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// flintlock server address
    #[arg(short = 'a', long, env = "HAMMERTIME_GRPC_ADDRESS")]
    pub grpc_address: Option<String>,

    /// flintlock server port
    #[arg(short = 'p', long, env = "HAMMERTIME_GRPC_PORT")]
    pub grpc_port: Option<u16>,

    /// Token for basic authentication
    #[arg(
        short = 't',
        long,
        env = "HAMMERTIME_AUTH_TOKEN",
        hide_env_values = true
    )]
    pub basic_auth_token: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a microvm
    #[command(visible_alias = "c")]
    Create(commands::create::CreateArgs),

    /// Get a microvm
    #[command(visible_alias = "g")]
    Get(commands::get::GetArgs),

    /// List microvms
    #[command(visible_alias = "l")]
    List(commands::list::ListArgs),

    /// Delete microvms
    #[command(visible_alias = "d")]
    Delete(commands::delete::DeleteArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection settings are invalid or the command
    /// fails.
    pub async fn run(self) -> Result<()> {
        let client = self.client_config(&YamlConfigStore::new())?;
        let factory = GrpcClientFactory;
        let fs = OsFs;
        match self.command {
            Command::Create(args) => commands::create::run(args, &factory, &fs, &client).await,
            Command::Get(args) => commands::get::run(args, &factory, &fs, &client).await,
            Command::List(args) => commands::list::run(args, &factory, &client).await,
            Command::Delete(args) => commands::delete::run(args, &factory, &fs, &client).await,
        }
    }

    /// Resolve connection settings: subcommand flags, then top-level flags and
    /// environment, then the config file, then built-in defaults. An
    /// unreadable config file is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved port or a timeout is invalid.
    pub fn client_config(&self, store: &impl ConfigStore) -> Result<ClientConfig> {
        let config = store.load().unwrap_or_else(|e| {
            tracing::warn!("ignoring config file: {e:#}");
            HammertimeConfig::default()
        });
        let local = self.command.connection();
        Ok(config.grpc.client_config(
            local.grpc_address.or_else(|| self.grpc_address.clone()),
            local.server.grpc_port.or(self.grpc_port),
            local
                .server
                .basic_auth_token
                .or_else(|| self.basic_auth_token.clone()),
        )?)
    }
}

impl Command {
    /// Connection flags given after the subcommand.
    #[must_use]
    pub fn connection(&self) -> ConnectionArgs {
        match self {
            Self::Create(args) => args.connection.clone(),
            Self::Get(args) => args.connection.clone(),
            Self::List(args) => args.connection.clone(),
            Self::Delete(args) => args.connection(),
        }
    }
}
