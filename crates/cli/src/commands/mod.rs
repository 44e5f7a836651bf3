//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use std::sync::Arc;

use cf_core::{AccountManager, Container, Error};
use cf_http::HttpConnection;
use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod account;
mod cdn;
mod completions;
mod ls;
mod rm;
mod stat;

/// cf - Cloud Files CLI client
///
/// A command-line interface for Cloud Files containers, objects and CDN settings.
#[derive(Parser, Debug)]
#[command(name = "cf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configured accounts
    #[command(subcommand)]
    Account(account::AccountCommands),

    /// List objects in a container
    Ls(ls::LsArgs),

    /// Show container or object metadata
    Stat(stat::StatArgs),

    /// Remove an object
    Rm(rm::RmArgs),

    /// Publish or unpublish a container through the CDN
    #[command(subcommand)]
    Cdn(cdn::CdnCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Account(cmd) => account::execute(cmd, output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Stat(args) => stat::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Cdn(cmd) => cdn::execute(cmd, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Resolve an account and open one of its containers
///
/// Failures are reported through the formatter and turned into an exit code.
async fn open_container(
    account_name: &str,
    container: &str,
    formatter: &Formatter,
) -> Result<Container<HttpConnection>, ExitCode> {
    let account_manager = AccountManager::new().map_err(|e| {
        formatter.error(&format!("Failed to load accounts: {e}"));
        ExitCode::GeneralError
    })?;

    let account = account_manager.get(account_name).map_err(|e| {
        let message = match &e {
            Error::AccountNotFound(_) => format!("Account '{account_name}' not found"),
            _ => format!("Failed to load account '{account_name}': {e}"),
        };
        formatter.error(&message);
        ExitCode::from_error(&e)
    })?;

    let connection = HttpConnection::new(&account).map_err(|e| {
        formatter.error(&format!("Failed to create connection: {e}"));
        ExitCode::from_error(&e)
    })?;

    Container::open(Arc::new(connection), container)
        .await
        .map_err(|e| {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        })
}
