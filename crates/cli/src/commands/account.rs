//! Account management commands
//!
//! Accounts are named Cloud Files sessions: storage URL, CDN management URL
//! and the auth token to present.

use clap::Subcommand;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use cf_core::{Account, AccountManager, TimeoutConfig};

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Add or update an account
    Set(SetArgs),

    /// List all configured accounts
    List(ListArgs),

    /// Remove an account
    Remove(RemoveArgs),
}

/// Arguments for the `account set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Account name (e.g., "prod", "staging")
    pub name: String,

    /// Storage URL (e.g., "https://storage.clouddrive.com/v1/MossoCloudFS_abc")
    pub storage_url: String,

    /// CDN management URL (e.g., "https://cdn.clouddrive.com/v1/MossoCloudFS_abc")
    pub cdn_mgmt_url: String,

    /// Auth token
    #[arg(env = "CF_AUTH_TOKEN")]
    pub auth_token: String,

    /// Allow insecure TLS connections
    #[arg(long, default_value = "false")]
    pub insecure: bool,

    /// Connection timeout in milliseconds
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout in milliseconds
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Fail instead of replacing an existing account
    #[arg(long)]
    pub no_clobber: bool,
}

/// Arguments for the `account list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including the CDN management URL
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `account remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the account to remove
    pub name: String,
}

/// JSON output for account list
#[derive(Serialize)]
struct AccountListOutput {
    accounts: Vec<AccountInfo>,
}

/// Account information for JSON output (without the token)
#[derive(Serialize)]
struct AccountInfo {
    name: String,
    storage_url: String,
    cdn_mgmt_url: String,
    insecure: bool,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            storage_url: account.storage_url.clone(),
            cdn_mgmt_url: account.cdn_mgmt_url.clone(),
            insecure: account.insecure,
        }
    }
}

/// JSON output for account set/remove operations
#[derive(Serialize)]
struct AccountOperationOutput {
    success: bool,
    account: String,
    message: String,
}

/// Execute an account subcommand
pub async fn execute(cmd: AccountCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let account_manager = match AccountManager::new() {
        Ok(am) => am,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        AccountCommands::Set(args) => execute_set(args, &account_manager, &formatter),
        AccountCommands::List(args) => execute_list(args, &account_manager, &formatter),
        AccountCommands::Remove(args) => execute_remove(args, &account_manager, &formatter),
    }
}

fn build_account(args: SetArgs) -> Account {
    let mut account = Account::new(
        args.name,
        args.storage_url,
        args.cdn_mgmt_url,
        args.auth_token,
    );
    account.insecure = args.insecure;

    if args.connect_timeout_ms.is_some() || args.read_timeout_ms.is_some() {
        let defaults = TimeoutConfig::default();
        account.timeout = Some(TimeoutConfig {
            connect_ms: args.connect_timeout_ms.unwrap_or(defaults.connect_ms),
            read_ms: args.read_timeout_ms.unwrap_or(defaults.read_ms),
        });
    }

    account
}

fn execute_set(args: SetArgs, manager: &AccountManager, formatter: &Formatter) -> ExitCode {
    let no_clobber = args.no_clobber;
    let account = build_account(args);
    let name = account.name.clone();

    if let Err(e) = account.validate() {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let result = if no_clobber {
        manager.add(account)
    } else {
        manager.set(account)
    };

    match result {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AccountOperationOutput {
                    success: true,
                    account: name.clone(),
                    message: format!("Account '{name}' configured successfully"),
                });
            } else {
                formatter.success(&format!("Account '{name}' configured successfully."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

fn execute_list(args: ListArgs, manager: &AccountManager, formatter: &Formatter) -> ExitCode {
    match manager.list() {
        Ok(accounts) => {
            if formatter.is_json() {
                formatter.json(&AccountListOutput {
                    accounts: accounts.iter().map(AccountInfo::from).collect(),
                });
            } else if accounts.is_empty() {
                formatter.println("No accounts configured.");
            } else if args.long {
                for account in &accounts {
                    formatter.println(&format!(
                        "{:<12} {} (cdn: {}{})",
                        account.name,
                        account.storage_url,
                        account.cdn_mgmt_url,
                        if account.insecure { ", insecure" } else { "" }
                    ));
                }
            } else {
                for account in &accounts {
                    formatter.println(&format!("{:<12} {}", account.name, account.storage_url));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

fn execute_remove(args: RemoveArgs, manager: &AccountManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AccountOperationOutput {
                    success: true,
                    account: args.name.clone(),
                    message: format!("Account '{}' removed successfully", args.name),
                });
            } else {
                formatter.success(&format!("Account '{}' removed successfully.", args.name));
            }
            ExitCode::Success
        }
        Err(cf_core::Error::AccountNotFound(_)) => {
            formatter.error(&format!("Account '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}
