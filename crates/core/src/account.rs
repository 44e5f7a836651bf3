//! Account management
//!
//! Accounts are named, already-authenticated sessions against a Cloud Files
//! deployment: the storage and CDN management URLs plus the token to present.

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::connection::Endpoints;
use crate::error::{Error, Result};
use crate::path::is_valid_account_name;

/// Timeout configuration for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            read_ms: default_read_timeout(),
        }
    }
}

/// A named Cloud Files account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique name for this account
    pub name: String,

    /// Storage service URL, including the account path
    pub storage_url: String,

    /// CDN management service URL, including the account path
    pub cdn_mgmt_url: String,

    /// Token sent as `X-Auth-Token`
    pub auth_token: String,

    /// Allow insecure TLS connections
    #[serde(default)]
    pub insecure: bool,

    /// Timeout configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

impl Account {
    /// Create a new account with required fields
    pub fn new(
        name: impl Into<String>,
        storage_url: impl Into<String>,
        cdn_mgmt_url: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            storage_url: storage_url.into(),
            cdn_mgmt_url: cdn_mgmt_url.into(),
            auth_token: auth_token.into(),
            insecure: false,
            timeout: None,
        }
    }

    /// Get the effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    /// Split the configured URLs into connection endpoints
    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::from_urls(&self.storage_url, &self.cdn_mgmt_url)
    }

    /// Check that the account can be saved and used
    pub fn validate(&self) -> Result<()> {
        if !is_valid_account_name(&self.name) {
            return Err(Error::Config(format!(
                "Account name '{}' may only contain letters, digits, '_' and '-'",
                self.name
            )));
        }
        if self.auth_token.is_empty() {
            return Err(Error::Config("Auth token cannot be empty".into()));
        }
        self.endpoints()?;
        Ok(())
    }
}

/// Manager for account operations
pub struct AccountManager {
    config_manager: ConfigManager,
}

impl AccountManager {
    /// Create a new AccountManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new AccountManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured accounts
    pub fn list(&self) -> Result<Vec<Account>> {
        let config = self.config_manager.load()?;
        Ok(config.accounts)
    }

    /// Get an account by name
    pub fn get(&self, name: &str) -> Result<Account> {
        let config = self.config_manager.load()?;
        config
            .accounts
            .into_iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::AccountNotFound(name.to_string()))
    }

    /// Add or update an account
    pub fn set(&self, account: Account) -> Result<()> {
        account.validate()?;
        let mut config = self.config_manager.load()?;

        config.accounts.retain(|a| a.name != account.name);
        config.accounts.push(account);

        self.config_manager.save(&config)
    }

    /// Add an account, failing if one with the same name exists
    pub fn add(&self, account: Account) -> Result<()> {
        if self.exists(&account.name)? {
            return Err(Error::AccountExists(account.name));
        }
        self.set(account)
    }

    /// Remove an account
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.accounts.len();

        config.accounts.retain(|a| a.name != name);

        if config.accounts.len() == original_len {
            return Err(Error::AccountNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }

    /// Check if an account exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let config = self.config_manager.load()?;
        Ok(config.accounts.iter().any(|a| a.name == name))
    }
}
