//! cdn command - Toggle CDN publication of a container

use cf_core::{DEFAULT_CDN_TTL, parse_path};
use clap::Subcommand;
use serde::Serialize;

use super::open_container;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// CDN subcommands
#[derive(Subcommand, Debug)]
pub enum CdnCommands {
    /// Publish a container through the CDN
    Enable(EnableArgs),

    /// Stop publishing a container through the CDN
    Disable(DisableArgs),
}

/// Arguments for the `cdn enable` command
#[derive(clap::Args, Debug)]
pub struct EnableArgs {
    /// Container path (account/container)
    pub path: String,

    /// CDN cache lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_CDN_TTL)]
    pub ttl: u64,
}

/// Arguments for the `cdn disable` command
#[derive(clap::Args, Debug)]
pub struct DisableArgs {
    /// Container path (account/container)
    pub path: String,
}

#[derive(Debug, Serialize)]
struct CdnOutput {
    container: String,
    public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
}

/// Execute a cdn subcommand
pub async fn execute(cmd: CdnCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (raw, ttl) = match &cmd {
        CdnCommands::Enable(args) => (args.path.as_str(), Some(args.ttl)),
        CdnCommands::Disable(args) => (args.path.as_str(), None),
    };

    let path = match parse_path(raw) {
        Ok(p) if p.is_container() => p,
        Ok(_) => {
            formatter.error(&format!("'{raw}' names an object, expected account/container"));
            return ExitCode::UsageError;
        }
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let mut container = match open_container(&path.account, &path.container, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = match ttl {
        Some(ttl) => container.make_public(ttl).await,
        None => container.make_private().await,
    };

    if let Err(e) = result {
        formatter.error(&format!("Failed to update CDN settings: {e}"));
        return ExitCode::from_error(&e);
    }

    let cdn = &container.status().cdn;
    if formatter.is_json() {
        formatter.json(&CdnOutput {
            container: container.name().to_string(),
            public: container.is_public(),
            ttl: cdn.ttl,
            uri: cdn.uri.clone(),
        });
    } else if container.is_public() {
        match &cdn.uri {
            Some(uri) => formatter.success(&format!("Container '{path}' is public at {uri}.")),
            None => formatter.success(&format!("Container '{path}' is public.")),
        }
    } else {
        formatter.success(&format!("Container '{path}' is private."));
    }

    ExitCode::Success
}
