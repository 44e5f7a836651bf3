//! rm command - Remove objects
//!
//! Removes one or more objects from their containers.

use cf_core::{Error, parse_path};
use clap::Args;
use serde::Serialize;

use super::open_container;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object path(s) to remove (account/container/object)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Do not fail when an object does not exist
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<String>,
    total: usize,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut exit_code = ExitCode::Success;

    for raw in &args.paths {
        let path = match parse_path(raw) {
            Ok(p) if !p.is_container() => p,
            Ok(_) => {
                formatter.error(&format!("'{raw}' names a container, not an object"));
                return ExitCode::UsageError;
            }
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::UsageError;
            }
        };

        let container = match open_container(&path.account, &path.container, &formatter).await {
            Ok(c) => c,
            Err(code) => {
                failed.push(path.to_string());
                exit_code = code;
                continue;
            }
        };

        match container.delete_object(&path.object).await {
            Ok(()) => {
                tracing::debug!(path = %path, "Deleted object");
                formatter.success(&format!("Removed '{path}'."));
                deleted.push(path.to_string());
            }
            Err(Error::NoSuchObject(_)) if args.force => {
                tracing::debug!(path = %path, "Object already gone");
            }
            Err(e) => {
                formatter.error(&format!("Failed to remove '{path}': {e}"));
                failed.push(path.to_string());
                exit_code = ExitCode::from_error(&e);
            }
        }
    }

    if formatter.is_json() {
        formatter.json(&RmOutput {
            status: if failed.is_empty() { "success" } else { "partial" },
            total: deleted.len(),
            deleted,
            failed,
        });
    }

    exit_code
}
