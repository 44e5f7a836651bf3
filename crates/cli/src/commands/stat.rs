//! stat command - Show container or object metadata
//!
//! For a container, shows its size, object count and CDN state.
//! For an object, shows the metadata returned by the service.

use cf_core::{ContainerStatus, ObjectMetadata, parse_path};
use clap::Args;
use serde::Serialize;

use super::open_container;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show container or object metadata
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Container or object path (account/container[/object])
    pub path: String,
}

#[derive(Debug, Serialize)]
struct ContainerStatOutput<'a> {
    container: &'a str,
    #[serde(flatten)]
    status: &'a ContainerStatus,
    size_human: String,
    empty: bool,
}

#[derive(Debug, Serialize)]
struct ObjectStatOutput<'a> {
    container: &'a str,
    name: &'a str,
    #[serde(flatten)]
    metadata: &'a ObjectMetadata,
}

/// Execute the stat command
pub async fn execute(args: StatArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_path(&args.path) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let container = match open_container(&path.account, &path.container, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    if path.is_container() {
        let status = container.status();
        let size_human = humansize::format_size(status.bytes_used, humansize::BINARY);
        if formatter.is_json() {
            formatter.json(&ContainerStatOutput {
                container: container.name(),
                status,
                size_human,
                empty: container.is_empty(),
            });
        } else {
            formatter.println(&format!("Container : {}", container.name()));
            formatter.println(&format!("Objects   : {}", status.object_count));
            formatter.println(&format!(
                "Size      : {size_human} ({} bytes)",
                status.bytes_used
            ));
            formatter.println(&format!(
                "Public    : {}",
                if container.is_public() { "yes" } else { "no" }
            ));
            if let Some(uri) = &status.cdn.uri {
                formatter.println(&format!("CDN URI   : {uri}"));
            }
            if let Some(ttl) = status.cdn.ttl {
                formatter.println(&format!("CDN TTL   : {ttl}s"));
            }
        }
        return ExitCode::Success;
    }

    match container.object(&path.object).await {
        Ok(object) => {
            let meta = object.metadata();
            if formatter.is_json() {
                formatter.json(&ObjectStatOutput {
                    container: object.container(),
                    name: object.name(),
                    metadata: meta,
                });
            } else {
                formatter.println(&format!("Name      : {}", object.name()));
                if let Some(modified) = meta.last_modified {
                    formatter.println(&format!(
                        "Date      : {}",
                        modified.strftime("%Y-%m-%d %H:%M:%S UTC")
                    ));
                }
                if let Some(size) = meta.bytes {
                    formatter.println(&format!(
                        "Size      : {} ({size} bytes)",
                        humansize::format_size(size, humansize::BINARY)
                    ));
                }
                if let Some(etag) = &meta.etag {
                    formatter.println(&format!("ETag      : {etag}"));
                }
                if let Some(ct) = &meta.content_type {
                    formatter.println(&format!("Type      : {ct}"));
                }
                for (key, value) in &meta.metadata {
                    formatter.println(&format!("Meta      : {key}={value}"));
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
