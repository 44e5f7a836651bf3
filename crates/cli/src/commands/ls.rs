//! ls command - List objects
//!
//! Lists the object names of a container, or a detailed table with sizes,
//! content types and modification times.

use std::collections::BTreeMap;

use cf_core::{ListOptions, ObjectDetail, parse_path};
use clap::Args;
use serde::Serialize;

use super::open_container;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List objects in a container
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Container path, optionally with a name prefix (account/container[/prefix])
    pub path: String,

    /// Show size, content type and modification time
    #[arg(short, long)]
    pub detail: bool,

    /// Maximum number of objects to list
    #[arg(long)]
    pub limit: Option<u32>,

    /// Start listing after this object name
    #[arg(long)]
    pub marker: Option<String>,

    /// Show totals after the listing
    #[arg(long)]
    pub summarize: bool,
}

#[derive(Debug, Serialize)]
struct LsOutput {
    container: String,
    objects: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LsDetailOutput {
    container: String,
    objects: BTreeMap<String, ObjectDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
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

    let options = ListOptions {
        limit: args.limit,
        marker: args.marker.clone(),
        prefix: (!path.object.is_empty()).then(|| path.object.clone()),
        path: None,
    };

    if args.detail {
        match container.objects_detail_with(&options).await {
            Ok(objects) => print_detail(container.name(), objects, args.summarize, &formatter),
            Err(e) => {
                formatter.error(&format!("Failed to list objects: {e}"));
                return ExitCode::from_error(&e);
            }
        }
    } else {
        match container.objects_with(&options).await {
            Ok(objects) => print_names(container.name(), objects, args.summarize, &formatter),
            Err(e) => {
                formatter.error(&format!("Failed to list objects: {e}"));
                return ExitCode::from_error(&e);
            }
        }
    }

    ExitCode::Success
}

fn print_names(container: &str, objects: Vec<String>, summarize: bool, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(&LsOutput {
            container: container.to_string(),
            objects,
        });
        return;
    }

    for name in &objects {
        formatter.println(name);
    }
    if summarize {
        formatter.println(&format!("\nTotal: {} objects", objects.len()));
    }
}

fn print_detail(
    container: &str,
    objects: BTreeMap<String, ObjectDetail>,
    summarize: bool,
    formatter: &Formatter,
) {
    let summary = summarize.then(|| summarize_detail(&objects));

    if formatter.is_json() {
        formatter.json(&LsDetailOutput {
            container: container.to_string(),
            objects,
            summary,
        });
        return;
    }

    let rows = objects
        .iter()
        .map(|(name, detail)| {
            vec![
                detail.last_modified.clone(),
                human_size(&detail.bytes),
                detail.content_type.clone(),
                name.clone(),
            ]
        })
        .collect();
    formatter.table(&["Last modified", "Size", "Content type", "Name"], rows);

    if let Some(summary) = summary {
        formatter.println(&format!(
            "\nTotal: {} objects, {}",
            summary.total_objects, summary.total_size_human
        ));
    }
}

fn summarize_detail(objects: &BTreeMap<String, ObjectDetail>) -> Summary {
    let total_size_bytes = objects
        .values()
        .filter_map(|d| d.bytes.parse::<u64>().ok())
        .sum();
    Summary {
        total_objects: objects.len(),
        total_size_bytes,
        total_size_human: humansize::format_size(total_size_bytes, humansize::BINARY),
    }
}

/// Render a byte count as sent by the service; unparsable values pass through
fn human_size(bytes: &str) -> String {
    match bytes.parse::<u64>() {
        Ok(n) => humansize::format_size(n, humansize::BINARY),
        Err(_) => bytes.to_string(),
    }
}
