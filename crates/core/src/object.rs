//! Storage objects
//!
//! A [`StorageObject`] names a single blob inside a container and carries
//! whatever metadata the service reported when it was looked up. Reading and
//! writing object bodies is left to higher layers.

use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;
use serde::Serialize;

use crate::connection::Response;

/// Prefix of user-defined metadata headers
const META_PREFIX: &str = "x-object-meta-";

/// Metadata reported by the service for an object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectMetadata {
    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// MD5 checksum of the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// User metadata, keyed without the `x-object-meta-` prefix
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ObjectMetadata {
    /// Extract object metadata from response headers
    pub fn from_response(response: &Response) -> Self {
        let metadata = response
            .headers()
            .filter_map(|(k, v)| {
                k.strip_prefix(META_PREFIX)
                    .map(|key| (key.to_string(), v.to_string()))
            })
            .collect();

        Self {
            bytes: response
                .header("content-length")
                .and_then(|v| v.trim().parse().ok()),
            content_type: response.header("content-type").map(str::to_string),
            etag: response
                .header("etag")
                .map(|v| v.trim_matches('"').to_string()),
            last_modified: response.header("last-modified").and_then(parse_http_date),
            metadata,
        }
    }
}

/// Parse an RFC 2822 date such as `Wed, 28 Jan 2009 16:16:26 GMT`
fn parse_http_date(value: &str) -> Option<Timestamp> {
    match jiff::fmt::rfc2822::parse(value) {
        Ok(zoned) => Some(zoned.timestamp()),
        Err(e) => {
            tracing::debug!("Ignoring unparsable last-modified {value:?}: {e}");
            None
        }
    }
}

/// A named object within a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    container: String,
    name: String,
    metadata: ObjectMetadata,
}

impl StorageObject {
    /// Create an object handle without any cached metadata
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            metadata: ObjectMetadata::default(),
        }
    }

    /// Create an object handle seeded from a metadata response
    pub fn with_response(
        container: impl Into<String>,
        name: impl Into<String>,
        response: &Response,
    ) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            metadata: ObjectMetadata::from_response(response),
        }
    }

    /// Name of the container holding this object
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

impl fmt::Display for StorageObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
