//! Connection contract
//!
//! A [`Connection`] knows where the storage and CDN management services live
//! and can perform one authenticated request against either of them. The
//! container and object types are written purely against this trait, so the
//! transport can be swapped or mocked in tests.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// HTTP methods used by the storage API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Put,
    Post,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated service locations held by a connection
///
/// Hosts carry the scheme and authority (`https://storage.example.com`),
/// paths carry the account prefix without a trailing slash (`/v1/acct`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub storage_host: String,
    pub storage_path: String,
    pub cdn_mgmt_host: String,
    pub cdn_mgmt_path: String,
}

impl Endpoints {
    /// Split a storage URL and a CDN management URL into host and path parts
    pub fn from_urls(storage_url: &str, cdn_mgmt_url: &str) -> Result<Self> {
        let (storage_host, storage_path) = split_url(storage_url)?;
        let (cdn_mgmt_host, cdn_mgmt_path) = split_url(cdn_mgmt_url)?;
        Ok(Self {
            storage_host,
            storage_path,
            cdn_mgmt_host,
            cdn_mgmt_path,
        })
    }
}

fn split_url(raw: &str) -> Result<(String, String)> {
    let url = Url::parse(raw)?;
    let host = url.origin().ascii_serialization();
    let path = url.path().trim_end_matches('/').to_string();
    Ok((host, path))
}

/// A single request to be sent by a [`Connection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Target host, as found in [`Endpoints`]
    pub host: String,
    /// Escaped path, optionally followed by a query string
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a request body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a request header, ignoring case
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response to a [`Request`]: status code, headers and optional body text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Add a header; names are stored lowercased
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Add a header, joining repeated names with `, `
    pub fn append_header(mut self, name: impl AsRef<str>, value: &str) -> Self {
        self.headers
            .entry(name.as_ref().to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header by name, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Iterate over all headers as (lowercase name, value)
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An authenticated session against the storage service
///
/// Implementations only move bytes: a response with any status code is a
/// successful call. Failing to obtain a response at all is reported as
/// [`Error::Network`](crate::Error::Network).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connection: Send + Sync {
    /// Service locations this connection was authenticated for
    fn endpoints(&self) -> &Endpoints;

    /// Perform one request and return the raw response
    async fn cfreq(&self, request: Request) -> Result<Response>;
}

/// Percent-escape a name for use in a request path
///
/// Each `/`-separated segment is escaped on its own so that pseudo-directory
/// separators in object names survive.
pub fn escape_path(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_urls() {
        let endpoints = Endpoints::from_urls(
            "https://storage.example.com/v1/MossoCloudFS_abc/",
            "https://cdn.example.com:8443/v1/MossoCloudFS_abc",
        )
        .unwrap();
        assert_eq!(endpoints.storage_host, "https://storage.example.com");
        assert_eq!(endpoints.storage_path, "/v1/MossoCloudFS_abc");
        assert_eq!(endpoints.cdn_mgmt_host, "https://cdn.example.com:8443");
        assert_eq!(endpoints.cdn_mgmt_path, "/v1/MossoCloudFS_abc");
    }

    #[test]
    fn test_endpoints_from_bad_url() {
        assert!(Endpoints::from_urls("not a url", "https://cdn.example.com").is_err());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let response = Response::new(204).with_header("X-Container-Object-Count", "5");
        assert_eq!(response.header("x-container-object-count"), Some("5"));
        assert_eq!(response.header("X-CONTAINER-OBJECT-COUNT"), Some("5"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_response_append_header_joins_repeats() {
        let response = Response::new(200)
            .append_header("Via", "1.1 proxy-a")
            .append_header("via", "1.1 proxy-b")
            .append_header("X-Trans-Id", "tx1");
        assert_eq!(response.header("via"), Some("1.1 proxy-a, 1.1 proxy-b"));
        assert_eq!(response.header("x-trans-id"), Some("tx1"));
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200).is_success());
        assert!(Response::new(204).is_success());
        assert!(!Response::new(404).is_success());
        assert!(!Response::new(999).is_success());
    }

    #[test]
    fn test_request_builder() {
        let request = Request::new(Method::Put, "https://cdn.example.com", "/v1/acct/photos")
            .header("X-CDN-Enabled", "True")
            .header("X-TTL", "3600");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.header_value("x-ttl"), Some("3600"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_escape_path() {
        assert_eq!(escape_path("kisscam.mov"), "kisscam.mov");
        assert_eq!(escape_path("my photos/cat 1.jpg"), "my%20photos/cat%201.jpg");
        assert_eq!(escape_path("a&b"), "a%26b");
    }
}
