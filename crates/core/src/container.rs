//! Containers
//!
//! A [`Container`] is a named bucket of objects. Opening one fetches its
//! summary metadata and probes the CDN management service; every other
//! operation is a single request whose status code decides the outcome.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::connection::{Connection, Endpoints, Method, Request, Response, escape_path};
use crate::error::{Error, Result};
use crate::listing::{ListOptions, ObjectDetail, parse_detail, parse_names};
use crate::object::StorageObject;

/// CDN cache lifetime applied by [`Container::make_public`] when none is chosen
pub const DEFAULT_CDN_TTL: u64 = 86400;

/// CDN state of a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CdnStatus {
    /// Whether the container is served through the CDN
    pub enabled: bool,

    /// Cache lifetime in seconds (only known when enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,

    /// Public CDN URI (only known when enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Consolidated result of the storage metadata fetch and the CDN probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStatus {
    pub bytes_used: u64,
    pub object_count: u64,
    pub cdn: CdnStatus,
}

/// A container on the storage service
///
/// The connection is shared and never modified. Cached metadata only changes
/// through [`refresh`](Self::refresh) and the CDN toggles.
pub struct Container<C: Connection + ?Sized> {
    connection: Arc<C>,
    name: String,
    status: ContainerStatus,
}

impl<C: Connection + ?Sized> Container<C> {
    /// Open an existing container
    ///
    /// Fails with [`Error::NoSuchContainer`] unless the storage service
    /// answers the metadata request with 204.
    pub async fn open(connection: Arc<C>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_container_name(&name)?;
        let status = Self::fetch_status(connection.as_ref(), &name).await?;
        Ok(Self {
            connection,
            name,
            status,
        })
    }

    /// Fetch storage metadata, then probe the CDN management service
    ///
    /// A failed probe means the container is not CDN-enabled; it is not an error.
    pub async fn fetch_status(connection: &C, name: &str) -> Result<ContainerStatus> {
        let endpoints = connection.endpoints();

        let request = Request::new(
            Method::Head,
            &endpoints.storage_host,
            container_path(&endpoints.storage_path, name),
        );
        let response = send(connection, request).await?;
        if response.status != 204 {
            return Err(Error::NoSuchContainer(name.to_string()));
        }

        let bytes_used = count_header(&response, "x-container-bytes-used");
        let object_count = count_header(&response, "x-container-object-count");

        let request = Request::new(
            Method::Head,
            &endpoints.cdn_mgmt_host,
            container_path(&endpoints.cdn_mgmt_path, name),
        );
        let response = send(connection, request).await?;
        let cdn = if response.status == 204 {
            CdnStatus {
                enabled: true,
                ttl: response.header("x-ttl").and_then(|v| v.parse().ok()),
                uri: response.header("x-cdn-uri").map(str::to_string),
            }
        } else {
            tracing::warn!(
                container = name,
                status = response.status,
                "CDN probe failed, treating container as private"
            );
            CdnStatus::default()
        };

        Ok(ContainerStatus {
            bytes_used,
            object_count,
            cdn,
        })
    }

    /// Re-fetch the cached metadata
    pub async fn refresh(&mut self) -> Result<()> {
        self.status = Self::fetch_status(self.connection.as_ref(), &self.name).await?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &ContainerStatus {
        &self.status
    }

    pub fn bytes_used(&self) -> u64 {
        self.status.bytes_used
    }

    pub fn object_count(&self) -> u64 {
        self.status.object_count
    }

    pub fn cdn_enabled(&self) -> bool {
        self.status.cdn.enabled
    }

    /// Whether the container is publicly served through the CDN
    pub fn is_public(&self) -> bool {
        self.status.cdn.enabled
    }

    /// True when the cached metadata reports no objects and no bytes
    pub fn is_empty(&self) -> bool {
        self.status.object_count == 0 && self.status.bytes_used == 0
    }

    /// Publish the container through the CDN with the given cache lifetime
    pub async fn make_public(&mut self, ttl: u64) -> Result<()> {
        let request = Request::new(Method::Put, &self.endpoints().cdn_mgmt_host, self.cdn_path())
            .header("X-CDN-Enabled", "True")
            .header("X-TTL", ttl.to_string());
        let response = self.send(request).await?;
        if response.status != 201 {
            return Err(Error::NoSuchContainer(self.name.clone()));
        }

        let uri = match response.header("x-cdn-uri") {
            Some(uri) => Some(uri.to_string()),
            None => self.status.cdn.uri.take(),
        };
        self.status.cdn = CdnStatus {
            enabled: true,
            ttl: Some(ttl),
            uri,
        };
        Ok(())
    }

    /// Stop serving the container through the CDN
    pub async fn make_private(&mut self) -> Result<()> {
        let request = Request::new(Method::Post, &self.endpoints().cdn_mgmt_host, self.cdn_path())
            .header("X-CDN-Enabled", "False");
        let response = self.send(request).await?;
        if response.status != 201 {
            return Err(Error::NoSuchContainer(self.name.clone()));
        }

        self.status.cdn = CdnStatus::default();
        Ok(())
    }

    /// Look up an existing object and its metadata
    pub async fn object(&self, name: &str) -> Result<StorageObject> {
        validate_object_name(name)?;
        let response = self.head_object(name).await?;
        match response.status {
            s if (200..300).contains(&s) => {
                Ok(StorageObject::with_response(&self.name, name, &response))
            }
            404 => Err(Error::NoSuchObject(self.qualified(name))),
            s => Err(Error::invalid_response(
                s,
                format!("fetching {}", self.qualified(name)),
            )),
        }
    }

    /// Get a handle for a new object; nothing is stored until data is written
    pub fn create_object(&self, name: &str) -> Result<StorageObject> {
        validate_object_name(name)?;
        Ok(StorageObject::new(&self.name, name))
    }

    /// Check whether an object exists
    pub async fn object_exists(&self, name: &str) -> Result<bool> {
        validate_object_name(name)?;
        let response = self.head_object(name).await?;
        Ok(response.is_success())
    }

    /// Delete an object
    pub async fn delete_object(&self, name: &str) -> Result<()> {
        validate_object_name(name)?;
        let request = Request::new(
            Method::Delete,
            &self.endpoints().storage_host,
            self.object_path(name),
        );
        let response = self.send(request).await?;
        match response.status {
            s if (200..300).contains(&s) => Ok(()),
            404 => Err(Error::NoSuchObject(self.qualified(name))),
            s => Err(Error::invalid_response(
                s,
                format!("deleting {}", self.qualified(name)),
            )),
        }
    }

    /// List object names in server order
    pub async fn objects(&self) -> Result<Vec<String>> {
        self.objects_with(&ListOptions::default()).await
    }

    /// List object names, filtered and paged by `options`
    pub async fn objects_with(&self, options: &ListOptions) -> Result<Vec<String>> {
        let response = self.list(options, false).await?;
        Ok(response
            .body
            .as_deref()
            .map(parse_names)
            .unwrap_or_default())
    }

    /// List objects with size, hash, content type and modification time
    pub async fn objects_detail(&self) -> Result<BTreeMap<String, ObjectDetail>> {
        self.objects_detail_with(&ListOptions::default()).await
    }

    /// Detailed listing, filtered and paged by `options`
    pub async fn objects_detail_with(
        &self,
        options: &ListOptions,
    ) -> Result<BTreeMap<String, ObjectDetail>> {
        let response = self.list(options, true).await?;
        match response.body.as_deref() {
            Some(body) => parse_detail(body),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Issue a listing request; 204 is turned into an empty 200
    async fn list(&self, options: &ListOptions, xml: bool) -> Result<Response> {
        let query = options.to_query(xml);
        let mut path = self.storage_path();
        if !query.is_empty() {
            path = format!("{path}?{query}");
        }

        let request = Request::new(Method::Get, &self.endpoints().storage_host, path);
        let response = self.send(request).await?;
        match response.status {
            200 => Ok(response),
            204 => Ok(Response::new(200)),
            s => Err(Error::invalid_response(s, format!("listing {}", self.name))),
        }
    }

    async fn head_object(&self, name: &str) -> Result<Response> {
        let request = Request::new(
            Method::Head,
            &self.endpoints().storage_host,
            self.object_path(name),
        );
        self.send(request).await
    }

    async fn send(&self, request: Request) -> Result<Response> {
        send(self.connection.as_ref(), request).await
    }

    fn endpoints(&self) -> &Endpoints {
        self.connection.endpoints()
    }

    fn storage_path(&self) -> String {
        container_path(&self.endpoints().storage_path, &self.name)
    }

    fn cdn_path(&self) -> String {
        container_path(&self.endpoints().cdn_mgmt_path, &self.name)
    }

    fn object_path(&self, name: &str) -> String {
        format!("{}/{}", self.storage_path(), escape_path(name))
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}/{}", self.name, name)
    }
}

impl<C: Connection + ?Sized> fmt::Display for Container<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<C: Connection + ?Sized> fmt::Debug for Container<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.name)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

async fn send<C: Connection + ?Sized>(connection: &C, request: Request) -> Result<Response> {
    let method = request.method;
    let path = request.path.clone();
    let response = connection.cfreq(request).await?;
    tracing::debug!(%method, %path, status = response.status, "storage request");
    Ok(response)
}

fn container_path(base: &str, name: &str) -> String {
    format!("{base}/{}", urlencoding::encode(name))
}

fn count_header(response: &Response, name: &str) -> u64 {
    response
        .header(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn validate_container_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("container name cannot be empty".into()));
    }
    if name.contains('/') {
        return Err(Error::InvalidName(format!(
            "container name cannot contain '/': {name}"
        )));
    }
    Ok(())
}

fn validate_object_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("object name cannot be empty".into()));
    }
    Ok(())
}
