//! HTTP connection implementation
//!
//! Sends `cf-core` requests with reqwest, presenting the account's auth token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use cf_core::{Account, Connection, Endpoints, Error, Method, Request, Response, Result};

/// Header carrying the auth token on every request
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Authenticated HTTP connection to a Cloud Files account
pub struct HttpConnection {
    http_client: Client,
    endpoints: Endpoints,
    auth_token: String,
}

impl HttpConnection {
    /// Create a new connection from an account configuration
    pub fn new(account: &Account) -> Result<Self> {
        let endpoints = account.endpoints()?;
        let timeouts = account.timeout_config();

        let http_client = Client::builder()
            .danger_accept_invalid_certs(account.insecure)
            .connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .timeout(Duration::from_millis(timeouts.read_ms))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            endpoints,
            auth_token: account.auth_token.clone(),
        })
    }

    /// Full URL for a request
    fn url(request: &Request) -> String {
        format!("{}{}", request.host, request.path)
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Connection for HttpConnection {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn cfreq(&self, request: Request) -> Result<Response> {
        let url = Self::url(&request);

        let mut request_builder = self
            .http_client
            .request(http_method(request.method), &url)
            .header(AUTH_TOKEN_HEADER, &self.auth_token);

        for (name, value) in &request.headers {
            request_builder = request_builder.header(name, value);
        }

        if let Some(body) = request.body {
            request_builder = request_builder.body(body);
        }

        let http_response = request_builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {e}")))?;

        let mut response = Response::new(http_response.status().as_u16());
        for (name, value) in http_response.headers() {
            match value.to_str() {
                Ok(v) => response = response.append_header(name.as_str(), v),
                Err(_) => tracing::debug!("Skipping non-ASCII header {name}"),
            }
        }

        let text = http_response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {e}")))?;
        if !text.is_empty() {
            response = response.with_body(text);
        }

        Ok(response)
    }
}
