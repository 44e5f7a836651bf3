//! cf-http: HTTP transport for the Cloud Files client
//!
//! This crate provides the implementation of the `Connection` trait
//! using reqwest. It is the only crate that directly depends on an
//! HTTP client.

pub mod client;

pub use client::HttpConnection;
