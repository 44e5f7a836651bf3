//! cf-core: Core library for the Cloud Files client
//!
//! This crate provides:
//! - The `Connection` contract every transport implements
//! - Containers and their metadata, CDN visibility and object operations
//! - Storage objects and container listing parsers
//! - Configuration and account management
//! - Path parsing for `account/container[/object]`
//!
//! This crate is independent of any HTTP client, so containers can be
//! exercised against a mocked connection.

pub mod account;
pub mod config;
pub mod connection;
pub mod container;
pub mod error;
pub mod listing;
pub mod object;
pub mod path;

pub use account::{Account, AccountManager, TimeoutConfig};
pub use config::{Config, ConfigManager};
pub use connection::{Connection, Endpoints, Method, Request, Response};
pub use container::{CdnStatus, Container, ContainerStatus, DEFAULT_CDN_TTL};
pub use error::{Error, Result};
pub use listing::{ListOptions, ObjectDetail};
pub use object::{ObjectMetadata, StorageObject};
pub use path::{RemotePath, parse_path};
