//! Artifactory API interaction module
//!
//! Core plumbing for talking to an Artifactory instance: API-key
//! authentication, the HTTP client, the shared connection and the
//! repositories listing.
//!
//! # Module Structure
//!
//! - [`auth`] - API-key header injection
//! - [`connection`] - Shared connection and URL construction
//! - [`http`] - HTTP utilities for REST API calls
//! - [`repositories`] - Repository listing and lookup
//!
//! # Example
//!
//! ```ignore
//! use artifactory_storage::artifactory::{repositories, Connection};
//! use artifactory_storage::ClientConfig;
//!
//! async fn example() -> artifactory_storage::Result<()> {
//!     let config = ClientConfig::new("https://example.jfrog.io/artifactory", "api-key");
//!     let connection = Connection::new(&config)?;
//!     let repos = repositories::list_repositories(&connection, None, None).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod connection;
pub mod http;
pub mod repositories;

pub use connection::Connection;
