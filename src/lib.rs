//! Client library for the Artifactory REST API
//!
//! Browse repository trees, read file metadata and download statistics, list
//! repositories and search with AQL. Every resource object is a thin handle
//! (repository key + path) that fetches data from the server only when asked
//! and caches what it fetched.
//!
//! # Example
//!
//! ```ignore
//! use artifactory_storage::{Artifactory, Item};
//!
//! async fn walk() -> artifactory_storage::Result<()> {
//!     let rt = Artifactory::new("https://example.jfrog.io/artifactory", "api-key")?;
//!     let mut dir = rt.get_directory("libs-release-local", "org/acme").await?;
//!
//!     for child in dir.children().await? {
//!         if let Item::File(mut file) = child {
//!             println!("{} {}", file.path(), file.size().await?);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod aql;
pub mod artifactory;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;

/// Crate version, used in the default User-Agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use aql::FileCursor;
pub use artifactory::Connection;
pub use client::Artifactory;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use resource::{
    resolve_parent, AttributeGroup, Directory, File, Item, PackageType, RepositoryMetadata,
    RepositoryType, Resolution,
};
