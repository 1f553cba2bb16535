//! Artifactory Query Language (AQL) support
//!
//! - [`cursor`] - Builder and lazy iterator for `items.find` queries
//! - [`serialize`] - Rendering criteria and field lists as AQL text
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//!
//! async fn stale_manifests(rt: &artifactory_storage::Artifactory) -> artifactory_storage::Result<()> {
//!     let mut cursor = rt
//!         .items()
//!         .find(&json!({"repo": "docker", "name": {"$eq": "manifest.json"}}))?
//!         .include(&["size", "created"]);
//!
//!     while let Some(file) = cursor.next().await? {
//!         println!("{}", file.path());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cursor;
pub mod serialize;

pub use cursor::{AqlRange, FileCursor, REQUIRED_FIELDS};
