//! Resource object model
//!
//! Server-side entities as lazily-resolved client objects. Each object holds
//! its identifying keys (repository key and path) plus a [`Connection`]
//! clone, and fetches descriptive data only when asked.
//!
//! # Architecture
//!
//! - [`directory`] - Directories, and repository roots via [`RepositoryMetadata`]
//! - [`file`] - Files with separately cached info and statistics attributes
//! - [`parent`] - Parent resolution shared by both
//! - [`types`] - Repository and package type enumerations
//!
//! Navigation (`children`, `parent`) always builds new, independent objects;
//! nothing holds a back-pointer to the object it came from.

pub mod directory;
pub mod file;
pub mod parent;
pub mod types;

pub use directory::{Directory, FileList, FileListEntry, Item, RepositoryMetadata};
pub use file::{AttributeGroup, Checksums, File, Resolution, INFO_ATTRIBUTES, STATISTICS_ATTRIBUTES};
pub use parent::resolve_parent;
pub use types::{PackageType, RepositoryType};

use crate::artifactory::Connection;
use crate::error::Result;

/// Delete an item by its direct URL.
/// Returns whether the server accepted the delete; only transport failures are errors.
pub(crate) async fn delete_item(
    connection: &Connection,
    repository_key: &str,
    path: &str,
    kind: &str,
) -> Result<bool> {
    tracing::info!("Deleting {} {}/{}", kind, repository_key, path);

    let url = connection.item_url(repository_key, path);
    let status = connection.delete(&url).await?;

    Ok(status.is_success())
}

/// Normalize a repository-relative path: no leading or trailing slash
pub(crate) fn normalize_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}

/// Append a child component to a repository-relative path
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    let child = child.trim_matches('/');
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}
