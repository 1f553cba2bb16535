//! Parent resolution shared by directories and files

use super::Directory;
use crate::artifactory::repositories;
use crate::artifactory::Connection;
use crate::error::Result;

/// Resolve the parent of `path` inside `repository_key`.
///
/// A path with at least one segment above it yields the enclosing
/// [`Directory`]. Anything at repository root (or the root itself) yields the
/// owning repository, which costs a call to the repositories listing.
pub async fn resolve_parent(
    connection: &Connection,
    repository_key: &str,
    path: &str,
) -> Result<Directory> {
    match parent_path(path) {
        Some(parent) => Ok(Directory::new(connection.clone(), repository_key, parent)),
        None => repositories::get_repository(connection, repository_key).await,
    }
}

/// Path one segment up, or `None` when `path` sits at repository root
pub(crate) fn parent_path(path: &str) -> Option<&str> {
    let path = path.trim_matches('/');
    path.rfind('/').map(|idx| &path[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c.txt"), Some("a/b"));
        assert_eq!(parent_path("a/b"), Some("a"));
        assert_eq!(parent_path("a"), None);
        assert_eq!(parent_path(""), None);
        assert_eq!(parent_path("a/b/"), Some("a"));
    }
}
