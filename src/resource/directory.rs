//! Directories and repository roots

use super::file::File;
use super::parent::resolve_parent;
use super::types::{PackageType, RepositoryType};
use super::{delete_item, join_path, normalize_path};
use crate::artifactory::Connection;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Query string for a deep, files-only listing
const DEEP_LIST_QUERY: &str = "list&deep=1&ListFolders=0&mdTimestamps=0";

/// Repository-level metadata, present only on repository roots
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryMetadata {
    pub repository_type: RepositoryType,
    pub package_type: PackageType,
    /// Canonical repository URL
    pub url: String,
    pub description: Option<String>,
}

/// One entry of a directory listing
#[derive(Debug, Clone)]
pub enum Item {
    Directory(Directory),
    File(File),
}

impl Item {
    pub fn path(&self) -> &str {
        match self {
            Item::Directory(d) => d.path(),
            Item::File(f) => f.path(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Item::Directory(_))
    }
}

/// Deep file listing of a directory
#[derive(Debug, Clone, Deserialize)]
pub struct FileList {
    pub uri: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub files: Vec<FileListEntry>,
}

/// A file in a deep listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListEntry {
    /// Path relative to the listed directory, with a leading slash
    pub uri: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub folder: bool,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha2: Option<String>,
}

/// A directory in a repository; the root of a repository when `path` is empty
#[derive(Debug, Clone)]
pub struct Directory {
    connection: Connection,
    repository_key: String,
    path: String,
    context: Option<Value>,
    repository: Option<RepositoryMetadata>,
}

impl Directory {
    pub fn new(connection: Connection, repository_key: impl Into<String>, path: &str) -> Self {
        Self {
            connection,
            repository_key: repository_key.into(),
            path: normalize_path(path),
            context: None,
            repository: None,
        }
    }

    /// Repository root carrying its listing metadata
    pub fn repository(
        connection: Connection,
        repository_key: impl Into<String>,
        metadata: RepositoryMetadata,
    ) -> Self {
        Self {
            repository: Some(metadata),
            ..Self::new(connection, repository_key, "")
        }
    }

    /// Seed the context cache with an already-fetched storage reply
    pub(crate) fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    /// Path inside the repository, empty for the root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment, or the repository key at root
    pub fn name(&self) -> &str {
        self.path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.repository_key.as_str())
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether this directory is a repository root built from the listing
    pub fn is_repository(&self) -> bool {
        self.repository.is_some()
    }

    pub fn repository_metadata(&self) -> Option<&RepositoryMetadata> {
        self.repository.as_ref()
    }

    /// Context if it was already fetched
    pub fn cached_context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Storage API description of this directory, fetched once and cached
    pub async fn context(&mut self) -> Result<&Value> {
        let context = match self.context.take() {
            Some(context) => context,
            None => {
                let url = self.connection.storage_url(&self.repository_key, &self.path);
                self.connection.get(&url).await?
            }
        };

        Ok(self.context.insert(context))
    }

    /// Storage API URI of this directory
    pub async fn uri(&mut self) -> Result<String> {
        self.context()
            .await?
            .get("uri")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| Error::unexpected("directory context has no uri"))
    }

    /// Immediate children, one level deep
    pub async fn children(&mut self) -> Result<Vec<Item>> {
        let entries = self
            .context()
            .await?
            .get("children")
            .and_then(|v| v.as_array())
            .cloned();

        let Some(entries) = entries else {
            return Err(Error::unexpected(format!(
                "{}/{} has no children listing; is it a file?",
                self.repository_key, self.path
            )));
        };

        let mut children = Vec::with_capacity(entries.len());
        for entry in &entries {
            let uri = entry
                .get("uri")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::unexpected("child entry has no uri"))?;
            let folder = entry.get("folder").and_then(|v| v.as_bool()).unwrap_or(false);
            let path = join_path(&self.path, uri);

            if folder {
                children.push(Item::Directory(Directory::new(
                    self.connection.clone(),
                    self.repository_key.as_str(),
                    &path,
                )));
            } else {
                children.push(Item::File(File::new(
                    self.connection.clone(),
                    self.repository_key.as_str(),
                    &path,
                )));
            }
        }

        Ok(children)
    }

    /// Deep listing of every file below this directory (never cached)
    pub async fn file_list(&self) -> Result<FileList> {
        let url = format!(
            "{}?{}",
            self.connection.storage_url(&self.repository_key, &self.path),
            DEEP_LIST_QUERY
        );
        let response = self.connection.get(&url).await?;

        Ok(serde_json::from_value(response)?)
    }

    /// Total size in bytes of every file below this directory
    pub async fn size(&self) -> Result<u64> {
        let file_list = self.file_list().await?;
        Ok(file_list.files.iter().map(|f| f.size).sum())
    }

    /// Total size as a human readable string, e.g. `15M`
    pub async fn human_size(&self) -> Result<String> {
        Ok(format_size(self.size().await?))
    }

    /// Delete this directory; `Ok(false)` when the server refuses
    pub async fn delete(&self) -> Result<bool> {
        delete_item(&self.connection, &self.repository_key, &self.path, "directory").await
    }

    /// Enclosing directory, or the owning repository at root
    pub async fn parent(&self) -> Result<Directory> {
        resolve_parent(&self.connection, &self.repository_key, &self.path).await
    }
}

/// Format bytes with 1024-based single-letter suffixes, truncating
fn format_size(bytes: u64) -> String {
    const UNITS: &[(u64, &str)] = &[
        (1 << 50, "P"),
        (1 << 40, "T"),
        (1 << 30, "G"),
        (1 << 20, "M"),
        (1 << 10, "K"),
        (1, "B"),
    ];

    UNITS
        .iter()
        .find(|(factor, _)| bytes >= *factor)
        .map(|(factor, suffix)| format!("{}{}", bytes / factor, suffix))
        .unwrap_or_else(|| "0B".to_string())
}
