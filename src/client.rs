//! Artifactory client
//!
//! Entry point into the Artifacts & Storage APIs: builds the shared
//! [`Connection`] and hands out repositories, directories, files and
//! search cursors bound to it.

use crate::aql::FileCursor;
use crate::artifactory::{repositories, Connection};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{Directory, File, PackageType, RepositoryType};

/// Main Artifactory client
#[derive(Debug, Clone)]
pub struct Artifactory {
    connection: Connection,
}

impl Artifactory {
    /// Create a client for `base_url` authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url, api_key))
    }

    /// Create a client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let connection = Connection::new(config)?;
        tracing::debug!("Artifactory client created for {}", connection.base_url());
        Ok(Self { connection })
    }

    /// Create a client from `ARTIFACTORY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// List repositories, optionally filtered by repository and package type
    pub async fn get_repositories(
        &self,
        repository_type: Option<RepositoryType>,
        package_type: Option<PackageType>,
    ) -> Result<Vec<Directory>> {
        repositories::list_repositories(&self.connection, repository_type, package_type.as_ref())
            .await
    }

    /// Look up a single repository by exact key
    pub async fn get_repository(&self, key: &str) -> Result<Directory> {
        repositories::get_repository(&self.connection, key).await
    }

    /// Fetch a directory; its context is loaded immediately
    pub async fn get_directory(&self, repository_key: &str, path: &str) -> Result<Directory> {
        let directory = Directory::new(self.connection.clone(), repository_key, path);
        let url = self
            .connection
            .storage_url(directory.repository_key(), directory.path());
        let context = self.connection.get(&url).await?;

        Ok(directory.with_context(context))
    }

    /// A file handle; nothing is fetched until an attribute is read
    pub fn get_file(&self, repository_key: &str, path: &str) -> File {
        File::new(self.connection.clone(), repository_key, path)
    }

    /// A fresh AQL cursor; call [`FileCursor::find`] before iterating
    pub fn items(&self) -> FileCursor {
        FileCursor::new(self.connection.clone())
    }
}
