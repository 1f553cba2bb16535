//! Artifactory Repositories
//!
//! Functions for listing repositories and looking one up by key.

use super::connection::Connection;
use crate::error::{Error, Result};
use crate::resource::{Directory, PackageType, RepositoryMetadata, RepositoryType};
use serde::Deserialize;
use serde_json::Value;

/// One record of the repositories listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub repository_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub package_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RepositoryRecord {
    /// Build a repository-root directory from this record
    pub fn into_repository(self, connection: &Connection) -> Result<Directory> {
        let repository_type = self
            .repository_type
            .parse::<RepositoryType>()
            .map_err(Error::unexpected)?;

        let metadata = RepositoryMetadata {
            repository_type,
            package_type: PackageType::parse(&self.package_type),
            url: self.url,
            description: self.description,
        };

        Ok(Directory::repository(connection.clone(), self.key, metadata))
    }
}

/// List repositories, optionally filtered by repository and package type
pub async fn list_repositories(
    connection: &Connection,
    repository_type: Option<RepositoryType>,
    package_type: Option<&PackageType>,
) -> Result<Vec<Directory>> {
    let repositories_url = connection.repositories_url();
    let mut url = url::Url::parse(&repositories_url).map_err(|e| {
        Error::unexpected(format!("invalid repositories URL {}: {}", repositories_url, e))
    })?;
    {
        let mut query = url.query_pairs_mut();
        if let Some(repository_type) = repository_type {
            query.append_pair("type", repository_type.as_str());
        }
        if let Some(package_type) = package_type {
            query.append_pair("packageType", package_type.as_str());
        }
    }
    // An empty `?` would otherwise be left behind
    if url.query() == Some("") {
        url.set_query(None);
    }

    let response = connection.get(url.as_str()).await?;
    let records = parse_records(response)?;

    records
        .into_iter()
        .map(|record| record.into_repository(connection))
        .collect()
}

/// Find the single repository whose key matches exactly
pub async fn get_repository(connection: &Connection, key: &str) -> Result<Directory> {
    let response = connection.get(&connection.repositories_url()).await?;

    let mut matches: Vec<RepositoryRecord> = parse_records(response)?
        .into_iter()
        .filter(|record| record.key == key)
        .collect();

    match matches.len() {
        0 => Err(Error::RepositoryNotFound {
            key: key.to_string(),
        }),
        1 => matches.remove(0).into_repository(connection),
        count => Err(Error::AmbiguousRepository {
            key: key.to_string(),
            count,
        }),
    }
}

fn parse_records(response: Value) -> Result<Vec<RepositoryRecord>> {
    if !response.is_array() {
        return Err(Error::unexpected("repositories listing is not a JSON array"));
    }
    Ok(serde_json::from_value(response)?)
}
