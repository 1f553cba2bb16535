//! Files and their lazily resolved attributes
//!
//! A [`File`] starts out knowing only its repository key and path. Attributes
//! come from two independent endpoints: the storage API ("info") and the same
//! API with `?stats` ("statistics"). Each group is fetched at most once and the
//! results are kept in separate slots, so resolving one group never discards
//! the other. Files built from AQL rows also carry the row's fields as
//! pre-resolved attributes.

use super::parent::resolve_parent;
use super::{delete_item, normalize_path, Directory};
use crate::artifactory::Connection;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Attributes served by the storage (file info) endpoint
pub const INFO_ATTRIBUTES: &[&str] = &[
    "created",
    "createdBy",
    "lastModified",
    "modifiedBy",
    "lastUpdated",
    "downloadUri",
    "mimeType",
    "size",
    "checksums",
    "originalChecksums",
    "uri",
];

/// Attributes served by the file statistics endpoint
pub const STATISTICS_ATTRIBUTES: &[&str] = &[
    "downloadCount",
    "lastDownloaded",
    "lastDownloadedBy",
    "remoteDownloadCount",
    "remoteLastDownloaded",
];

/// Which endpoint serves an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeGroup {
    Info,
    Statistics,
}

impl AttributeGroup {
    pub fn of(name: &str) -> Option<Self> {
        if INFO_ATTRIBUTES.contains(&name) {
            Some(AttributeGroup::Info)
        } else if STATISTICS_ATTRIBUTES.contains(&name) {
            Some(AttributeGroup::Statistics)
        } else {
            None
        }
    }
}

/// How an attribute lookup would be satisfied given the current cache
#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    /// Already known
    Resolved(&'a Value),
    /// Needs the given group fetched first
    Fetch(AttributeGroup),
    /// Its group was fetched but the server did not return it
    Missing,
    /// Not an attribute files have
    Unknown,
}

/// File checksums
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Checksums {
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// A file in a repository
#[derive(Debug, Clone)]
pub struct File {
    connection: Connection,
    repository_key: String,
    path: String,
    preset: Map<String, Value>,
    info: Option<Map<String, Value>>,
    statistics: Option<Map<String, Value>>,
}

impl File {
    pub fn new(connection: Connection, repository_key: impl Into<String>, path: &str) -> Self {
        Self {
            connection,
            repository_key: repository_key.into(),
            path: normalize_path(path),
            preset: Map::new(),
            info: None,
            statistics: None,
        }
    }

    /// Attach attributes that are already known, e.g. from a search result row
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.preset.extend(attributes);
        self
    }

    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name without its directory
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether the given group has been fetched
    pub fn is_resolved(&self, group: AttributeGroup) -> bool {
        match group {
            AttributeGroup::Info => self.info.is_some(),
            AttributeGroup::Statistics => self.statistics.is_some(),
        }
    }

    /// Decide how `name` would be resolved, without touching the network
    pub fn resolution(&self, name: &str) -> Resolution<'_> {
        if let Some(value) = self.lookup(name) {
            return Resolution::Resolved(value);
        }

        match AttributeGroup::of(name) {
            Some(group) if !self.is_resolved(group) => Resolution::Fetch(group),
            Some(_) => Resolution::Missing,
            None => Resolution::Unknown,
        }
    }

    /// Look up an attribute, fetching its group on first use
    pub async fn attribute(&mut self, name: &str) -> Result<&Value> {
        let fetch = match self.resolution(name) {
            Resolution::Resolved(_) => None,
            Resolution::Fetch(group) => Some(group),
            Resolution::Missing => return Err(self.missing(name)),
            Resolution::Unknown => {
                return Err(Error::UnknownAttribute {
                    name: name.to_string(),
                })
            }
        };

        match fetch {
            Some(AttributeGroup::Info) => self.resolve_info().await?,
            Some(AttributeGroup::Statistics) => self.resolve_statistics().await?,
            None => {}
        }

        let missing = self.missing(name);
        self.lookup(name).ok_or(missing)
    }

    /// Query the file info API (uncached)
    pub async fn file_info(&self) -> Result<Value> {
        tracing::debug!(
            "querying file info repo={}, path={}",
            self.repository_key,
            self.path
        );

        let url = self.connection.storage_url(&self.repository_key, &self.path);
        self.connection.get(&url).await
    }

    /// Query the file statistics API (uncached)
    /// Virtual repositories answer 404 here; that is reported as
    /// [`Error::StatisticsUnsupported`] with the original error as its source
    pub async fn file_statistics(&self) -> Result<Value> {
        tracing::debug!(
            "querying file statistics repo={}, path={}",
            self.repository_key,
            self.path
        );

        let url = format!(
            "{}?stats",
            self.connection.storage_url(&self.repository_key, &self.path)
        );

        match self.connection.get_with_timeout(&url).await {
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(Error::StatisticsUnsupported {
                    repository_key: self.repository_key.clone(),
                    path: self.path.clone(),
                    source: Box::new(e),
                })
            }
            other => other,
        }
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub async fn created(&mut self) -> Result<String> {
        self.string_attribute("created").await
    }

    pub async fn created_by(&mut self) -> Result<String> {
        self.string_attribute("createdBy").await
    }

    pub async fn last_modified(&mut self) -> Result<String> {
        self.string_attribute("lastModified").await
    }

    pub async fn mime_type(&mut self) -> Result<String> {
        self.string_attribute("mimeType").await
    }

    pub async fn download_uri(&mut self) -> Result<String> {
        self.string_attribute("downloadUri").await
    }

    /// Size in bytes; the storage API reports it as a string, AQL as a number
    pub async fn size(&mut self) -> Result<u64> {
        let value = self.attribute("size").await?;
        value_as_u64(value).ok_or_else(|| Error::unexpected(format!("size is not a number: {}", value)))
    }

    pub async fn checksums(&mut self) -> Result<Checksums> {
        let value = self.attribute("checksums").await?.clone();
        Ok(serde_json::from_value(value)?)
    }

    pub async fn download_count(&mut self) -> Result<u64> {
        let value = self.attribute("downloadCount").await?;
        value_as_u64(value)
            .ok_or_else(|| Error::unexpected(format!("downloadCount is not a number: {}", value)))
    }

    /// Last download time in epoch milliseconds
    pub async fn last_downloaded(&mut self) -> Result<i64> {
        let value = self.attribute("lastDownloaded").await?;
        value
            .as_i64()
            .ok_or_else(|| Error::unexpected(format!("lastDownloaded is not a number: {}", value)))
    }

    pub async fn last_downloaded_by(&mut self) -> Result<String> {
        self.string_attribute("lastDownloadedBy").await
    }

    /// Creation time, parsed from the `created` attribute
    pub async fn date_created(&mut self) -> Result<DateTime<Utc>> {
        let created = self.created().await?;
        parse_created(&created)
    }

    /// Last download time, from the `lastDownloaded` attribute
    pub async fn date_downloaded(&mut self) -> Result<DateTime<Utc>> {
        let millis = self.last_downloaded().await?;
        parse_downloaded(millis)
    }

    /// Delete this file; `Ok(false)` when the server refuses
    pub async fn delete(&self) -> Result<bool> {
        delete_item(&self.connection, &self.repository_key, &self.path, "file").await
    }

    /// Enclosing directory, or the owning repository for root-level files
    pub async fn parent(&self) -> Result<Directory> {
        resolve_parent(&self.connection, &self.repository_key, &self.path).await
    }

    // =========================================================================
    // Cache internals
    // =========================================================================

    fn lookup(&self, name: &str) -> Option<&Value> {
        [self.info.as_ref(), self.statistics.as_ref(), Some(&self.preset)]
            .into_iter()
            .flatten()
            .find_map(|attributes| attributes.get(name))
    }

    async fn resolve_info(&mut self) -> Result<()> {
        if self.info.is_none() {
            let info = into_attributes(self.file_info().await?)?;
            self.info = Some(info);
        }
        Ok(())
    }

    async fn resolve_statistics(&mut self) -> Result<()> {
        if self.statistics.is_none() {
            let statistics = into_attributes(self.file_statistics().await?)?;
            self.statistics = Some(statistics);
        }
        Ok(())
    }

    async fn string_attribute(&mut self, name: &str) -> Result<String> {
        let value = self.attribute(name).await?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| Error::unexpected(format!("{} is not a string: {}", name, value)))
    }

    fn missing(&self, name: &str) -> Error {
        Error::MissingAttribute {
            name: name.to_string(),
            path: format!("{}/{}", self.repository_key, self.path),
        }
    }
}

fn into_attributes(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::unexpected(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an ISO-8601 timestamp such as `2018-07-06T20:57:45.614Z`
pub(crate) fn parse_created(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Convert epoch milliseconds to a UTC timestamp
pub(crate) fn parse_downloaded(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| Error::InvalidTimestamp {
        value: millis.to_string(),
        reason: "out of range".to_string(),
    })
}
