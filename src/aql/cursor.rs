//! File cursor over AQL `items.find` queries

use super::serialize::{find_clause, include_clause};
use crate::artifactory::Connection;
use crate::error::{Error, Result};
use crate::resource::File;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every result row must carry to be turned back into a [`File`]
pub const REQUIRED_FIELDS: &[&str] = &["repo", "path", "name"];

/// `range` summary of an AQL reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AqlRange {
    #[serde(default)]
    pub start_pos: u64,
    #[serde(default)]
    pub end_pos: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AqlResponse {
    #[serde(default)]
    results: Vec<Map<String, Value>>,
    #[serde(default)]
    range: AqlRange,
}

/// Builder and lazy iterator for an AQL file search.
///
/// The query runs once, on the first call to [`FileCursor::next`]; every row of
/// that single reply is then handed out as a [`File`]. Multi-page results are
/// not followed.
#[derive(Debug)]
pub struct FileCursor {
    connection: Connection,
    find: Option<String>,
    include: Vec<String>,
    results: Option<Vec<Map<String, Value>>>,
    range: Option<AqlRange>,
    index: usize,
}

impl FileCursor {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            find: None,
            include: Vec::new(),
            results: None,
            range: None,
            index: 0,
        }
    }

    /// Set the search criteria, e.g. `{"repo": "docker", "name": {"$eq": "manifest.json"}}`.
    /// Any previously fetched results are dropped.
    pub fn find<T: Serialize + ?Sized>(mut self, predicate: &T) -> Result<Self> {
        self.find = Some(find_clause(predicate)?);
        self.results = None;
        self.range = None;
        self.index = 0;
        Ok(self)
    }

    /// Project the given fields. `repo`, `path` and `name` are always added.
    pub fn include<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        for field in fields {
            self.push_field(field.as_ref());
        }
        for field in REQUIRED_FIELDS {
            self.push_field(field);
        }
        self
    }

    /// Full AQL text, or `None` before [`FileCursor::find`]
    pub fn query_text(&self) -> Option<String> {
        let find = self.find.as_ref()?;
        Some(format!("{}{}", find, include_clause(&self.include)))
    }

    /// `range` of the executed query, once it has run
    pub fn range(&self) -> Option<&AqlRange> {
        self.range.as_ref()
    }

    /// Advance to the next file, running the query on first use
    pub async fn next(&mut self) -> Result<Option<File>> {
        if self.results.is_none() {
            self.run_query().await?;
        }

        let row = self
            .results
            .as_ref()
            .and_then(|results| results.get(self.index))
            .cloned();

        match row {
            Some(row) => {
                self.index += 1;
                file_from_row(&self.connection, row).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Consume the cursor as a stream of files
    pub fn into_stream(self) -> impl Stream<Item = Result<File>> {
        futures::stream::try_unfold(self, |mut cursor| async move {
            let file = cursor.next().await?;
            Ok::<_, Error>(file.map(|file| (file, cursor)))
        })
    }

    fn push_field(&mut self, field: &str) {
        let field = field.trim();
        if !field.is_empty() && !self.include.iter().any(|f| f == field) {
            self.include.push(field.to_string());
        }
    }

    async fn run_query(&mut self) -> Result<()> {
        let query = self.query_text().ok_or(Error::EmptyQuery)?;

        let response = self
            .connection
            .post_text(&self.connection.aql_url(), query)
            .await?;
        let response: AqlResponse = serde_json::from_value(response)?;

        tracing::debug!(
            "range start_pos={} end_pos={} total={}",
            response.range.start_pos,
            response.range.end_pos,
            response.range.total
        );

        self.results = Some(response.results);
        self.range = Some(response.range);
        self.index = 0;
        Ok(())
    }
}

/// Build a file from a result row: `path` and `name` form the file path,
/// every other field becomes a pre-resolved attribute
fn file_from_row(connection: &Connection, mut row: Map<String, Value>) -> Result<File> {
    let repo = take_string(&mut row, "repo", false)?;
    let name = take_string(&mut row, "name", true)?;
    let directory = take_string(&mut row, "path", true)?;

    let path = match directory.as_str() {
        "" | "." => name,
        directory => format!("{}/{}", directory, name),
    };

    Ok(File::new(connection.clone(), repo, &path).with_attributes(row))
}

fn take_string(row: &mut Map<String, Value>, field: &str, remove: bool) -> Result<String> {
    let value = if remove {
        row.remove(field)
    } else {
        row.get(field).cloned()
    };

    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(Error::unexpected(format!(
            "AQL result row has no string field {}",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::resource::{AttributeGroup, Resolution};
    use serde_json::json;

    fn connection() -> Connection {
        Connection::new(&ClientConfig::new("http://rt.invalid/artifactory", "key")).unwrap()
    }

    fn query() -> Value {
        json!({
            "repo": "docker-dev-local",
            "name": {"$eq": "manifest.json"},
            "stat.downloaded": {"$before": "4y"}
        })
    }

    #[test]
    fn test_find_renders_items_find() {
        let cursor = FileCursor::new(connection()).find(&query()).unwrap();
        assert_eq!(
            cursor.query_text().unwrap(),
            r#"items.find({"repo": "docker-dev-local", "name": {"$eq": "manifest.json"}, "stat.downloaded": {"$before": "4y"}})"#
        );
    }

    #[test]
    fn test_include_with_required_fields_only() {
        let cursor = FileCursor::new(connection())
            .find(&query())
            .unwrap()
            .include(&["repo", "path", "name"]);

        assert!(cursor
            .query_text()
            .unwrap()
            .ends_with(r#").include("repo", "path", "name")"#));
    }

    #[test]
    fn test_include_appends_missing_required_fields() {
        let cursor = FileCursor::new(connection())
            .find(&json!({"repo": "docker"}))
            .unwrap()
            .include(&["size", " created ", "", "path"]);

        assert_eq!(
            cursor.query_text().unwrap(),
            r#"items.find({"repo": "docker"}).include("size", "created", "path", "repo", "name")"#
        );
    }

    #[test]
    fn test_query_text_none_before_find() {
        let cursor = FileCursor::new(connection()).include(&["size"]);
        assert!(cursor.query_text().is_none());
    }

    #[test]
    fn test_next_without_find_is_empty_query() {
        let mut cursor = FileCursor::new(connection());
        let result = tokio_test::block_on(cursor.next());
        assert!(matches!(result, Err(Error::EmptyQuery)));
    }

    #[test]
    fn test_file_from_row_joins_path_and_name() {
        let row = json!({
            "repo": "docker",
            "path": "product_name/version1/foo",
            "name": "manifest.json",
            "size": 1576,
            "type": "file"
        });
        let Value::Object(row) = row else { unreachable!() };

        let file = file_from_row(&connection(), row).unwrap();

        assert_eq!(file.repository_key(), "docker");
        assert_eq!(file.path(), "product_name/version1/foo/manifest.json");
        assert_eq!(file.resolution("size"), Resolution::Resolved(&json!(1576)));
        assert_eq!(file.resolution("type"), Resolution::Resolved(&json!("file")));
        assert!(!file.is_resolved(AttributeGroup::Info));
    }

    #[test]
    fn test_file_from_row_at_repository_root() {
        let Value::Object(row) = json!({"repo": "generic", "path": ".", "name": "a.txt"}) else {
            unreachable!()
        };

        let file = file_from_row(&connection(), row).unwrap();
        assert_eq!(file.path(), "a.txt");
    }

    #[test]
    fn test_file_from_row_requires_repo() {
        let Value::Object(row) = json!({"path": "a", "name": "b.txt"}) else {
            unreachable!()
        };

        assert!(matches!(
            file_from_row(&connection(), row),
            Err(Error::UnexpectedResponse { .. })
        ));
    }
}
