//! AQL text serialization
//!
//! AQL criteria are JSON, written the way Artifactory's documentation writes
//! them: `", "` between items and `": "` between keys and values.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// serde_json formatter producing `{"a": 1, "b": [1, 2]}`
#[derive(Debug, Default, Clone, Copy)]
pub struct AqlFormatter;

impl Formatter for AqlFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Serialize a value as AQL-style JSON
pub fn to_aql_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AqlFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| Error::unexpected(e.to_string()))
}

/// Render an `items.find(...)` call
pub fn find_clause<T: Serialize + ?Sized>(predicate: &T) -> Result<String> {
    Ok(format!("items.find({})", to_aql_json(predicate)?))
}

/// Render an `.include(...)` clause; empty when there are no fields
pub fn include_clause(fields: &[String]) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = fields
        .iter()
        .map(|field| serde_json::Value::from(field.as_str()).to_string())
        .collect();

    format!(".include({})", quoted.join(", "))
}
