use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// The column name, with any quoting stripped.
    pub name: String,
    /// The raw data type string as written, e.g. "VARCHAR(255)". Mapping to
    /// target type names is the DBML layer's concern.
    pub data_type: String,
    /// Whether the column allows NULLs. Defaults to true; forced to false for
    /// primary key columns.
    pub nullable: bool,
    /// Whether the column is (part of) the primary key, from either an inline
    /// constraint or an out-of-line PRIMARY KEY definition.
    pub primary_key: bool,
    pub auto_increment: bool,
    /// Set by an inline UNIQUE constraint. Out-of-line UNIQUE INDEX/KEY
    /// definitions become Index entries instead.
    pub unique: bool,
    /// The raw, unevaluated DEFAULT value text: a quoted literal keeps its
    /// quotes, and function calls keep their parentheses. Classification is
    /// deferred to the consumer.
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

impl Column {
    /// Creates a column of the given name and type, nullable and otherwise
    /// unconstrained. Constraints are applied by the parser as it sees them.
    pub fn new(name: String, data_type: String) -> Self {
        Self {
            name,
            data_type,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default_value: None,
            comment: None,
        }
    }
}

/// An out-of-line index definition. Order of `columns` is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: Option<String>,
    /// The indexed column names, in index order. Never empty.
    pub columns: Vec<String>,
    pub unique: bool,
    /// True only for a synthesized primary-key index; implies unique.
    pub primary: bool,
    /// The index method, e.g. BTREE or HASH, if declared with USING.
    pub index_type: Option<String>,
}

/// A foreign key constraint. References the target table by name only; the
/// parser never resolves it to a live table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: Option<String>,
    /// The referencing columns. Never empty, and always the same length as
    /// `referenced_columns`.
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    /// The raw referential action, e.g. "CASCADE" or "SET NULL".
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

/// A parsed CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// The table's columns, in statement order. Never empty.
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
    pub comment: Option<String>,
    pub engine: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    /// All table options as written, keyed by uppercased option name.
    /// Unrecognized options are preserved verbatim so downstream consumers
    /// can decide whether to surface them.
    pub options: BTreeMap<String, String>,
}

/// The complete parsed representation of an input document: all successfully
/// parsed tables, in statement order. Duplicate table names are passed
/// through unchanged; deduplication is a downstream concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub name: Option<String>,
}
