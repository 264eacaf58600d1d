//! Parses MySQL CREATE TABLE statements into a structured schema model.
//!
//! The pipeline is: split the document into statements on unquoted `;`
//! boundaries, keep the CREATE TABLE statements, tokenize each one, strip
//! comments, and run the token stream through the recursive-descent DDL
//! parser. Each statement is independent of every other, so errors are
//! collected per statement and never abort the batch.

pub mod lexer;
pub mod schema;
pub mod splitter;

mod parser;

pub use parser::{ParseError, Parser};

use ddl2dbml_common::DdlResult;
use schema::{Schema, Table};

/// Parses all CREATE TABLE statements in a SQL document, preserving statement
/// order. Returns the assembled schema together with one ParseError per
/// statement that failed, so a caller can report "N of M statements parsed"
/// without treating the whole batch as a failure. A document containing no
/// CREATE TABLE statement yields an empty schema and no errors.
pub fn parse_document(sql: &str) -> (Schema, Vec<ParseError>) {
    let mut tables = Vec::new();
    let mut errors = Vec::new();
    for statement in splitter::create_table_statements(sql) {
        let tokens = lexer::strip_comments(lexer::tokenize(&statement));
        match Parser::new(tokens).parse_create_table() {
            Ok(table) => {
                tracing::debug!(table = %table.name, "parsed CREATE TABLE statement");
                tables.push(table);
            }
            Err(err) => {
                tracing::debug!(%err, "skipping unparseable statement");
                errors.push(err);
            }
        }
    }
    (Schema { tables, name: None }, errors)
}

/// Parses a single CREATE TABLE statement.
pub fn parse_statement(sql: &str) -> DdlResult<Table> {
    let tokens = lexer::strip_comments(lexer::tokenize(sql));
    Ok(Parser::new(tokens).parse_create_table()?)
}
