//! Renders a parsed Schema as DBML text. All DBML syntax, type mapping, and
//! escaping lives here; the parser hands over raw values untouched.

use itertools::Itertools;

use ddl2dbml_parser::schema::{Column, ForeignKey, Index, Schema, Table};

use crate::mapper;

/// Generates the complete DBML document for a schema: an optional Project
/// block, one Table block per table in statement order, then the Ref lines
/// for all foreign keys.
pub fn generate(schema: &Schema) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &schema.name {
        parts.push(project_block(name));
    }
    for table in &schema.tables {
        parts.push(table_block(table));
    }
    let refs: Vec<String> = schema
        .tables
        .iter()
        .flat_map(|table| table.foreign_keys.iter().map(|fk| ref_line(&table.name, fk)))
        .collect();
    if !refs.is_empty() {
        parts.push(refs.join("\n"));
    }
    parts.join("\n\n")
}

fn project_block(name: &str) -> String {
    format!(
        "Project {} {{\n  database_type: 'MySQL'\n  Note: 'Generated from MySQL CREATE TABLE statements'\n}}",
        mapper::format_identifier(name)
    )
}

fn table_block(table: &Table) -> String {
    let mut lines = vec![format!("Table {} {{", mapper::format_identifier(&table.name))];
    for column in &table.columns {
        lines.push(format!("  {}", column_line(column)));
    }
    if !table.indexes.is_empty() {
        lines.push(String::new());
        lines.push("  indexes {".to_string());
        for index in &table.indexes {
            lines.push(format!("    {}", index_line(index)));
        }
        lines.push("  }".to_string());
    }
    if let Some(comment) = &table.comment {
        lines.push(String::new());
        lines.push(format!("  Note: '{}'", escape(comment)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn column_line(column: &Column) -> String {
    let mut parts = vec![
        mapper::format_identifier(&column.name),
        mapper::map_data_type(&column.data_type),
    ];
    let settings = column_settings(column);
    if !settings.is_empty() {
        parts.push(format!("[{}]", settings.iter().join(", ")));
    }
    parts.join(" ")
}

fn column_settings(column: &Column) -> Vec<String> {
    let mut settings = Vec::new();
    if column.primary_key {
        settings.push("pk".to_string());
    }
    if !column.nullable {
        settings.push("not null".to_string());
    }
    if column.unique && !column.primary_key {
        settings.push("unique".to_string());
    }
    if column.auto_increment {
        settings.push("increment".to_string());
    }
    if let Some(default) = &column.default_value {
        settings.push(format!("default: {}", format_default_value(default)));
    }
    if let Some(comment) = &column.comment {
        settings.push(format!("note: '{}'", escape(comment)));
    }
    settings
}

fn index_line(index: &Index) -> String {
    let columns = if index.columns.len() == 1 {
        index.columns[0].clone()
    } else {
        format!("({})", index.columns.iter().join(", "))
    };
    let mut settings = Vec::new();
    if index.primary {
        settings.push("pk".to_string());
    } else if index.unique {
        settings.push("unique".to_string());
    }
    if let Some(name) = &index.name {
        settings.push(format!("name: '{}'", escape(name)));
    }
    if let Some(index_type) = index.index_type.as_deref().and_then(|t| mapper::map_index_type(t)) {
        settings.push(format!("type: {index_type}"));
    }
    if settings.is_empty() {
        columns
    } else {
        format!("{columns} [{}]", settings.iter().join(", "))
    }
}

/// Renders one foreign key as a many-to-one Ref line, with referential
/// actions as settings.
fn ref_line(table: &str, fk: &ForeignKey) -> String {
    let (source, target) = if fk.columns.len() == 1 {
        (
            format!("{table}.{}", fk.columns[0]),
            format!("{}.{}", fk.referenced_table, fk.referenced_columns[0]),
        )
    } else {
        (
            format!("{table}.({})", fk.columns.iter().join(", ")),
            format!("{}.({})", fk.referenced_table, fk.referenced_columns.iter().join(", ")),
        )
    };
    let mut line = format!("Ref: {source} > {target}");
    let mut settings = Vec::new();
    if let Some(action) = &fk.on_delete {
        settings.push(format!("delete: {}", mapper::map_referential_action(action)));
    }
    if let Some(action) = &fk.on_update {
        settings.push(format!("update: {}", mapper::map_referential_action(action)));
    }
    if !settings.is_empty() {
        line.push_str(&format!(" [{}]", settings.iter().join(", ")));
    }
    line
}

/// Classifies a raw DEFAULT value for DBML: keyword literals are lowered,
/// quoted strings kept, function calls wrapped in backticks, numerics kept,
/// and anything else quoted.
fn format_default_value(value: &str) -> String {
    let upper = value.to_ascii_uppercase();
    if matches!(upper.as_str(), "NULL" | "TRUE" | "FALSE") {
        return value.to_ascii_lowercase();
    }
    if value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2 {
        return value.to_string();
    }
    if is_function_call(&upper) {
        return format!("`{value}`");
    }
    if value.parse::<f64>().is_ok() {
        return value.to_string();
    }
    format!("'{value}'")
}

/// Known default-value expressions that must be rendered as DBML backtick
/// expressions rather than literals.
fn is_function_call(upper: &str) -> bool {
    const FUNCTIONS: [&str; 8] = [
        "NOW()",
        "CURRENT_TIMESTAMP",
        "CURRENT_DATE",
        "CURRENT_TIME",
        "UUID()",
        "RAND()",
        "USER()",
        "CONNECTION_ID()",
    ];
    FUNCTIONS.iter().any(|f| upper.contains(f))
}

/// Escapes backslashes and single quotes for a DBML single-quoted string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
