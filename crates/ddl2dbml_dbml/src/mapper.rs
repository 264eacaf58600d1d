//! Maps MySQL schema elements to their DBML equivalents: data types,
//! referential actions, index types, and identifier quoting.

/// Maps a raw MySQL data type string, e.g. "VARCHAR(255)" or "INT(11)", to a
/// DBML-compatible type. Parameters are kept only where DBML renders them
/// (varchar and decimal families); integer display widths are dropped.
/// Unknown types fall through lowercased.
pub fn map_data_type(sql_type: &str) -> String {
    let (base, params) = split_type(sql_type);
    let dbml_type = match base.to_ascii_uppercase().as_str() {
        // Integer types. YEAR is a four-digit int in disguise.
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "YEAR" => "int",
        "BIGINT" => "bigint",
        // Decimal types.
        "DECIMAL" | "NUMERIC" => "decimal",
        "FLOAT" => "float",
        "DOUBLE" | "REAL" => "double",
        // String and binary types.
        "CHAR" | "VARCHAR" | "BINARY" | "VARBINARY" | "ENUM" | "SET" => "varchar",
        "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" => "text",
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => "text",
        // Date and time types.
        "DATE" => "date",
        "TIME" => "time",
        "DATETIME" => "datetime",
        "TIMESTAMP" => "timestamp",
        // Other types.
        "BOOLEAN" | "BOOL" => "boolean",
        "JSON" => "json",
        // Spatial types have no DBML equivalent.
        "GEOMETRY" | "POINT" | "LINESTRING" | "POLYGON" | "MULTIPOINT" | "MULTILINESTRING"
        | "MULTIPOLYGON" | "GEOMETRYCOLLECTION" => "text",
        _ => return base.to_lowercase(),
    };
    match params {
        Some(params) if include_params(dbml_type, params) => format!("{dbml_type}({params})"),
        _ => dbml_type.to_string(),
    }
}

/// Splits a raw type string into its base name and the parameter text inside
/// the outermost parentheses. Modifier words like UNSIGNED are not part of
/// the base name.
fn split_type(sql_type: &str) -> (&str, Option<&str>) {
    let sql_type = sql_type.trim();
    let Some(open) = sql_type.find('(') else {
        return (sql_type.split_whitespace().next().unwrap_or(sql_type), None);
    };
    let base = sql_type[..open].trim();
    let params = match sql_type.rfind(')') {
        Some(close) if close > open => Some(sql_type[open + 1..close].trim()),
        _ => None,
    };
    (base, params)
}

/// Returns true if the type parameters should be rendered in DBML. Integer
/// display widths are a MySQL artifact and are dropped.
fn include_params(dbml_type: &str, params: &str) -> bool {
    if dbml_type == "int" && params.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(dbml_type, "varchar" | "char" | "decimal" | "numeric")
}

/// Maps a MySQL index method to a DBML index type, or None where DBML has no
/// equivalent (FULLTEXT, SPATIAL).
pub fn map_index_type(mysql_index_type: &str) -> Option<String> {
    match mysql_index_type.to_ascii_uppercase().as_str() {
        "BTREE" => Some("btree".to_string()),
        "HASH" => Some("hash".to_string()),
        _ => None,
    }
}

/// Maps a referential action to its DBML spelling. Unknown actions are
/// lowercased and passed through.
pub fn map_referential_action(mysql_action: &str) -> String {
    mysql_action.to_lowercase()
}

/// Formats an identifier for DBML output, quoting it when it contains
/// anything beyond letters, digits, and underscores.
pub fn format_identifier(identifier: &str) -> String {
    let plain = !identifier.is_empty()
        && identifier.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        identifier.to_string()
    } else {
        format!("\"{identifier}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_display_widths_are_dropped() {
        assert_eq!(map_data_type("INT(11)"), "int");
        assert_eq!(map_data_type("int"), "int");
        assert_eq!(map_data_type("TINYINT(1)"), "int");
        assert_eq!(map_data_type("BIGINT(20)"), "bigint");
    }

    #[test]
    fn varchar_and_decimal_keep_params() {
        assert_eq!(map_data_type("VARCHAR(255)"), "varchar(255)");
        assert_eq!(map_data_type("char(2)"), "varchar(2)");
        assert_eq!(map_data_type("DECIMAL(10,2)"), "decimal(10,2)");
        assert_eq!(map_data_type("NUMERIC(8, 3)"), "decimal(8, 3)");
    }

    #[test]
    fn text_blob_and_spatial_families() {
        assert_eq!(map_data_type("LONGTEXT"), "text");
        assert_eq!(map_data_type("MEDIUMBLOB"), "text");
        assert_eq!(map_data_type("GEOMETRY"), "text");
        assert_eq!(map_data_type("POINT"), "text");
    }

    #[test]
    fn enums_become_varchar() {
        assert_eq!(map_data_type("ENUM('a','b')"), "varchar('a','b')");
        assert_eq!(map_data_type("SET('x','y')"), "varchar('x','y')");
    }

    #[test]
    fn modifiers_do_not_confuse_the_base_type() {
        assert_eq!(map_data_type("INT UNSIGNED"), "int");
        assert_eq!(map_data_type("INT(10) UNSIGNED"), "int");
        assert_eq!(map_data_type("DECIMAL(10,2) UNSIGNED"), "decimal(10,2)");
    }

    #[test]
    fn unknown_types_fall_through_lowercased() {
        assert_eq!(map_data_type("CUSTOMTYPE"), "customtype");
    }

    #[test]
    fn index_types() {
        assert_eq!(map_index_type("BTREE").as_deref(), Some("btree"));
        assert_eq!(map_index_type("hash").as_deref(), Some("hash"));
        assert_eq!(map_index_type("FULLTEXT"), None);
        assert_eq!(map_index_type("SPATIAL"), None);
    }

    #[test]
    fn referential_actions() {
        assert_eq!(map_referential_action("CASCADE"), "cascade");
        assert_eq!(map_referential_action("SET NULL"), "set null");
        assert_eq!(map_referential_action("NO ACTION"), "no action");
    }

    #[test]
    fn identifier_quoting() {
        assert_eq!(format_identifier("users"), "users");
        assert_eq!(format_identifier("user_accounts"), "user_accounts");
        assert_eq!(format_identifier("my table"), "\"my table\"");
        assert_eq!(format_identifier("order-items"), "\"order-items\"");
    }
}
