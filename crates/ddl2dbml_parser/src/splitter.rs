use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a CREATE [TEMPORARY] TABLE statement head, case-insensitively and
/// whitespace-tolerantly.
static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*CREATE\s+(TEMPORARY\s+)?TABLE\b").expect("static regex must compile")
});

/// Splits a SQL document into individual statements on unquoted `;`
/// boundaries. Quote and backslash-escape handling matches the lexer, so a
/// `;` inside a string literal never splits a statement. A trailing fragment
/// without a terminating `;` is included if non-empty after trimming.
pub fn split_statements(document: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    let mut chars = document.chars();
    while let Some(c) = chars.next() {
        current.push(c);
        match (c, quote) {
            ('\\', Some(_)) => {
                // The escaped character can't close the string.
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ('\'' | '"' | '`', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (';', None) => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(statement.to_string());
                }
                current.clear();
            }
            _ => {}
        }
    }
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    statements
}

/// Returns true if the statement begins with CREATE [TEMPORARY] TABLE.
pub fn is_create_table(statement: &str) -> bool {
    CREATE_TABLE.is_match(statement)
}

/// Splits a document and keeps only the CREATE TABLE statements. Other
/// statements are discarded, not errored; converting a dump that also carries
/// INSERTs or SET statements should just skip them.
pub fn create_table_statements(document: &str) -> Vec<String> {
    split_statements(document).into_iter().filter(|s| is_create_table(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons() {
        let statements = split_statements("CREATE TABLE a (x INT); CREATE TABLE b (y INT);");
        assert_eq!(
            statements,
            vec!["CREATE TABLE a (x INT);", "CREATE TABLE b (y INT);"]
        );
    }

    #[test]
    fn semicolon_inside_string_does_not_split() {
        let statements =
            split_statements("CREATE TABLE a (x VARCHAR(10) DEFAULT 'a;b'); CREATE TABLE b (y INT);");
        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("'a;b'"));
    }

    #[test]
    fn escaped_quote_inside_string() {
        let statements = split_statements(r"CREATE TABLE a (x TEXT DEFAULT 'it\'s;fine'); SELECT 1;");
        assert_eq!(statements.len(), 2);
        assert!(statements[0].ends_with(r"'it\'s;fine');"));
    }

    #[test]
    fn trailing_statement_without_semicolon() {
        let statements = split_statements("CREATE TABLE a (x INT);\nCREATE TABLE b (y INT)");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[1], "CREATE TABLE b (y INT)");
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(split_statements(" ; ;\n;").len(), 0);
        assert_eq!(split_statements("").len(), 0);
    }

    #[test]
    fn create_table_filter() {
        assert!(is_create_table("CREATE TABLE t (x INT)"));
        assert!(is_create_table("  create\ntemporary\ttable t (x INT)"));
        assert!(!is_create_table("CREATE INDEX idx ON t (x)"));
        assert!(!is_create_table("INSERT INTO t VALUES (1)"));

        let document = "SET NAMES utf8;\nCREATE TABLE a (x INT);\nINSERT INTO a VALUES (1);";
        let statements = create_table_statements(document);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("CREATE TABLE a"));
    }
}
