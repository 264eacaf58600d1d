//! Screens raw SQL input before it reaches the parser. Rejections here are
//! whole-input failures; per-statement parse errors are handled downstream.

use once_cell::sync::Lazy;
use regex::Regex;

use ddl2dbml_common::{errinput, DdlResult};

static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bCREATE\s+(TEMPORARY\s+)?TABLE\b").expect("invalid regex")
});

/// Statement sequences that have no business in a schema dump. A match is
/// treated as unsafe input rather than something to silently skip.
static SUSPICIOUS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i);\s*DROP\s+TABLE",
        r"(?i);\s*DELETE\s+FROM",
        r"(?i);\s*UPDATE\s+.*\s+SET",
        r"(?i);\s*INSERT\s+INTO",
        r"(?i)UNION\s+SELECT",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid regex"))
    .collect()
});

/// Validates raw SQL input: non-empty, within the size limit, contains at
/// least one CREATE TABLE statement, free of suspicious statement sequences,
/// and balanced brackets outside string literals.
pub fn check_sql_input(sql: &str, max_bytes: usize) -> DdlResult<()> {
    if sql.trim().is_empty() {
        return errinput!("input is empty");
    }
    if sql.len() > max_bytes {
        return errinput!("input is too large ({} bytes, limit is {max_bytes})", sql.len());
    }
    if !CREATE_TABLE.is_match(sql) {
        return errinput!("no CREATE TABLE statements found");
    }
    if let Some(pattern) = SUSPICIOUS.iter().find(|pattern| pattern.is_match(sql)) {
        return errinput!("unsafe SQL pattern detected: {}", pattern.as_str());
    }
    if !has_balanced_brackets(sql) {
        return errinput!("unbalanced parentheses, brackets, or braces");
    }
    Ok(())
}

/// Checks that `()`, `[]`, and `{}` nest properly, ignoring brackets inside
/// single-quoted, double-quoted, or backtick-quoted literals.
fn has_balanced_brackets(sql: &str) -> bool {
    let mut stack = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = sql.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => match c {
                '\\' => {
                    chars.next();
                }
                _ if c == q => quote = None,
                _ => {}
            },
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' => stack.push(c),
                ')' => {
                    if stack.pop() != Some('(') {
                        return false;
                    }
                }
                ']' => {
                    if stack.pop() != Some('[') {
                        return false;
                    }
                }
                '}' => {
                    if stack.pop() != Some('{') {
                        return false;
                    }
                }
                _ => {}
            },
        }
    }
    stack.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 10 * 1024 * 1024;

    #[test]
    fn accepts_plain_create_table() {
        assert!(check_sql_input("CREATE TABLE t (id INT);", LIMIT).is_ok());
        assert!(check_sql_input("create temporary table t (id INT);", LIMIT).is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        let err = check_sql_input("   \n\t ", LIMIT).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_input_without_create_table() {
        let err = check_sql_input("SELECT * FROM t;", LIMIT).unwrap_err();
        assert!(err.to_string().contains("no CREATE TABLE"));
    }

    #[test]
    fn rejects_oversized_input() {
        let err = check_sql_input("CREATE TABLE t (id INT);", 10).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn rejects_suspicious_sequences() {
        let err =
            check_sql_input("CREATE TABLE t (id INT); DROP TABLE users;", LIMIT).unwrap_err();
        assert!(err.to_string().contains("unsafe SQL pattern"));
        assert!(check_sql_input("CREATE TABLE t (id INT) UNION SELECT 1", LIMIT).is_err());
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        assert!(check_sql_input("CREATE TABLE t (id INT;", LIMIT).is_err());
        assert!(check_sql_input("CREATE TABLE t id INT);", LIMIT).is_err());
        assert!(check_sql_input("CREATE TABLE t (x INT[)]", LIMIT).is_err());
    }

    #[test]
    fn brackets_inside_strings_are_ignored() {
        assert!(check_sql_input(
            "CREATE TABLE t (x VARCHAR(10) DEFAULT '(((', y INT);",
            LIMIT
        )
        .is_ok());
        assert!(check_sql_input("CREATE TABLE `weird)name` (id INT);", LIMIT).is_ok());
    }

    #[test]
    fn comments_are_not_flagged() {
        assert!(check_sql_input(
            "-- schema dump\nCREATE TABLE t (id INT); /* trailing */",
            LIMIT
        )
        .is_ok());
    }
}
