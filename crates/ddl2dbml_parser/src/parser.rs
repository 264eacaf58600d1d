use std::collections::BTreeMap;

use ddl2dbml_common::DdlError;

use crate::lexer::{Token, TokenKind};
use crate::schema::{Column, ForeignKey, Index, Table};

/// A grammar mismatch in one CREATE TABLE statement. Carries the byte offset
/// of the offending token, what the grammar expected there, and what was
/// actually found. Failing one statement never aborts the batch; the caller
/// records the error and moves on to the next statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub offset: usize,
    pub expected: String,
    pub found: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "at byte {}: expected {}, found {}",
            self.offset, self.expected, self.found
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for DdlError {
    fn from(err: ParseError) -> Self {
        DdlError::InvalidInput(err.to_string())
    }
}

/// The parser consumes the token stream of a single CREATE TABLE statement
/// and builds a Table value. It is a plain left-to-right recursive-descent
/// parser: each comma-separated element inside the outer parentheses is first
/// parsed into a tagged TableElement, and out-of-line PRIMARY KEY definitions
/// are folded into the column list afterwards as a separate pass.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// One element of the comma-delimited list inside the outer parentheses,
/// disambiguated by its leading keyword(s).
enum TableElement {
    Column(Column),
    /// An out-of-line PRIMARY KEY (...) definition, with the offset of the
    /// PRIMARY keyword for diagnostics.
    PrimaryKey { offset: usize, columns: Vec<String> },
    Index(Index),
    ForeignKey(ForeignKey),
}

impl Parser {
    /// Creates a parser over a token stream. Comment tokens should already be
    /// stripped; they are never grammatically significant.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parses the CREATE TABLE statement, consuming the parser.
    pub fn parse_create_table(mut self) -> Result<Table, ParseError> {
        self.expect_keyword("CREATE")?;
        self.try_keyword("TEMPORARY");
        self.expect_keyword("TABLE")?;
        if self.try_keyword("IF") {
            self.expect_keyword("NOT")?;
            self.expect_keyword("EXISTS")?;
        }
        let name = self.parse_table_name()?;

        self.expect_punctuation("(")?;
        let mut elements = vec![self.parse_element()?];
        while self.try_punctuation(",") {
            elements.push(self.parse_element()?);
        }
        self.expect_punctuation(")")?;

        let options = self.parse_table_options()?;
        self.try_punctuation(";");
        if self.peek().is_some() {
            return Err(self.error("end of statement"));
        }

        build_table(name, elements, options)
    }

    /// Parses one column-or-key list element, dispatching on its leading
    /// keyword. A bare identifier (or quoted name) starts a column definition.
    fn parse_element(&mut self) -> Result<TableElement, ParseError> {
        match self.peek() {
            Some(t) if t.is_keyword("PRIMARY") => self.parse_primary_key(),
            Some(t) if t.is_keyword("CONSTRAINT") => self.parse_named_constraint(),
            Some(t) if t.is_keyword("FOREIGN") => {
                Ok(TableElement::ForeignKey(self.parse_foreign_key(None)?))
            }
            Some(t) if t.is_keyword("UNIQUE") => self.parse_unique_index(),
            Some(t) if t.is_keyword("INDEX") || t.is_keyword("KEY") => {
                Ok(TableElement::Index(self.parse_index(false)?))
            }
            Some(t) if matches!(t.kind, TokenKind::Identifier | TokenKind::String) => {
                Ok(TableElement::Column(self.parse_column()?))
            }
            _ => Err(self.error("a column, index, or constraint definition")),
        }
    }

    /// Parses a column definition: name, data type, then any constraints.
    fn parse_column(&mut self) -> Result<Column, ParseError> {
        let name = self.parse_name()?;
        let data_type = self.parse_data_type()?;
        let mut column = Column::new(name, data_type);
        loop {
            if self.try_keyword("NOT") {
                self.expect_keyword("NULL")?;
                column.nullable = false;
            } else if self.try_keyword("NULL") {
                column.nullable = true;
            } else if self.try_keyword("PRIMARY") {
                self.expect_keyword("KEY")?;
                column.primary_key = true;
                column.nullable = false;
            } else if self.try_keyword("UNIQUE") {
                self.try_keyword("KEY");
                column.unique = true;
            } else if self.try_keyword("AUTO_INCREMENT") {
                column.auto_increment = true;
            } else if self.try_keyword("DEFAULT") {
                column.default_value = Some(self.parse_default_value()?);
            } else if self.try_keyword("COMMENT") {
                column.comment = Some(self.parse_string()?);
            } else if self.try_keyword("COLLATE") {
                // Column collations are accepted and dropped; the model only
                // carries the table-level collation.
                self.parse_name()?;
            } else if self.try_keyword("ON") {
                // ON UPDATE CURRENT_TIMESTAMP, common on timestamp columns in
                // dumps. Accepted and dropped.
                self.expect_keyword("UPDATE")?;
                self.parse_default_value()?;
            } else {
                break;
            }
        }
        Ok(column)
    }

    /// Parses a data type, preserving its raw spelling, e.g. "VARCHAR(255)",
    /// "DECIMAL(10,2)" or "ENUM('a','b')". Parameters may nest parentheses.
    fn parse_data_type(&mut self) -> Result<String, ParseError> {
        let token = self.next_or("a data type")?;
        let mut data_type = match token.kind {
            TokenKind::Keyword | TokenKind::Identifier => token.text,
            _ => {
                self.pos -= 1;
                return Err(self.error("a data type"));
            }
        };
        if self.try_punctuation("(") {
            data_type.push('(');
            self.collect_parenthesized(&mut data_type)?;
        }
        for modifier in ["UNSIGNED", "ZEROFILL"] {
            if self.try_identifier(modifier) {
                data_type.push(' ');
                data_type.push_str(modifier);
            }
        }
        Ok(data_type)
    }

    /// Parses a DEFAULT value, preserving its raw text: a quoted literal
    /// keeps its quotes, NULL is canonicalized to "NULL", and an identifier
    /// may take a call parenthesis pair, e.g. NOW(). Classification of the
    /// value is deferred entirely to the consumer.
    fn parse_default_value(&mut self) -> Result<String, ParseError> {
        let token = self.next_or("a default value")?;
        match token.kind {
            TokenKind::String | TokenKind::Number => Ok(token.text),
            TokenKind::Keyword if token.is_keyword("NULL") => Ok("NULL".to_string()),
            TokenKind::Identifier => {
                let mut value = token.text;
                if self.try_punctuation("(") {
                    value.push('(');
                    self.collect_parenthesized(&mut value)?;
                }
                Ok(value)
            }
            _ => {
                self.pos -= 1;
                Err(self.error("a default value"))
            }
        }
    }

    /// Parses an out-of-line PRIMARY KEY (...) definition.
    fn parse_primary_key(&mut self) -> Result<TableElement, ParseError> {
        let offset = self.peek().map_or(0, |t| t.offset);
        self.expect_keyword("PRIMARY")?;
        self.expect_keyword("KEY")?;
        let columns = self.parse_column_list()?;
        Ok(TableElement::PrimaryKey { offset, columns })
    }

    /// Parses a UNIQUE INDEX/KEY definition. Bare UNIQUE only occurs as an
    /// inline column constraint, so an index keyword must follow here.
    fn parse_unique_index(&mut self) -> Result<TableElement, ParseError> {
        self.expect_keyword("UNIQUE")?;
        if !self.peek_keyword("INDEX") && !self.peek_keyword("KEY") {
            return Err(self.error("INDEX or KEY"));
        }
        Ok(TableElement::Index(self.parse_index(true)?))
    }

    /// Parses an INDEX/KEY definition: optional name, column list, optional
    /// USING clause on either side of the list.
    fn parse_index(&mut self, unique: bool) -> Result<Index, ParseError> {
        if !self.try_keyword("INDEX") {
            self.expect_keyword("KEY")?;
        }
        let name = match self.peek() {
            Some(t) if matches!(t.kind, TokenKind::Identifier | TokenKind::String) => {
                Some(self.parse_name()?)
            }
            _ => None,
        };
        let mut index_type = self.parse_index_type()?;
        let columns = self.parse_column_list()?;
        if index_type.is_none() {
            index_type = self.parse_index_type()?;
        }
        Ok(Index { name, columns, unique, primary: false, index_type })
    }

    /// Parses a USING BTREE / USING HASH clause, if present. USING is not in
    /// the keyword set, so it arrives as an identifier token.
    fn parse_index_type(&mut self) -> Result<Option<String>, ParseError> {
        if !self.try_identifier("USING") {
            return Ok(None);
        }
        Ok(Some(self.parse_name()?.to_ascii_uppercase()))
    }

    /// Parses a CONSTRAINT definition. Only foreign keys take a constraint
    /// name in this grammar.
    fn parse_named_constraint(&mut self) -> Result<TableElement, ParseError> {
        self.expect_keyword("CONSTRAINT")?;
        let name = match self.peek() {
            Some(t) if matches!(t.kind, TokenKind::Identifier | TokenKind::String) => {
                Some(self.parse_name()?)
            }
            _ => None,
        };
        if self.peek_keyword("FOREIGN") {
            Ok(TableElement::ForeignKey(self.parse_foreign_key(name)?))
        } else {
            Err(self.error("FOREIGN KEY"))
        }
    }

    /// Parses a FOREIGN KEY definition. The referencing and referenced column
    /// lists must have the same length; a mismatch is a constraint violation,
    /// reported as a parse error at the point the definition completes.
    fn parse_foreign_key(&mut self, name: Option<String>) -> Result<ForeignKey, ParseError> {
        let offset = self.peek().map_or(0, |t| t.offset);
        self.expect_keyword("FOREIGN")?;
        self.expect_keyword("KEY")?;
        let columns = self.parse_column_list()?;
        self.expect_keyword("REFERENCES")?;
        let referenced_table = self.parse_table_name()?;
        let referenced_columns = self.parse_column_list()?;

        let mut on_delete = None;
        let mut on_update = None;
        while self.try_keyword("ON") {
            if self.try_keyword("DELETE") {
                on_delete = Some(self.parse_referential_action()?);
            } else if self.try_keyword("UPDATE") {
                on_update = Some(self.parse_referential_action()?);
            } else {
                return Err(self.error("DELETE or UPDATE"));
            }
        }

        if columns.len() != referenced_columns.len() {
            return Err(ParseError {
                offset,
                expected: format!("{} referenced columns", columns.len()),
                found: format!("{}", referenced_columns.len()),
            });
        }
        Ok(ForeignKey { name, columns, referenced_table, referenced_columns, on_delete, on_update })
    }

    /// Parses a referential action, canonicalized to its uppercase spelling.
    fn parse_referential_action(&mut self) -> Result<String, ParseError> {
        if self.try_keyword("CASCADE") {
            return Ok("CASCADE".to_string());
        }
        if self.try_keyword("RESTRICT") {
            return Ok("RESTRICT".to_string());
        }
        if self.try_keyword("SET") {
            if self.try_keyword("NULL") {
                return Ok("SET NULL".to_string());
            }
            if self.try_keyword("DEFAULT") {
                return Ok("SET DEFAULT".to_string());
            }
            return Err(self.error("NULL or DEFAULT"));
        }
        if self.try_keyword("NO") {
            self.expect_keyword("ACTION")?;
            return Ok("NO ACTION".to_string());
        }
        Err(self.error("a referential action"))
    }

    /// Parses trailing table options into a map keyed by uppercased option
    /// name. The option list is open-ended: recognized or not, every
    /// NAME [= value] pair is preserved for downstream consumers.
    fn parse_table_options(&mut self) -> Result<BTreeMap<String, String>, ParseError> {
        let mut options = BTreeMap::new();
        loop {
            match self.peek() {
                None => break,
                Some(t) if t.is_punctuation(";") => break,
                _ => {}
            }
            // DEFAULT is a prefix of DEFAULT CHARSET and friends.
            self.try_keyword("DEFAULT");
            let token = self.next_or("a table option")?;
            let mut key = match token.kind {
                TokenKind::Keyword | TokenKind::Identifier => token.text.to_ascii_uppercase(),
                _ => {
                    self.pos -= 1;
                    return Err(self.error("a table option"));
                }
            };
            // CHARACTER SET is the two-word spelling of CHARSET.
            if key == "CHARACTER" && self.try_keyword("SET") {
                key = "CHARSET".to_string();
            }
            self.try_operator("=");
            let token = self.next_or("an option value")?;
            let value = match token.kind {
                TokenKind::String => token.unquoted(),
                TokenKind::Keyword | TokenKind::Identifier | TokenKind::Number => token.text,
                _ => {
                    self.pos -= 1;
                    return Err(self.error("an option value"));
                }
            };
            options.insert(key, value);
        }
        Ok(options)
    }

    /// Parses a parenthesized, comma-separated list of column names, as used
    /// by key and foreign key definitions. Must be non-empty.
    fn parse_column_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_punctuation("(")?;
        let mut columns = vec![self.parse_indexed_column()?];
        while self.try_punctuation(",") {
            columns.push(self.parse_indexed_column()?);
        }
        self.expect_punctuation(")")?;
        Ok(columns)
    }

    /// Parses one column reference in a key definition, tolerating a prefix
    /// length like name(10).
    fn parse_indexed_column(&mut self) -> Result<String, ParseError> {
        let name = self.parse_name()?;
        if self.try_punctuation("(") {
            let token = self.next_or("a prefix length")?;
            if token.kind != TokenKind::Number {
                self.pos -= 1;
                return Err(self.error("a prefix length"));
            }
            self.expect_punctuation(")")?;
        }
        Ok(name)
    }

    /// Parses a possibly schema-qualified table name, keeping only the table
    /// part.
    fn parse_table_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.parse_name()?;
        if self.try_punctuation(".") {
            name = self.parse_name()?;
        }
        Ok(name)
    }

    /// Parses a name: a bare identifier, or a quoted identifier (backticks
    /// and double quotes lex as String tokens), unwrapped to its bare form.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        let token = self.next_or("an identifier")?;
        match token.kind {
            TokenKind::Identifier => Ok(token.text),
            TokenKind::String => Ok(token.unquoted()),
            _ => {
                self.pos -= 1;
                Err(self.error("an identifier"))
            }
        }
    }

    /// Parses a quoted string literal, returning its unquoted content.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let token = self.next_or("a string literal")?;
        if token.kind != TokenKind::String {
            self.pos -= 1;
            return Err(self.error("a string literal"));
        }
        Ok(token.unquoted())
    }

    /// Appends raw token texts to out until the parenthesis that was just
    /// opened is closed, tracking nesting depth.
    fn collect_parenthesized(&mut self, out: &mut String) -> Result<(), ParseError> {
        let mut depth = 1;
        while depth > 0 {
            let token = self.next_or("a closing parenthesis")?;
            if token.is_punctuation("(") {
                depth += 1;
            } else if token.is_punctuation(")") {
                depth -= 1;
            }
            out.push_str(&token.text);
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consumes and returns the next token, or errors with the given
    /// expectation at end of input.
    fn next_or(&mut self, expected: &str) -> Result<Token, ParseError> {
        match self.tokens.get(self.pos).cloned() {
            Some(token) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(self.error(expected)),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Consumes the next token if it is the given keyword.
    fn try_keyword(&mut self, keyword: &str) -> bool {
        let matched = self.peek_keyword(keyword);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.try_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(keyword))
        }
    }

    fn try_punctuation(&mut self, symbol: &str) -> bool {
        let matched = self.peek().is_some_and(|t| t.is_punctuation(symbol));
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn expect_punctuation(&mut self, symbol: &str) -> Result<(), ParseError> {
        if self.try_punctuation(symbol) {
            Ok(())
        } else {
            Err(self.error(symbol))
        }
    }

    fn try_operator(&mut self, symbol: &str) -> bool {
        let matched = self.peek().is_some_and(|t| t.is_operator(symbol));
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Consumes the next token if it is the given non-keyword word, e.g.
    /// UNSIGNED or USING, ignoring case.
    fn try_identifier(&mut self, word: &str) -> bool {
        let matched = self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Identifier && t.text.eq_ignore_ascii_case(word));
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Builds a parse error describing what was expected at the current
    /// position.
    fn error(&self, expected: impl Into<String>) -> ParseError {
        let (offset, found) = match self.peek() {
            Some(token) => (token.offset, format!("'{}'", token.text)),
            None => {
                let end = self.tokens.last().map_or(0, |t| t.offset + t.text.len());
                (end, "end of statement".to_string())
            }
        };
        ParseError { offset, expected: expected.into(), found }
    }
}

/// Assembles the parsed elements into a Table, folding out-of-line PRIMARY
/// KEY definitions into the column list by name lookup. The fold runs as a
/// post-processing step over a name-to-position index, keeping the parse
/// pass itself a pure left-to-right consumer.
fn build_table(
    name: String,
    elements: Vec<TableElement>,
    options: BTreeMap<String, String>,
) -> Result<Table, ParseError> {
    let mut columns = Vec::new();
    let mut indexes = Vec::new();
    let mut foreign_keys = Vec::new();
    let mut primary_keys = Vec::new();
    for element in elements {
        match element {
            TableElement::Column(column) => columns.push(column),
            TableElement::PrimaryKey { offset, columns } => primary_keys.push((offset, columns)),
            TableElement::Index(index) => indexes.push(index),
            TableElement::ForeignKey(fk) => foreign_keys.push(fk),
        }
    }
    if columns.is_empty() {
        return Err(ParseError {
            offset: 0,
            expected: "at least one column definition".to_string(),
            found: "none".to_string(),
        });
    }

    let positions: BTreeMap<String, usize> =
        columns.iter().enumerate().map(|(i, c)| (c.name.clone(), i)).collect();
    for (offset, names) in primary_keys {
        for pk_name in names {
            let Some(&i) = positions.get(&pk_name) else {
                return Err(ParseError {
                    offset,
                    expected: format!("a declared column named {pk_name}"),
                    found: "no such column".to_string(),
                });
            };
            columns[i].primary_key = true;
            columns[i].nullable = false;
        }
    }

    Ok(Table {
        name,
        comment: options.get("COMMENT").cloned(),
        engine: options.get("ENGINE").cloned(),
        charset: options.get("CHARSET").cloned(),
        collation: options.get("COLLATE").cloned(),
        columns,
        indexes,
        foreign_keys,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{strip_comments, tokenize};

    fn parse(sql: &str) -> Result<Table, ParseError> {
        Parser::new(strip_comments(tokenize(sql))).parse_create_table()
    }

    #[test]
    fn basic_table() {
        let table = parse(
            "CREATE TABLE users (
                id INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) UNIQUE
            );",
        )
        .unwrap();
        assert_eq!(table.name, "users");
        assert_eq!(table.columns.len(), 3);
        assert!(table.columns[0].primary_key);
        assert!(!table.columns[0].nullable);
        assert!(!table.columns[1].nullable);
        assert!(table.columns[2].unique);
        assert!(table.columns[2].nullable);
        assert!(table.indexes.is_empty());
        assert!(table.foreign_keys.is_empty());
    }

    #[test]
    fn temporary_if_not_exists() {
        let table = parse("CREATE TEMPORARY TABLE IF NOT EXISTS t (x INT)").unwrap();
        assert_eq!(table.name, "t");
    }

    #[test]
    fn quoted_identifiers_are_unwrapped() {
        let table = parse("CREATE TABLE `my db`.`my table` (`my col` INT, \"other\" TEXT)").unwrap();
        assert_eq!(table.name, "my table");
        assert_eq!(table.columns[0].name, "my col");
        assert_eq!(table.columns[1].name, "other");
    }

    #[test]
    fn data_types_keep_raw_spelling() {
        let table = parse(
            "CREATE TABLE t (
                a DECIMAL(10,2),
                b ENUM('one','two'),
                c INT UNSIGNED,
                d varchar(50)
            )",
        )
        .unwrap();
        let types: Vec<_> = table.columns.iter().map(|c| c.data_type.as_str()).collect();
        assert_eq!(types, vec!["DECIMAL(10,2)", "ENUM('one','two')", "INT UNSIGNED", "varchar(50)"]);
    }

    #[test]
    fn default_values_are_raw() {
        let table = parse(
            "CREATE TABLE t (
                a VARCHAR(10) DEFAULT 'a;b',
                b INT DEFAULT 0,
                c TEXT DEFAULT NULL,
                d TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                e DATETIME DEFAULT NOW()
            )",
        )
        .unwrap();
        let defaults: Vec<_> =
            table.columns.iter().map(|c| c.default_value.as_deref().unwrap()).collect();
        assert_eq!(defaults, vec!["'a;b'", "0", "NULL", "CURRENT_TIMESTAMP", "NOW()"]);
    }

    #[test]
    fn column_comment_and_auto_increment() {
        let table = parse(
            "CREATE TABLE t (id INT NOT NULL AUTO_INCREMENT PRIMARY KEY COMMENT 'the id')",
        )
        .unwrap();
        let column = &table.columns[0];
        assert!(column.auto_increment);
        assert_eq!(column.comment.as_deref(), Some("the id"));
    }

    #[test]
    fn out_of_line_primary_key_folds_into_columns() {
        let table = parse(
            "CREATE TABLE t (
                a INT,
                b INT,
                c INT,
                PRIMARY KEY (a, b)
            )",
        )
        .unwrap();
        assert!(table.columns[0].primary_key);
        assert!(!table.columns[0].nullable);
        assert!(table.columns[1].primary_key);
        assert!(!table.columns[2].primary_key);
        assert!(table.columns[2].nullable);
        // No index is synthesized for the primary key.
        assert!(table.indexes.is_empty());
    }

    #[test]
    fn primary_key_over_unknown_column_fails() {
        let err = parse("CREATE TABLE t (a INT, PRIMARY KEY (missing))").unwrap_err();
        assert!(err.expected.contains("missing"), "{err}");
    }

    #[test]
    fn unique_index_multi_column() {
        let table = parse(
            "CREATE TABLE t (
                first VARCHAR(50),
                last VARCHAR(50),
                UNIQUE INDEX idx_name (first, last)
            )",
        )
        .unwrap();
        assert_eq!(table.indexes.len(), 1);
        let index = &table.indexes[0];
        assert_eq!(index.name.as_deref(), Some("idx_name"));
        assert_eq!(index.columns, vec!["first", "last"]);
        assert!(index.unique);
        assert!(!index.primary);
        // Inline UNIQUE was not set on the columns.
        assert!(!table.columns[0].unique);
    }

    #[test]
    fn plain_key_with_using_and_prefix_length() {
        let table = parse(
            "CREATE TABLE t (
                body TEXT,
                KEY idx_body (body(100)) USING BTREE,
                INDEX (body) USING HASH
            )",
        )
        .unwrap();
        assert_eq!(table.indexes.len(), 2);
        assert_eq!(table.indexes[0].index_type.as_deref(), Some("BTREE"));
        assert_eq!(table.indexes[0].columns, vec!["body"]);
        assert!(!table.indexes[0].unique);
        assert_eq!(table.indexes[1].name, None);
        assert_eq!(table.indexes[1].index_type.as_deref(), Some("HASH"));
    }

    #[test]
    fn inline_primary_key_and_named_index_stay_independent() {
        let table = parse(
            "CREATE TABLE t (
                id INT PRIMARY KEY,
                KEY idx_id (id)
            )",
        )
        .unwrap();
        assert!(table.columns[0].primary_key);
        assert_eq!(table.indexes.len(), 1);
        assert_eq!(table.indexes[0].name.as_deref(), Some("idx_id"));
        assert!(!table.indexes[0].primary);
    }

    #[test]
    fn foreign_key_with_actions() {
        let table = parse(
            "CREATE TABLE posts (
                id INT PRIMARY KEY,
                user_id INT,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )",
        )
        .unwrap();
        assert_eq!(table.foreign_keys.len(), 1);
        let fk = &table.foreign_keys[0];
        assert_eq!(fk.name, None);
        assert_eq!(fk.columns, vec!["user_id"]);
        assert_eq!(fk.referenced_table, "users");
        assert_eq!(fk.referenced_columns, vec!["id"]);
        assert_eq!(fk.on_delete.as_deref(), Some("CASCADE"));
        assert_eq!(fk.on_update, None);
    }

    #[test]
    fn named_foreign_key_with_multi_word_actions() {
        let table = parse(
            "CREATE TABLE t (
                a INT,
                b INT,
                CONSTRAINT fk_ab FOREIGN KEY (a, b) REFERENCES other (x, y)
                    ON DELETE SET NULL ON UPDATE NO ACTION
            )",
        )
        .unwrap();
        let fk = &table.foreign_keys[0];
        assert_eq!(fk.name.as_deref(), Some("fk_ab"));
        assert_eq!(fk.columns, vec!["a", "b"]);
        assert_eq!(fk.referenced_columns, vec!["x", "y"]);
        assert_eq!(fk.on_delete.as_deref(), Some("SET NULL"));
        assert_eq!(fk.on_update.as_deref(), Some("NO ACTION"));
    }

    #[test]
    fn foreign_key_column_count_mismatch_fails() {
        let err = parse(
            "CREATE TABLE t (a INT, b INT, FOREIGN KEY (a, b) REFERENCES other (x))",
        )
        .unwrap_err();
        assert!(err.expected.contains("2 referenced columns"), "{err}");
        assert_eq!(err.found, "1");
    }

    #[test]
    fn constraint_without_foreign_key_fails() {
        let err = parse("CREATE TABLE t (a INT, CONSTRAINT c CHECK (a > 0))").unwrap_err();
        assert_eq!(err.expected, "FOREIGN KEY");
    }

    #[test]
    fn table_options() {
        let table = parse(
            "CREATE TABLE t (x INT) ENGINE=InnoDB AUTO_INCREMENT=100 \
             DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci COMMENT='a table';",
        )
        .unwrap();
        assert_eq!(table.engine.as_deref(), Some("InnoDB"));
        assert_eq!(table.charset.as_deref(), Some("utf8mb4"));
        assert_eq!(table.collation.as_deref(), Some("utf8mb4_unicode_ci"));
        assert_eq!(table.comment.as_deref(), Some("a table"));
        // Unrecognized options are preserved verbatim.
        assert_eq!(table.options.get("AUTO_INCREMENT").map(String::as_str), Some("100"));
    }

    #[test]
    fn character_set_spelling() {
        let table =
            parse("CREATE TABLE t (x INT) DEFAULT CHARACTER SET utf8 COLLATE utf8_general_ci").unwrap();
        assert_eq!(table.charset.as_deref(), Some("utf8"));
        assert_eq!(table.collation.as_deref(), Some("utf8_general_ci"));
    }

    #[test]
    fn on_update_current_timestamp_is_tolerated() {
        let table = parse(
            "CREATE TABLE t (updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP)",
        )
        .unwrap();
        assert_eq!(table.columns[0].default_value.as_deref(), Some("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn comments_are_ignored_by_the_grammar() {
        let table = parse(
            "CREATE TABLE t ( -- inline comment\n  x INT /* block */ NOT NULL\n)",
        )
        .unwrap();
        assert_eq!(table.columns[0].name, "x");
        assert!(!table.columns[0].nullable);
    }

    #[test]
    fn missing_closing_parenthesis_fails() {
        let err = parse("CREATE TABLE t (x INT").unwrap_err();
        assert_eq!(err.found, "end of statement");
    }

    #[test]
    fn unclassifiable_element_fails() {
        let err = parse("CREATE TABLE t (x INT, = INT)").unwrap_err();
        assert_eq!(err.expected, "a column, index, or constraint definition");
        assert_eq!(err.found, "'='");
    }

    #[test]
    fn empty_column_list_fails() {
        assert!(parse("CREATE TABLE t ()").is_err());
    }

    #[test]
    fn error_offsets_point_at_the_problem() {
        let sql = "CREATE TABLE t (x INT, y )";
        let err = parse(sql).unwrap_err();
        assert_eq!(&sql[err.offset..err.offset + 1], ")");
    }
}
