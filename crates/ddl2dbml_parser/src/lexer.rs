use std::iter::Peekable;
use std::str::CharIndices;

/// The lexer (lexical analyzer) preprocesses raw SQL strings into a sequence
/// of classified lexical tokens (keyword, identifier, string, etc), which are
/// passed on to the DDL parser. It has no knowledge of CREATE TABLE grammar;
/// it only recognizes the token shapes themselves.
///
/// Tokens carry their raw source text and starting byte offset, so that
/// re-concatenating token texts (plus the skipped whitespace between them)
/// reconstructs the input exactly, and so that parse errors can point at a
/// byte position in the statement.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved SQL keyword or built-in data type name.
    Keyword,
    /// A bare identifier, e.g. a table or column name.
    Identifier,
    /// A quoted literal: '...', "..." or `...`. Quotes are retained in the
    /// token text; MySQL also uses backticks and double quotes for quoted
    /// identifiers, which the parser unwraps where a name is expected.
    String,
    /// A numeric literal, with an optional decimal point. Signs and exponents
    /// are not part of the token.
    Number,
    /// One of = < > ! <= >= != <>.
    Operator,
    /// One of ( ) [ ] { } , . ;
    Punctuation,
    /// A -- line comment or /* block */ comment.
    Comment,
    /// Any other character, emitted one at a time.
    Unknown,
}

/// A single lexical token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw source text of the token, exactly as written.
    pub text: String,
    /// The starting byte offset of the token in the statement.
    pub offset: usize,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Token {
    /// Returns true if this is the given keyword, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Returns true if this is the given punctuation symbol.
    pub fn is_punctuation(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == symbol
    }

    /// Returns true if this is the given operator symbol.
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    /// Returns the token text with any surrounding quotes stripped and escape
    /// sequences resolved. Non-quoted tokens are returned as-is.
    pub fn unquoted(&self) -> String {
        unquote(&self.text)
    }
}

/// Tokenizes a SQL statement. Pure: all cursor state is local to the call, so
/// independent statements can be tokenized concurrently. Unknown characters
/// are emitted as Unknown tokens rather than failing; unterminated strings
/// and block comments consume to end of input.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    std::iter::from_fn(|| lexer.scan()).collect()
}

/// Removes all tokens of the given kinds.
pub fn strip(tokens: Vec<Token>, kinds: &[TokenKind]) -> Vec<Token> {
    tokens.into_iter().filter(|token| !kinds.contains(&token.kind)).collect()
}

/// Removes comment tokens. Comments are never semantically significant to the
/// grammar, so this runs before parsing.
pub fn strip_comments(tokens: Vec<Token>) -> Vec<Token> {
    strip(tokens, &[TokenKind::Comment])
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given string.
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer { input, chars: input.char_indices().peekable() }
    }

    /// Returns the byte offset of the next character, or the input length at
    /// end of input.
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(offset, _)| offset)
    }

    /// Returns the next character if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.chars.peek().filter(|&&(_, c)| predicate(c))?;
        self.chars.next().map(|(_, c)| c)
    }

    /// Returns true if the next character is the given character, consuming it.
    fn next_is(&mut self, c: char) -> bool {
        self.next_if(|n| n == c).is_some()
    }

    /// Scans the next token, if any. The first character (or two) tells us the
    /// token kind; the scan_* method consumes the token's characters and the
    /// raw text is sliced out of the input afterwards.
    fn scan(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start = self.offset();
        let rest = &self.input[start..];
        let kind = match rest.chars().next()? {
            '-' if rest.starts_with("--") => self.scan_line_comment(),
            '/' if rest.starts_with("/*") => self.scan_block_comment(),
            '\'' | '"' | '`' => self.scan_string(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(start),
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | '.' | ';' => self.scan_punctuation(),
            '=' | '<' | '>' | '!' => self.scan_operator(),
            _ => self.scan_unknown(),
        };
        let end = self.offset();
        Some(Token { kind, text: self.input[start..end].to_string(), offset: start })
    }

    /// Scans a quoted literal. The same quote character closes it; a backslash
    /// escapes the following character, and a doubled quote is the SQL escape
    /// for the quote itself, so neither terminates the literal. An
    /// unterminated literal consumes to end of input.
    fn scan_string(&mut self) -> TokenKind {
        let Some(quote) = self.next_if(|c| matches!(c, '\'' | '"' | '`')) else {
            return TokenKind::Unknown;
        };
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => {
                    self.chars.next();
                }
                c if c == quote => {
                    if !self.next_is(quote) {
                        break;
                    }
                }
                _ => {}
            }
        }
        TokenKind::String
    }

    /// Scans a number: digits with at most one decimal point. No exponents or
    /// signs; a leading - is a separate token.
    fn scan_number(&mut self) -> TokenKind {
        while self.next_if(|c| c.is_ascii_digit()).is_some() {}
        if self.next_is('.') {
            while self.next_if(|c| c.is_ascii_digit()).is_some() {}
        }
        TokenKind::Number
    }

    /// Scans an identifier or keyword: a letter or underscore followed by
    /// letters, digits, and underscores. The word is a keyword if its
    /// case-insensitive form is in the fixed keyword/data-type set; case is
    /// preserved in the token text either way.
    fn scan_word(&mut self, start: usize) -> TokenKind {
        while self.next_if(|c| c.is_alphanumeric() || c == '_').is_some() {}
        if is_keyword(&self.input[start..self.offset()]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    /// Scans a single punctuation character.
    fn scan_punctuation(&mut self) -> TokenKind {
        self.chars.next();
        TokenKind::Punctuation
    }

    /// Scans an operator, recognizing the two-character forms <=, >=, != and
    /// <> by look-ahead.
    fn scan_operator(&mut self) -> TokenKind {
        match self.chars.next() {
            Some((_, '<')) => {
                if !self.next_is('=') {
                    self.next_is('>');
                }
            }
            Some((_, '>')) | Some((_, '!')) => {
                self.next_is('=');
            }
            _ => {}
        }
        TokenKind::Operator
    }

    /// Scans a -- comment, spanning to end of line. The newline itself is
    /// left as whitespace.
    fn scan_line_comment(&mut self) -> TokenKind {
        while self.next_if(|c| c != '\n').is_some() {}
        TokenKind::Comment
    }

    /// Scans a /* block */ comment. An unterminated comment consumes to end
    /// of input.
    fn scan_block_comment(&mut self) -> TokenKind {
        self.chars.next();
        self.chars.next();
        while let Some((_, c)) = self.chars.next() {
            if c == '*' && self.next_is('/') {
                break;
            }
        }
        TokenKind::Comment
    }

    /// Scans a single unrecognized character.
    fn scan_unknown(&mut self) -> TokenKind {
        self.chars.next();
        TokenKind::Unknown
    }

    fn skip_whitespace(&mut self) {
        while self.next_if(|c| c.is_whitespace()).is_some() {}
    }
}

/// Strips surrounding quotes from a quoted literal or identifier and resolves
/// backslash and doubled-quote escapes. Unquoted text is returned unchanged.
pub fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let Some(quote) = chars.next().filter(|c| matches!(c, '\'' | '"' | '`')) else {
        return text.to_string();
    };
    let mut inner = chars.as_str();
    if let Some(stripped) = inner.strip_suffix(quote) {
        inner = stripped;
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            c if c == quote => {
                // A doubled quote resolves to a single one.
                chars.next_if(|&n| n == quote);
                out.push(quote);
            }
            c => out.push(c),
        }
    }
    out
}

/// Returns true if the word is a reserved CREATE TABLE keyword or a built-in
/// MySQL data type name, ignoring case.
fn is_keyword(word: &str) -> bool {
    matches!(
        word.to_ascii_uppercase().as_str(),
        // Statement and constraint keywords.
        "CREATE" | "TABLE" | "IF" | "NOT" | "EXISTS" | "TEMPORARY" | "PRIMARY" | "KEY"
            | "FOREIGN" | "REFERENCES" | "UNIQUE" | "INDEX" | "CONSTRAINT" | "CHECK" | "DEFAULT"
            | "NULL" | "AUTO_INCREMENT" | "COMMENT" | "ENGINE" | "CHARSET" | "COLLATE" | "ON"
            | "DELETE" | "UPDATE" | "CASCADE" | "RESTRICT" | "SET" | "NO" | "ACTION"
            | "GENERATED" | "ALWAYS" | "AS" | "STORED" | "VIRTUAL"
            // Data types.
            | "INT" | "INTEGER" | "BIGINT" | "SMALLINT" | "TINYINT" | "VARCHAR" | "CHAR"
            | "TEXT" | "LONGTEXT" | "MEDIUMTEXT" | "DECIMAL" | "NUMERIC" | "FLOAT" | "DOUBLE"
            | "REAL" | "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" | "YEAR" | "BOOLEAN" | "BOOL"
            | "JSON" | "BLOB" | "LONGBLOB" | "MEDIUMBLOB" | "TINYBLOB" | "BINARY" | "VARBINARY"
            | "ENUM" | "GEOMETRY" | "POINT" | "LINESTRING" | "POLYGON" | "MULTIPOINT"
            | "MULTILINESTRING" | "MULTIPOLYGON" | "GEOMETRYCOLLECTION"
    )
}
