//! Extraction of statement-like substrings from free text.
//!
//! A statement candidate starts at a vocabulary keyword and runs
//! through the next `;`. Fragments with no terminating delimiter are
//! dropped: an unterminated keyword never produces a candidate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dialect-spanning keyword phrases that open a statement.
///
/// Covers DML verbs, DDL action/object pairs, and MySQL-style
/// introspection commands. Matching is case-insensitive and bounded on
/// both sides, so keywords embedded in larger identifiers
/// (`UPDATED_AT`, `user_select_pref`) do not match.
const SQL_KEYWORDS: &[&str] = &[
    "UPDATE",
    "DELETE",
    "SELECT",
    "INSERT",
    "TRUNCATE",
    "CREATE DATABASE",
    "CREATE SCHEMA",
    "CREATE TABLE",
    "CREATE VIEW",
    "CREATE TRIGGER",
    "CREATE FUNCTION",
    "CREATE INDEX",
    "CREATE PROCEDURE",
    "DROP DATABASE",
    "DROP SCHEMA",
    "DROP TABLE",
    "DROP VIEW",
    "DROP TRIGGER",
    "DROP FUNCTION",
    "DROP INDEX",
    "DROP PROCEDURE",
    "ALTER DATABASE",
    "ALTER SCHEMA",
    "ALTER TABLE",
    "ALTER VIEW",
    "ALTER TRIGGER",
    "ALTER FUNCTION",
    "ALTER INDEX",
    "ALTER PROCEDURE",
    "SHOW BINARY",
    "SHOW BINLOG",
    "SHOW CHARACTER",
    "SHOW COLLATION",
    "SHOW COLUMNS",
    "SHOW CREATE",
    "SHOW DATABASES",
    "SHOW ENGINE",
    "SHOW ENGINES",
    "SHOW ERRORS",
    "SHOW EVENTS",
    "SHOW FUNCTION",
    "SHOW GRANTS",
    "SHOW INDEX",
    "SHOW MASTER",
    "SHOW OPEN",
    "SHOW PLUGINS",
    "SHOW PRIVILEGES",
    "SHOW PROCEDURE",
    "SHOW PROCESSLIST",
    "SHOW PROFILE",
    "SHOW PROFILES",
    "SHOW RELAYLOG",
    "SHOW REPLICA",
    "SHOW REPLICAS",
    "SHOW SLAVE",
    "SHOW STATUS",
    "SHOW TABLE",
    "SHOW TABLES",
    "SHOW TRIGGERS",
    "SHOW VARIABLES",
    "SHOW WARNINGS",
];

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = SQL_KEYWORDS
        .iter()
        .map(|kw| kw.replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("keyword pattern must compile")
});

/// Statement delimiter that terminates a candidate.
const STATEMENT_DELIMITER: char = ';';

/// A statement-like substring found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStatement {
    /// The candidate text, keyword through delimiter, trimmed.
    pub text: String,

    /// Byte offset of the keyword in the original input.
    pub offset: usize,
}

/// Lazy iterator over statement candidates in `input`.
///
/// A pure function of the input and the fixed vocabulary: re-running
/// it on the same input yields identical results.
#[derive(Debug, Clone)]
pub struct SqlStatements<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> SqlStatements<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }
}

impl Iterator for SqlStatements<'_> {
    type Item = ExtractedStatement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.input.len() {
            return None;
        }

        let keyword = KEYWORD_PATTERN.find_at(self.input, self.cursor)?;

        let Some(relative_end) = self.input[keyword.start()..].find(STATEMENT_DELIMITER) else {
            // No delimiter before end of input: the trailing fragment
            // is dropped, not emitted.
            self.cursor = self.input.len();
            return None;
        };
        let end = keyword.start() + relative_end;

        self.cursor = end + 1;
        Some(ExtractedStatement {
            text: self.input[keyword.start()..=end].trim().to_string(),
            offset: keyword.start(),
        })
    }
}
