//! Lenient classification of statement candidates.
//!
//! Assigns a statement kind from the leading verb without parsing the
//! full grammar. Partial or malformed statements are tolerated; text
//! that does not open like a statement classifies as
//! [`StatementKind::Unknown`], never as an error.

use std::fmt;

/// Schema object targeted by a DDL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaObject {
    Database,
    Schema,
    Table,
    View,
    Trigger,
    Function,
    Index,
    Procedure,
}

impl SchemaObject {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "DATABASE" => Some(Self::Database),
            "SCHEMA" => Some(Self::Schema),
            "TABLE" => Some(Self::Table),
            "VIEW" => Some(Self::View),
            "TRIGGER" => Some(Self::Trigger),
            "FUNCTION" => Some(Self::Function),
            "INDEX" => Some(Self::Index),
            "PROCEDURE" => Some(Self::Procedure),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Trigger => "TRIGGER",
            Self::Function => "FUNCTION",
            Self::Index => "INDEX",
            Self::Procedure => "PROCEDURE",
        };
        f.write_str(name)
    }
}

/// Kind assigned to a statement candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    Create(SchemaObject),
    Drop(SchemaObject),
    Alter(SchemaObject),
    Show,
    AnonBlock,
    /// Sentinel for text that does not resemble a statement.
    Unknown,
}

impl StatementKind {
    /// Whether this kind counts as a positive detection.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, StatementKind::Unknown)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => f.write_str("SELECT"),
            Self::Insert => f.write_str("INSERT"),
            Self::Update => f.write_str("UPDATE"),
            Self::Delete => f.write_str("DELETE"),
            Self::Truncate => f.write_str("TRUNCATE"),
            Self::Create(obj) => write!(f, "CREATE {obj}"),
            Self::Drop(obj) => write!(f, "DROP {obj}"),
            Self::Alter(obj) => write!(f, "ALTER {obj}"),
            Self::Show => f.write_str("SHOW"),
            Self::AnonBlock => f.write_str("ANON BLOCK"),
            Self::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

// Modifier tokens that may sit between a DDL verb and its object.
const DDL_MODIFIERS: &[&str] = &[
    "OR",
    "REPLACE",
    "UNIQUE",
    "TEMP",
    "TEMPORARY",
    "MATERIALIZED",
    "IF",
    "NOT",
    "EXISTS",
];

fn ddl_object(mut tokens: impl Iterator<Item = String>) -> Option<SchemaObject> {
    tokens.find_map(|token| {
        if DDL_MODIFIERS.contains(&token.as_str()) {
            None
        } else {
            SchemaObject::from_token(&token)
        }
    })
}

/// Classify a statement candidate by its leading verb.
pub fn classify(statement: &str) -> StatementKind {
    let mut tokens = statement.split_whitespace().map(|t| {
        t.trim_start_matches('(')
            .trim_end_matches(';')
            .to_ascii_uppercase()
    });

    let Some(verb) = tokens.next() else {
        return StatementKind::Unknown;
    };

    match verb.as_str() {
        "SELECT" => StatementKind::Select,
        "INSERT" => StatementKind::Insert,
        "UPDATE" => StatementKind::Update,
        "DELETE" => StatementKind::Delete,
        "TRUNCATE" => StatementKind::Truncate,
        "SHOW" => StatementKind::Show,
        "BEGIN" | "DECLARE" => StatementKind::AnonBlock,
        "CREATE" => ddl_object(tokens)
            .map(StatementKind::Create)
            .unwrap_or(StatementKind::Unknown),
        "DROP" => ddl_object(tokens)
            .map(StatementKind::Drop)
            .unwrap_or(StatementKind::Unknown),
        "ALTER" => ddl_object(tokens)
            .map(StatementKind::Alter)
            .unwrap_or(StatementKind::Unknown),
        _ => StatementKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dml_verbs() {
        assert_eq!(classify("SELECT * FROM users;"), StatementKind::Select);
        assert_eq!(classify("insert into t values (1);"), StatementKind::Insert);
        assert_eq!(classify("UPDATE t SET a = 1;"), StatementKind::Update);
        assert_eq!(classify("DELETE FROM t;"), StatementKind::Delete);
        assert_eq!(classify("TRUNCATE TABLE t;"), StatementKind::Truncate);
    }

    #[test]
    fn test_ddl_with_object() {
        assert_eq!(
            classify("CREATE TABLE t (id INT);"),
            StatementKind::Create(SchemaObject::Table)
        );
        assert_eq!(
            classify("DROP DATABASE prod;"),
            StatementKind::Drop(SchemaObject::Database)
        );
        assert_eq!(
            classify("ALTER TABLE t ADD COLUMN b INT;"),
            StatementKind::Alter(SchemaObject::Table)
        );
    }

    #[test]
    fn test_ddl_with_modifiers() {
        assert_eq!(
            classify("CREATE OR REPLACE VIEW v AS SELECT 1;"),
            StatementKind::Create(SchemaObject::View)
        );
        assert_eq!(
            classify("CREATE UNIQUE INDEX idx ON t (a);"),
            StatementKind::Create(SchemaObject::Index)
        );
        assert_eq!(
            classify("DROP TABLE IF EXISTS t;"),
            StatementKind::Drop(SchemaObject::Table)
        );
    }

    #[test]
    fn test_introspection() {
        assert_eq!(classify("SHOW TABLES;"), StatementKind::Show);
        assert_eq!(classify("show variables;"), StatementKind::Show);
    }

    #[test]
    fn test_anon_block() {
        assert_eq!(classify("BEGIN SELECT 1; END;"), StatementKind::AnonBlock);
    }

    #[test]
    fn test_leading_parenthesis() {
        assert_eq!(classify("(SELECT 1);"), StatementKind::Select);
    }

    #[test]
    fn test_unrecognized_is_sentinel() {
        assert_eq!(classify("hello world;"), StatementKind::Unknown);
        assert_eq!(classify("CREATE chaos;"), StatementKind::Unknown);
        assert_eq!(classify(""), StatementKind::Unknown);
        assert_eq!(classify("   "), StatementKind::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(StatementKind::Select.to_string(), "SELECT");
        assert_eq!(
            StatementKind::Create(SchemaObject::Table).to_string(),
            "CREATE TABLE"
        );
    }
}
