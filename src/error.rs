use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::grammar::Rule;

/// Coarse classification of [`HaystackError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// A malformed identifier, name or literal.
    Format,
    /// A symbol, zone, entity or tag that does not exist.
    Lookup,
    /// An insert or replace that would break a uniqueness rule.
    Integrity,
    /// A document the grammar or the semantic parser rejects.
    Parse,
    /// Reference data or configuration could not be read or decoded.
    Io,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum HaystackError {
    #[error("Malformed {what}: '{value}'")]
    Format { what: String, value: String },
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Unit {0} is not in haystack database")]
    UnitNotFound(String),
    #[error("Timezone {0} not found")]
    TimeZoneNotFound(String),
    #[error("Entity {0} not found")]
    EntityNotFound(String),
    #[error("Tag with {tag} not found in entity {entity}")]
    TagNotFound { tag: String, entity: String },
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Entity with ref {0} already in ontology")]
    DuplicateEntity(String),
    #[error("Tag with name {tag} already in entity {entity}")]
    DuplicateTag { tag: String, entity: String },
    #[error("Key {0} appears more than once in dict")]
    DuplicateKey(String),
    #[error("Tag '{from}' cannot be renamed to '{to}', only its value may be replaced")]
    TagRename { from: String, to: String },
    #[error("Tag name '{0}' is reserved for the entity identity")]
    ReservedTag(String),
    #[error("Unrecognized grammar rule {rule} at line {line}, column {column}")]
    Rule {
        rule: String,
        line: usize,
        column: usize,
    },
    #[error("The id tag at line {line}, column {column} must hold a Ref, found '{found}'")]
    IdNotRef {
        line: usize,
        column: usize,
        found: String,
    },
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("File System error: {0}")]
    Io(String),
}

impl HaystackError {
    pub fn format<W: Into<String>, V: Into<String>>(what: W, value: V) -> Self {
        HaystackError::Format {
            what: what.into(),
            value: value.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            HaystackError::Format { .. } => ErrorClass::Format,
            HaystackError::Syntax { .. } => ErrorClass::Parse,
            HaystackError::UnitNotFound(_) => ErrorClass::Lookup,
            HaystackError::TimeZoneNotFound(_) => ErrorClass::Lookup,
            HaystackError::EntityNotFound(_) => ErrorClass::Lookup,
            HaystackError::TagNotFound { .. } => ErrorClass::Lookup,
            HaystackError::IndexOutOfBounds { .. } => ErrorClass::Lookup,
            HaystackError::DuplicateEntity(_) => ErrorClass::Integrity,
            HaystackError::DuplicateTag { .. } => ErrorClass::Integrity,
            HaystackError::DuplicateKey(_) => ErrorClass::Integrity,
            HaystackError::TagRename { .. } => ErrorClass::Integrity,
            HaystackError::ReservedTag(_) => ErrorClass::Integrity,
            HaystackError::Rule { .. } => ErrorClass::Parse,
            HaystackError::IdNotRef { .. } => ErrorClass::Parse,
            HaystackError::Serialization(_) => ErrorClass::Io,
            HaystackError::Io(_) => ErrorClass::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, HaystackError>;

impl From<pest::error::Error<Rule>> for HaystackError {
    fn from(src: pest::error::Error<Rule>) -> HaystackError {
        let (line, column) = match src.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        };
        HaystackError::Syntax {
            line,
            column,
            message: src.variant.message().to_string(),
        }
    }
}

impl From<toml::de::Error> for HaystackError {
    fn from(src: toml::de::Error) -> HaystackError {
        HaystackError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<io::Error> for HaystackError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => HaystackError::Io(format!("Not found: {x}")),
            _ => HaystackError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
