//! Object layer errors

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::rdf::{ParseError, RdfError, RdfStoreError, SerializeError};

/// Object layer errors
#[derive(Error, Debug)]
pub enum ObjectError {
    /// IRI (or other RDF term) that cannot be represented
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// No statement for a required property
    #[error("Property {property} not found on {subject}")]
    PropertyNotFound { property: String, subject: String },

    /// Statement object has the wrong kind (literal vs resource)
    #[error("Property {property} does not hold a {expected}")]
    InvalidNodeType {
        property: String,
        expected: &'static str,
    },

    /// Key lookup without a match
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Statement already has a reification resource
    #[error("Statement already reified: {0}")]
    AlreadyReified(String),

    /// Reification resource carries properties of its own
    #[error("Cannot unreify {0}: reification resource carries extra properties")]
    CannotUnreify(String),

    /// Ordered read over values written without order
    #[error("Cannot preserve order of {property} on {subject}")]
    CannotPreserveOrder { property: String, subject: String },

    /// Positional operation on a value that carries no order
    #[error("Value of {0} is not ordered")]
    NotOrdered(String),

    /// Literal that cannot be read as the requested type
    #[error("Data conversion error: {0}")]
    DataConversion(String),

    /// Missing input file
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Serialization error
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// Store error
    #[error(transparent)]
    Store(#[from] RdfStoreError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No factory installed in the current thread
    #[error("No factory loaded")]
    NoFactory,

    /// Ambient factory is already borrowed
    #[error("Factory is already in use")]
    FactoryBusy,
}

impl From<RdfError> for ObjectError {
    fn from(e: RdfError) -> Self {
        ObjectError::InvalidIri(e.to_string())
    }
}

pub type ObjectResult<T> = Result<T, ObjectError>;
