//! RDF (Resource Description Framework) support
//!
//! This module implements the triple store the object layer is built on:
//! - RDF terms and triples (subject-predicate-object)
//! - An indexed, insertion-ordered in-memory store
//! - RDF serialization formats (Turtle, N-Triples, RDF/XML)
//! - Namespace prefixes for QName rendering
//!
//! # Example
//!
//! ```rust
//! use rdf_object::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! // Create a triple
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! let triple = Triple::new(subject.clone().into(), predicate, object.into());
//! store.insert(triple.clone()).unwrap();
//!
//! // Query triples
//! let results = store.get_triples_with_subject(&subject.into());
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod serialization;
mod store;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::{RdfStore, RdfStoreError, RdfStoreResult, DEFAULT_BLANK_PREFIX};

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError, SerializeResult,
};
