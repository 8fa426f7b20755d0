//! RDF Object
//!
//! Typed object handles over an in-memory RDF triple store.
//!
//! # Architecture
//!
//! - [`rdf`]: terms, triples, the indexed store and the Turtle, N-Triples and
//!   RDF/XML codecs
//! - [`object`]: the [`Factory`] owning a store and the [`Object`] handles
//!   reading and writing resource properties
//! - [`config`]: YAML configuration of a factory
//!
//! # Features
//!
//! - Single and multi-valued properties, literal or resource valued
//! - Reified statements (`rdf:Statement`) carrying their own properties
//! - Ordered multi-valued properties, stored as ordered reified statements
//! - Delayed `rdf:type` writing
//! - Recursive removal and cloning of blank node structures
//! - Lookup by type, by key and by value
//! - Change notification through a [`Notifier`]
//!
//! ## Example Usage
//!
//! ```rust
//! use rdf_object::{Factory, Object, PropertyValue};
//!
//! const NAME: &str = "http://xmlns.com/foaf/0.1/name";
//! const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
//!
//! let mut f = Factory::new();
//!
//! // Create resources
//! let mut alice = Object::new("http://example.org/alice").unwrap();
//! let mut bob = Object::new("http://example.org/bob").unwrap();
//! alice.set_property_value(&mut f, NAME, "Alice").unwrap();
//! bob.set_property_value(&mut f, NAME, "Bob").unwrap();
//!
//! // Link them and annotate the link
//! let mut link = alice.reify_object(&mut f, KNOWS, &bob).unwrap();
//! link.set_property_value(&mut f, "http://example.org/since", 2020).unwrap();
//!
//! // Look them up again
//! let found = Object::find_by_key(&f, NAME, "Bob").unwrap();
//! assert_eq!(found, bob);
//! assert_eq!(alice.get_object(&f, KNOWS).unwrap(), bob);
//! assert_eq!(
//!     link.get_property_value(&f, "http://example.org/since").unwrap(),
//!     PropertyValue::Integer(2020)
//! );
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod object;
pub mod rdf;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, FactoryConfig};

pub use object::{Factory, Notifier, Object, ObjectError, ObjectResult, PropertyValue};

pub use rdf::{
    BlankNode, Literal, NamedNode, RdfFormat, RdfObject, RdfPredicate, RdfStore, RdfSubject,
    Triple, TriplePattern,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
