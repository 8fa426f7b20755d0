//! Object layer over the RDF store
//!
//! This module maps RDF resources to typed handles:
//! - [`Factory`] owns the triple store, namespace prefixes and configuration
//! - [`Object`] reads and writes the properties of one resource
//! - [`PropertyValue`] is the literal value of a property
//! - Reified statements, ordered multi-valued properties and delayed typing
//! - [`Notifier`] receives the statements added and removed through a factory
//!
//! # Example
//!
//! ```rust
//! use rdf_object::{Factory, Object, PropertyValue};
//!
//! let mut f = Factory::new();
//! let mut alice = Object::with_type("http://example.org/alice", "http://xmlns.com/foaf/0.1/Person").unwrap();
//! alice.set_property_value(&mut f, "http://xmlns.com/foaf/0.1/name", "Alice").unwrap();
//!
//! // The declared type was written by the first mutation
//! assert_eq!(f.find_size(), 2);
//! assert_eq!(
//!     alice.get_property_value(&f, "http://xmlns.com/foaf/0.1/name").unwrap(),
//!     PropertyValue::from("Alice")
//! );
//! ```

mod error;
mod factory;
mod lifecycle;
mod notifier;
mod properties;
mod property_value;
mod reification;
mod resource;
mod traversal;
pub mod context;

pub use error::{ObjectError, ObjectResult};
pub use factory::Factory;
pub use lifecycle::CloneFilter;
pub use notifier::Notifier;
pub use property_value::PropertyValue;
pub use resource::Object;
