//! Object handles: construction, identity and types

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::ObjectResult;
use super::factory::Factory;
use super::property_value::PropertyValue;
use crate::rdf::vocab::rdf;
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};

/// Handle on a resource (IRI or blank node) of a [`Factory`] store
///
/// An `Object` is a lightweight view: it holds the resource identifier and,
/// optionally, a declared `rdf:type`. The declared type is written to the
/// store lazily, by the first mutating call or by [`Object::write_rdf_type`].
///
/// Equality, ordering and hashing only look at the identifier.
#[derive(Debug, Clone)]
pub struct Object {
    node: RdfSubject,
    rdf_type: Option<NamedNode>,
    type_pending: bool,
}

impl Object {
    /// Handle on the resource named `iri`; nothing is written
    pub fn new(iri: &str) -> ObjectResult<Self> {
        Ok(Self::from_subject(NamedNode::new(iri)?.into()))
    }

    /// Handle on `iri` with a declared type, written on first mutation
    pub fn with_type(iri: &str, type_iri: &str) -> ObjectResult<Self> {
        Ok(Self::from_subject(NamedNode::new(iri)?.into()).declare_type(NamedNode::new(type_iri)?))
    }

    /// Handle on a fresh blank node; nothing is written
    pub fn blank(f: &mut Factory) -> Self {
        Self::from_subject(f.create_blank_node().into())
    }

    /// Fresh blank node with a declared type, written on first mutation
    pub fn blank_with_type(f: &mut Factory, type_iri: &str) -> ObjectResult<Self> {
        let rdf_type = NamedNode::new(type_iri)?;
        Ok(Self::blank(f).declare_type(rdf_type))
    }

    /// Handle on an existing store resource
    pub fn from_subject(node: RdfSubject) -> Self {
        Self {
            node,
            rdf_type: None,
            type_pending: false,
        }
    }

    pub(super) fn declare_type(mut self, rdf_type: NamedNode) -> Self {
        self.rdf_type = Some(rdf_type);
        self.type_pending = true;
        self
    }

    /// Resource identifier
    pub fn node(&self) -> &RdfSubject {
        &self.node
    }

    /// IRI, or `None` for blank nodes
    pub fn iri(&self) -> Option<&str> {
        match &self.node {
            RdfSubject::NamedNode(n) => Some(n.as_str()),
            RdfSubject::BlankNode(_) => None,
        }
    }

    /// IRI or blank node identifier
    pub fn id(&self) -> &str {
        self.node.as_str()
    }

    pub fn is_blank(&self) -> bool {
        self.node.is_blank_node()
    }

    /// Declared type, whether or not it has been written yet
    pub fn declared_type(&self) -> Option<&str> {
        self.rdf_type.as_ref().map(|t| t.as_str())
    }

    /// Whether the declared type still has to be written
    pub fn is_type_pending(&self) -> bool {
        self.type_pending
    }

    /// Prefixed name of the resource; blank nodes render as `_:id`
    pub fn qname(&self, f: &Factory) -> String {
        match &self.node {
            RdfSubject::NamedNode(n) => f.qname(n.as_str()),
            RdfSubject::BlankNode(b) => b.to_string(),
        }
    }

    /// Write the declared type now if it is still pending
    ///
    /// Adds the type statement next to any other type; never removes one.
    pub fn write_rdf_type(&mut self, f: &mut Factory) {
        if !self.type_pending {
            return;
        }
        if let Some(rdf_type) = &self.rdf_type {
            f.add(Triple::new(
                self.node.clone(),
                vocab(rdf::TYPE),
                RdfObject::NamedNode(rdf_type.clone()),
            ));
        }
        self.type_pending = false;
    }

    pub(super) fn mark_type_written(mut self) -> Self {
        self.type_pending = false;
        self
    }

    /// Mark the declared type as pending again after the statements were removed
    pub(super) fn reset_type_pending(&mut self) {
        self.type_pending = self.rdf_type.is_some();
    }

    /// Whether the resource has type `type_iri`
    ///
    /// A declared type that is still pending counts; nothing is written.
    pub fn is_a(&self, f: &Factory, type_iri: &str) -> ObjectResult<bool> {
        let rdf_type = NamedNode::new(type_iri)?;
        if self.type_pending && self.rdf_type.as_ref() == Some(&rdf_type) {
            return Ok(true);
        }
        Ok(f.contains(&Triple::new(
            self.node.clone(),
            vocab(rdf::TYPE),
            RdfObject::NamedNode(rdf_type),
        )))
    }

    /// Stored `rdf:type` IRIs, in store order
    pub fn get_types(&self, f: &Factory) -> Vec<String> {
        f.find(Some(&self.node), Some(&vocab(rdf::TYPE)), None)
            .into_iter()
            .filter_map(|t| match t.object {
                RdfObject::NamedNode(n) => Some(n.as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    /// Stored types whose IRI starts with `namespace`
    pub fn get_types_in_namespace(&self, f: &Factory, namespace: &str) -> Vec<String> {
        self.get_types(f)
            .into_iter()
            .filter(|t| t.starts_with(namespace))
            .collect()
    }

    /// Identifier as a statement object
    pub(super) fn term(&self) -> RdfObject {
        RdfObject::from(self.node.clone())
    }

    pub(super) fn statement(&self, predicate: &RdfPredicate, object: RdfObject) -> Triple {
        Triple::new(self.node.clone(), predicate.clone(), object)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Object {
    /// Named resources first, then blank nodes, each by identifier
    fn cmp(&self, other: &Self) -> Ordering {
        subject_order(&self.node, &other.node)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

impl From<RdfSubject> for Object {
    fn from(node: RdfSubject) -> Self {
        Object::from_subject(node)
    }
}

pub(super) fn subject_order(a: &RdfSubject, b: &RdfSubject) -> Ordering {
    (a.is_blank_node(), a.as_str()).cmp(&(b.is_blank_node(), b.as_str()))
}

/// Predicate for a vocabulary constant
pub(super) fn vocab(iri: &'static str) -> RdfPredicate {
    RdfPredicate::new_unchecked(iri)
}

/// Named node object for a vocabulary constant
pub(super) fn vocab_node(iri: &'static str) -> RdfObject {
    RdfObject::NamedNode(NamedNode::new_unchecked(iri))
}

pub(super) fn predicate(iri: &str) -> ObjectResult<RdfPredicate> {
    Ok(RdfPredicate::new(iri)?)
}

pub(super) fn value_term(value: &PropertyValue) -> ObjectResult<RdfObject> {
    Ok(RdfObject::Literal(value.to_literal()?))
}
