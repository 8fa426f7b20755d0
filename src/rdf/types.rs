//! RDF terms and statements
//!
//! Terms wrap the oxrdf primitives, which validate IRIs, blank node ids and
//! language tags on construction. The three statement positions get their own
//! types so a literal can never end up as a subject or a blank node as a
//! predicate.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode};
use std::fmt;
use thiserror::Error;

use super::vocab::xsd;

/// Term construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Absolute IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    pub fn new(iri: &str) -> RdfResult<Self> {
        match OxNamedNode::new(iri) {
            Ok(node) => Ok(Self(node)),
            Err(e) => Err(RdfError::InvalidIri(format!("{} ({})", iri, e))),
        }
    }

    /// Skip validation; only for IRIs known to be valid, like vocabulary constants
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0.as_str())
    }
}

/// Anonymous resource
///
/// Ids come from [`RdfStore::create_blank_node`](super::RdfStore::create_blank_node)
/// and mean nothing outside the store that allocated them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    pub fn new(id: &str) -> RdfResult<Self> {
        match OxBlankNode::new(id) {
            Ok(node) => Ok(Self(node)),
            Err(e) => Err(RdfError::InvalidBlankNode(format!("{} ({})", id, e))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0.as_str())
    }
}

/// Literal: lexical form plus a datatype or a language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// `xsd:string` literal
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// `rdf:langString` literal; fails on a malformed language tag
    pub fn new_language_tagged_literal(value: impl Into<String>, language: impl Into<String>) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }

    /// Plain `xsd:string` literal, written without a datatype
    pub fn is_simple(&self) -> bool {
        self.language().is_none() && self.0.datatype().as_str() == xsd::STRING
    }
}

impl fmt::Display for Literal {
    /// N-Triples form: `"v"`, `"v"@lang` or `"v"^^<datatype>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.value().chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")?;

        match self.language() {
            Some(lang) => write!(f, "@{}", lang),
            None if self.is_simple() => Ok(()),
            None => write!(f, "^^{}", self.datatype()),
        }
    }
}

/// Statement subject: IRI or blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl RdfSubject {
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfSubject::BlankNode(_))
    }

    /// IRI or blank node id, undecorated
    pub fn as_str(&self) -> &str {
        match self {
            RdfSubject::NamedNode(n) => n.as_str(),
            RdfSubject::BlankNode(b) => b.as_str(),
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfSubject::BlankNode(b) => fmt::Display::fmt(b, f),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

/// Statement predicate, always an IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    pub fn new(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(Self)
    }

    /// See [`NamedNode::new_unchecked`]
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(NamedNode::new_unchecked(iri))
    }

    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

/// Statement object: a resource or a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl RdfObject {
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// The resource this object names, `None` for literals
    pub fn as_subject(&self) -> Option<RdfSubject> {
        match self {
            RdfObject::NamedNode(n) => Some(n.clone().into()),
            RdfObject::BlankNode(b) => Some(b.clone().into()),
            RdfObject::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        if let RdfObject::Literal(l) = self {
            Some(l)
        } else {
            None
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfObject::BlankNode(b) => fmt::Display::fmt(b, f),
            RdfObject::Literal(l) => fmt::Display::fmt(l, f),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

impl From<RdfSubject> for RdfObject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => n.into(),
            RdfSubject::BlankNode(b) => b.into(),
        }
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
}

impl Triple {
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    /// One N-Triples line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Statement pattern; a `None` position matches anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<RdfSubject>,
    pub predicate: Option<RdfPredicate>,
    pub object: Option<RdfObject>,
}

impl TriplePattern {
    pub fn new(subject: Option<RdfSubject>, predicate: Option<RdfPredicate>, object: Option<RdfObject>) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Pattern matching every statement
    pub fn any() -> Self {
        Self::default()
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        fn bound<T: PartialEq>(position: &Option<T>, value: &T) -> bool {
            position.as_ref().map_or(true, |expected| expected == value)
        }

        bound(&self.subject, &triple.subject)
            && bound(&self.predicate, &triple.predicate)
            && bound(&self.object, &triple.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "http://example.org/alice";
    const NAME: &str = "http://xmlns.com/foaf/0.1/name";

    #[test]
    fn test_invalid_terms() {
        assert!(matches!(NamedNode::new("no scheme"), Err(RdfError::InvalidIri(_))));
        assert!(matches!(BlankNode::new("has space"), Err(RdfError::InvalidBlankNode(_))));
        assert!(matches!(
            Literal::new_language_tagged_literal("x", "not a tag"),
            Err(RdfError::InvalidLiteral(_))
        ));
        assert!(RdfPredicate::new("").is_err());
    }

    #[test]
    fn test_ntriples_rendering() {
        let alice = NamedNode::new(ALICE).unwrap();
        let name = RdfPredicate::new(NAME).unwrap();
        let triple = Triple::new(
            alice.into(),
            name,
            Literal::new_simple_literal("Alice \"Al\"").into(),
        );
        assert_eq!(
            triple.to_string(),
            "<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice \\\"Al\\\"\" ."
        );

        let blank = BlankNode::new("b1").unwrap();
        assert_eq!(RdfObject::from(blank).to_string(), "_:b1");
        assert_eq!(
            Literal::new_language_tagged_literal("chat", "fr").unwrap().to_string(),
            "\"chat\"@fr"
        );
        let count = Literal::new_typed_literal("3", NamedNode::new_unchecked(xsd::INTEGER));
        assert_eq!(
            count.to_string(),
            "\"3\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn test_simple_literal() {
        assert!(Literal::new_simple_literal("x").is_simple());
        assert!(!Literal::new_language_tagged_literal("x", "en").unwrap().is_simple());
        let typed = Literal::new_typed_literal("x", NamedNode::new_unchecked(xsd::STRING));
        assert!(typed.is_simple());
        assert_eq!(typed, Literal::new_simple_literal("x"));
    }

    #[test]
    fn test_object_as_subject() {
        let subject = RdfSubject::from(BlankNode::new("b7").unwrap());
        let object = RdfObject::from(subject.clone());
        assert!(object.is_blank_node());
        assert_eq!(object.as_subject(), Some(subject));
        assert!(RdfObject::from(Literal::new_simple_literal("x")).as_subject().is_none());
    }

    #[test]
    fn test_pattern_positions() {
        let alice: RdfSubject = NamedNode::new(ALICE).unwrap().into();
        let name = RdfPredicate::new(NAME).unwrap();
        let value = RdfObject::from(Literal::new_simple_literal("Alice"));
        let triple = Triple::new(alice.clone(), name.clone(), value.clone());

        assert!(TriplePattern::any().matches(&triple));
        assert!(TriplePattern::new(Some(alice.clone()), Some(name.clone()), Some(value)).matches(&triple));
        assert!(TriplePattern::new(None, Some(name), None).matches(&triple));

        let other = RdfObject::from(Literal::new_simple_literal("Bob"));
        assert!(!TriplePattern::new(Some(alice), None, Some(other)).matches(&triple));
    }
}
