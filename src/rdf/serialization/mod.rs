//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//!
//! Parsing always completes before triples are returned, so callers never
//! observe a partially parsed document.

mod rdfxml;
mod turtle;

use super::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfStore, RdfSubject, Triple};
use oxiri::Iri;
use std::path::Path;
use thiserror::Error;

pub use rdfxml::{RdfXmlParserWrapper, RdfXmlSerializerWrapper};
pub use turtle::{NTriplesParserWrapper, NTriplesSerializerWrapper, TurtleParserWrapper, TurtleSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf, .xml, .owl)
    RdfXml,
}

impl RdfFormat {
    /// Format from a file extension (case insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "rdf" | "xml" | "owl" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }

    /// Format from a path extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guess the format from document content
    pub fn sniff(content: &str) -> Self {
        let head = content.trim_start();
        if head.starts_with("<?xml") || head.starts_with("<rdf:RDF") {
            RdfFormat::RdfXml
        } else {
            RdfFormat::Turtle
        }
    }

    /// Format by extension, falling back to content sniffing
    pub fn detect(path: &Path, content: &str) -> Self {
        Self::from_path(path).unwrap_or_else(|| Self::sniff(content))
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Turtle / N-Triples syntax error
    #[error("Turtle syntax error: {0}")]
    Turtle(#[from] rio_turtle::TurtleError),

    /// RDF/XML syntax error
    #[error("RDF/XML syntax error: {0}")]
    RdfXml(#[from] rio_xml::RdfXmlError),

    /// Invalid base IRI
    #[error("Invalid base IRI {0}")]
    InvalidBaseIri(String),

    /// Term that cannot be represented
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
        let base = parse_base_iri(base_iri)?;
        match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input, base),
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input),
            RdfFormat::RdfXml => RdfXmlParserWrapper::parse(input, base),
        }
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(triples),
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(triples),
            RdfFormat::RdfXml => RdfXmlSerializerWrapper::serialize(triples),
        }
    }

    /// Serialize RDF store to a string
    pub fn serialize_store(store: &RdfStore, format: RdfFormat) -> SerializeResult<String> {
        let triples: Vec<Triple> = store.iter().cloned().collect();
        Self::serialize(&triples, format)
    }
}

fn parse_base_iri(base_iri: Option<&str>) -> ParseResult<Option<Iri<String>>> {
    match base_iri {
        None | Some("") => Ok(None),
        Some(base) => Iri::parse(base.to_string())
            .map(Some)
            .map_err(|e| ParseError::InvalidBaseIri(format!("{}: {}", base, e))),
    }
}

// rio model <-> crate model conversions shared by the format wrappers

fn convert_subject(s: rio_api::model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term) -> Result<RdfObject, ParseError> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            rio_api::model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

fn convert_triple(t: rio_api::model::Triple) -> Result<Triple, ParseError> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

/// Builds the borrowed rio view of a triple and hands it to `format`
fn with_rio_triple<R>(triple: &Triple, format: impl FnOnce(&rio_api::model::Triple<'_>) -> R) -> R {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => rio_api::model::Subject::NamedNode(rio_api::model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() }),
    };

    let predicate = rio_api::model::NamedNode {
        iri: triple.predicate.as_str(),
    };

    let datatype;
    let object = match &triple.object {
        RdfObject::NamedNode(n) => rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) if l.is_simple() => {
            rio_api::model::Term::Literal(rio_api::model::Literal::Simple { value: l.value() })
        }
        RdfObject::Literal(l) => match l.language() {
            Some(language) => rio_api::model::Term::Literal(rio_api::model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            }),
            None => {
                datatype = l.datatype();
                rio_api::model::Term::Literal(rio_api::model::Literal::Typed {
                    value: l.value(),
                    datatype: rio_api::model::NamedNode { iri: datatype.as_str() },
                })
            }
        },
    };

    format(&rio_api::model::Triple {
        subject,
        predicate,
        object,
    })
}
