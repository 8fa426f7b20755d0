//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation (QNames).

use indexmap::IndexMap;
use thiserror::Error;

use super::vocab;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not a prefix:local name
    #[error("Not a compact IRI: {0}")]
    InvalidCompactIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Namespace manager
///
/// Registering a prefix twice replaces the earlier IRI.
#[derive(Debug, Clone, Default)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in registration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty namespace manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace manager seeded with the usual RDF/RDFS/OWL prefixes
    pub fn with_common_prefixes() -> Self {
        let mut mgr = Self::new();
        mgr.add_prefix("rdf", vocab::rdf::NS);
        mgr.add_prefix("rdfs", vocab::rdfs::NS);
        mgr.add_prefix("xsd", vocab::xsd::NS);
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr
    }

    /// Add a prefix, replacing any previous mapping for it
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        match compact_iri.split_once(':') {
            Some((prefix, local)) => {
                let iri = self.get_iri(prefix)?;
                Ok(format!("{}{}", iri, local))
            }
            None => Err(PrefixError::InvalidCompactIri(compact_iri.to_string())),
        }
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace_iri)| !namespace_iri.is_empty() && iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(_, namespace_iri)| namespace_iri.len())
            .map(|(prefix, namespace_iri)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }

    /// QName rendering: compact form, or the IRI itself when no prefix matches
    pub fn qname(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| iri.to_string())
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}
