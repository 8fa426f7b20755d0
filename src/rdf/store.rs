//! RDF triple store implementation
//!
//! This module provides an in-memory RDF store with efficient indexing.
//! Iteration order is insertion order, which keeps every query result
//! deterministic.

use super::types::{BlankNode, RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::IndexSet;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfStoreError {
    /// Triple not found
    #[error("Triple not found: {0}")]
    TripleNotFound(String),

    /// Duplicate triple
    #[error("Duplicate triple: {0}")]
    DuplicateTriple(String),
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// Default prefix for allocated blank node identifiers
pub const DEFAULT_BLANK_PREFIX: &str = "b";

/// Insertion sequence number of a stored triple
type Seq = u64;

/// RDF triple store with one index per triple position
///
/// Every triple gets a sequence number when it is added. The indexes map a
/// term to the sequence numbers of its triples:
///
/// - subject index: Subject -> triples
/// - predicate index: Predicate -> triples
/// - object index: Object -> triples
///
/// Sequence numbers only grow, so walking any index in key order returns the
/// same relative order as a full scan. Adding and removing a triple are both
/// logarithmic.
#[derive(Debug, Clone)]
pub struct RdfStore {
    /// All triples (primary storage), by sequence number
    triples: BTreeMap<Seq, Triple>,

    /// Sequence number of each stored triple
    seqs: HashMap<Triple, Seq>,

    subject_index: HashMap<RdfSubject, BTreeSet<Seq>>,

    predicate_index: HashMap<RdfPredicate, BTreeSet<Seq>>,

    object_index: HashMap<RdfObject, BTreeSet<Seq>>,

    next_seq: Seq,

    /// Prefix of allocated blank node identifiers
    blank_prefix: String,

    /// Next blank node counter value
    next_blank_id: u64,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::with_blank_prefix(DEFAULT_BLANK_PREFIX)
    }

    /// Create an empty store whose blank nodes are named `<prefix><n>`
    pub fn with_blank_prefix(prefix: impl Into<String>) -> Self {
        Self {
            triples: BTreeMap::new(),
            seqs: HashMap::new(),
            subject_index: HashMap::new(),
            predicate_index: HashMap::new(),
            object_index: HashMap::new(),
            next_seq: 0,
            blank_prefix: prefix.into(),
            next_blank_id: 0,
        }
    }

    /// Insert a triple into the store, rejecting duplicates
    pub fn insert(&mut self, triple: Triple) -> RdfStoreResult<()> {
        if self.seqs.contains_key(&triple) {
            return Err(RdfStoreError::DuplicateTriple(triple.to_string()));
        }
        self.add(triple);
        Ok(())
    }

    /// Add a triple; returns false if it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        if self.seqs.contains_key(&triple) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.update_indices_insert(seq, &triple);
        self.seqs.insert(triple.clone(), seq);
        self.triples.insert(seq, triple);
        true
    }

    /// Remove a triple from the store
    pub fn remove(&mut self, triple: &Triple) -> RdfStoreResult<()> {
        let seq = self
            .seqs
            .remove(triple)
            .ok_or_else(|| RdfStoreError::TripleNotFound(triple.to_string()))?;
        self.triples.remove(&seq);
        self.update_indices_remove(seq, triple);
        Ok(())
    }

    /// Remove every triple matching a pattern, returning the removed triples
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> Vec<Triple> {
        let matched = self.query(pattern);
        for triple in &matched {
            if let Some(seq) = self.seqs.remove(triple) {
                self.triples.remove(&seq);
                self.update_indices_remove(seq, triple);
            }
        }
        matched
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.seqs.contains_key(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Query triples matching a pattern, in insertion order
    ///
    /// Candidates come from the most selective bound position.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        let candidates = if let Some(subject) = &pattern.subject {
            self.subject_index.get(subject)
        } else if let Some(object) = &pattern.object {
            self.object_index.get(object)
        } else if let Some(predicate) = &pattern.predicate {
            self.predicate_index.get(predicate)
        } else {
            return self.triples.values().cloned().collect();
        };

        match candidates {
            Some(set) => self
                .resolve(set)
                .filter(|triple| pattern.matches(triple))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get triples with a specific subject
    pub fn get_triples_with_subject(&self, subject: &RdfSubject) -> Vec<Triple> {
        self.subject_index
            .get(subject)
            .map(|set| self.resolve(set).cloned().collect())
            .unwrap_or_default()
    }

    /// First object for a subject/predicate pair
    pub fn first_object(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Option<RdfObject> {
        self.subject_index.get(subject).and_then(|set| {
            self.resolve(set)
                .find(|t| &t.predicate == predicate)
                .map(|t| t.object.clone())
        })
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.values()
    }

    /// Get all distinct subjects in the store, in first-seen order
    pub fn subjects(&self) -> Vec<RdfSubject> {
        self.triples
            .values()
            .map(|t| t.subject.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Check whether a resource appears as subject or object of any triple
    pub fn mentions(&self, resource: &RdfSubject) -> bool {
        self.subject_index.contains_key(resource)
            || self
                .object_index
                .contains_key(&RdfObject::from(resource.clone()))
    }

    /// Allocate a blank node identifier unique within this store
    pub fn create_blank_node(&mut self) -> BlankNode {
        loop {
            let id = format!("{}{}", self.blank_prefix, self.next_blank_id);
            self.next_blank_id += 1;
            // A prefix that is not a valid blank node label falls back to the default one
            let node = match BlankNode::new(&id) {
                Ok(node) => node,
                Err(_) => {
                    self.blank_prefix = DEFAULT_BLANK_PREFIX.to_string();
                    continue;
                }
            };
            if !self.mentions(&RdfSubject::BlankNode(node.clone())) {
                return node;
            }
        }
    }

    // Private helper methods

    fn resolve<'a>(&'a self, seqs: &'a BTreeSet<Seq>) -> impl Iterator<Item = &'a Triple> + 'a {
        seqs.iter().filter_map(move |seq| self.triples.get(seq))
    }

    fn update_indices_insert(&mut self, seq: Seq, triple: &Triple) {
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .insert(seq);

        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .insert(seq);

        self.object_index
            .entry(triple.object.clone())
            .or_default()
            .insert(seq);
    }

    fn update_indices_remove(&mut self, seq: Seq, triple: &Triple) {
        if let Some(set) = self.subject_index.get_mut(&triple.subject) {
            set.remove(&seq);
            if set.is_empty() {
                self.subject_index.remove(&triple.subject);
            }
        }

        if let Some(set) = self.predicate_index.get_mut(&triple.predicate) {
            set.remove(&seq);
            if set.is_empty() {
                self.predicate_index.remove(&triple.predicate);
            }
        }

        if let Some(set) = self.object_index.get_mut(&triple.object) {
            set.remove(&seq);
            if set.is_empty() {
                self.object_index.remove(&triple.object);
            }
        }
    }
}

impl Default for RdfStore {
    fn default() -> Self {
        Self::new()
    }
}
