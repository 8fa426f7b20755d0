//! Lookups over the whole store and graph neighbourhoods of an object

use indexmap::IndexSet;
use tracing::warn;

use super::error::{ObjectError, ObjectResult};
use super::factory::Factory;
use super::property_value::PropertyValue;
use super::reification::{wrapper_predicate, wrapper_subject, wrapper_value, wrappers_of};
use super::resource::{predicate, subject_order, value_term, vocab, Object};
use crate::rdf::vocab::rdf;
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfSubject};

/// Subjects of `(s, p, o)`, plain or reified, in store order
fn subjects_with(f: &Factory, p: &RdfPredicate, o: &RdfObject) -> Vec<RdfSubject> {
    let mut subjects: IndexSet<RdfSubject> = f
        .find(None, Some(p), Some(o))
        .into_iter()
        .map(|t| t.subject)
        .collect();

    for t in f.find(None, Some(&vocab(rdf::OBJECT)), Some(o)) {
        if wrapper_predicate(f, &t.subject).as_ref() == Some(p) {
            if let Some(subject) = wrapper_subject(f, &t.subject) {
                subjects.insert(subject);
            }
        }
    }
    subjects.into_iter().collect()
}

/// Resources with a statement pointing at `node`
///
/// A reification resource stands for the subject of the statement it
/// carries. `node` itself is never part of the result.
pub(super) fn sources_of(f: &Factory, node: &RdfSubject) -> Vec<RdfSubject> {
    let mut sources = IndexSet::new();
    for t in f.find(None, None, Some(&RdfObject::from(node.clone()))) {
        let source = wrapper_subject(f, &t.subject).unwrap_or(t.subject);
        if &source != node {
            sources.insert(source);
        }
    }
    sources.into_iter().collect()
}

fn pick_key_match(candidates: Vec<RdfSubject>, description: String) -> ObjectResult<Object> {
    if candidates.len() > 1 {
        warn!(
            "{} matches {} resources, using the smallest identifier",
            description,
            candidates.len()
        );
    }
    candidates
        .into_iter()
        .min_by(subject_order)
        .map(Object::from_subject)
        .ok_or(ObjectError::ObjectNotFound(description))
}

impl Object {
    /// Every distinct subject of the store
    pub fn find_all(f: &Factory) -> Vec<Object> {
        f.store().subjects().into_iter().map(Object::from_subject).collect()
    }

    /// Every resource with type `type_iri`, in store order
    pub fn find_by_type(f: &Factory, type_iri: &str) -> ObjectResult<Vec<Object>> {
        let rdf_type = RdfObject::NamedNode(NamedNode::new(type_iri)?);
        Ok(f.find(None, Some(&vocab(rdf::TYPE)), Some(&rdf_type))
            .into_iter()
            .map(|t| t.subject)
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(Object::from_subject)
            .collect())
    }

    /// Every resource having at least one of `type_iris`
    pub fn find_by_types(f: &Factory, type_iris: &[&str]) -> ObjectResult<Vec<Object>> {
        let mut found = IndexSet::new();
        for type_iri in type_iris {
            found.extend(Self::find_by_type(f, type_iri)?);
        }
        Ok(found.into_iter().collect())
    }

    /// The resource with `(s, pred, value)`
    ///
    /// Fails with [`ObjectError::ObjectNotFound`] when there is none. When
    /// several resources match, the one with the smallest identifier wins
    /// (IRIs before blank nodes).
    pub fn find_by_key(f: &Factory, pred: &str, value: impl Into<PropertyValue>) -> ObjectResult<Object> {
        let value = value.into();
        let p = predicate(pred)?;
        let candidates = subjects_with(f, &p, &value_term(&value)?);
        pick_key_match(candidates, format!("{} \"{}\"", pred, value))
    }

    /// The resource with `(s, pred, object)`, same rules as [`Object::find_by_key`]
    pub fn find_by_key_object(f: &Factory, pred: &str, object: &Object) -> ObjectResult<Object> {
        let p = predicate(pred)?;
        let candidates = subjects_with(f, &p, &object.term());
        pick_key_match(candidates, format!("{} {}", pred, object))
    }

    /// Every resource with `(s, pred, value)`, in store order
    pub fn find_by_value(f: &Factory, pred: &str, value: impl Into<PropertyValue>) -> ObjectResult<Vec<Object>> {
        let p = predicate(pred)?;
        Ok(subjects_with(f, &p, &value_term(&value.into())?)
            .into_iter()
            .map(Object::from_subject)
            .collect())
    }

    /// Every resource with `(s, pred, object)`, in store order
    pub fn find_by_value_object(f: &Factory, pred: &str, object: &Object) -> ObjectResult<Vec<Object>> {
        let p = predicate(pred)?;
        Ok(subjects_with(f, &p, &object.term())
            .into_iter()
            .map(Object::from_subject)
            .collect())
    }

    /// Resources referring to this one
    pub fn find_sources(&self, f: &Factory) -> Vec<Object> {
        sources_of(f, self.node())
            .into_iter()
            .map(Object::from_subject)
            .collect()
    }

    /// Resources this one refers to, through plain or reified statements
    pub fn find_targets(&self, f: &Factory) -> Vec<Object> {
        let mut targets = IndexSet::new();
        for t in f.find(Some(self.node()), None, None) {
            targets.extend(t.object.as_subject());
        }
        for r in wrappers_of(f, self.node()) {
            targets.extend(wrapper_value(f, &r).and_then(|o| o.as_subject()));
        }
        targets.shift_remove(self.node());
        targets.into_iter().map(Object::from_subject).collect()
    }

    /// Resources that are the object of a reified statement of this one
    pub fn find_reified(&self, f: &Factory) -> Vec<Object> {
        wrappers_of(f, self.node())
            .iter()
            .filter_map(|r| wrapper_value(f, r).and_then(|o| o.as_subject()))
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(Object::from_subject)
            .collect()
    }
}
