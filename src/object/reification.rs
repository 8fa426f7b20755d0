//! Statement reification
//!
//! A reified statement `(S, P, O)` is carried by a blank resource `R`:
//!
//! ```text
//! R rdf:type      rdf:Statement
//! R rdf:subject   S
//! R rdf:predicate P
//! R rdf:object    O
//! ```
//!
//! The direct statement is not kept while the statement is reified. Ordered
//! values are reified statements whose resource also carries an `order`
//! integer.

use indexmap::IndexSet;

use super::error::{ObjectError, ObjectResult};
use super::factory::Factory;
use super::property_value::PropertyValue;
use super::resource::{predicate, value_term, vocab, vocab_node, Object};
use crate::rdf::vocab::{order, rdf, xsd};
use crate::rdf::{Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};

/// Reification resources of every statement of `subject`, in store order
pub(super) fn wrappers_of(f: &Factory, subject: &RdfSubject) -> Vec<RdfSubject> {
    f.find(None, Some(&vocab(rdf::SUBJECT)), Some(&RdfObject::from(subject.clone())))
        .into_iter()
        .map(|t| t.subject)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Reification resources of the statements `(subject, p, *)`
pub(super) fn wrappers_for(f: &Factory, subject: &RdfSubject, p: &RdfPredicate) -> Vec<RdfSubject> {
    let p_term = RdfObject::NamedNode(p.as_named_node().clone());
    wrappers_of(f, subject)
        .into_iter()
        .filter(|r| f.contains(&Triple::new(r.clone(), vocab(rdf::PREDICATE), p_term.clone())))
        .collect()
}

/// Reification resource of the statement `(subject, p, o)`
pub(super) fn wrapper_for(
    f: &Factory,
    subject: &RdfSubject,
    p: &RdfPredicate,
    o: &RdfObject,
) -> Option<RdfSubject> {
    wrappers_for(f, subject, p)
        .into_iter()
        .find(|r| wrapper_value(f, r).as_ref() == Some(o))
}

/// Statement subject carried by a reification resource
pub(super) fn wrapper_subject(f: &Factory, r: &RdfSubject) -> Option<RdfSubject> {
    f.store()
        .first_object(r, &vocab(rdf::SUBJECT))
        .and_then(|o| o.as_subject())
}

/// Statement predicate carried by a reification resource
pub(super) fn wrapper_predicate(f: &Factory, r: &RdfSubject) -> Option<RdfPredicate> {
    match f.store().first_object(r, &vocab(rdf::PREDICATE)) {
        Some(RdfObject::NamedNode(n)) => Some(RdfPredicate::from(n)),
        _ => None,
    }
}

/// Statement object carried by a reification resource
pub(super) fn wrapper_value(f: &Factory, r: &RdfSubject) -> Option<RdfObject> {
    f.store().first_object(r, &vocab(rdf::OBJECT))
}

/// Position of an ordered value, if the reification resource carries one
pub(super) fn wrapper_order(f: &Factory, r: &RdfSubject) -> Option<i64> {
    match f.store().first_object(r, &vocab(order::ORDER)) {
        Some(RdfObject::Literal(l)) => l.value().parse().ok(),
        _ => None,
    }
}

pub(super) fn set_wrapper_order(f: &mut Factory, r: &RdfSubject, position: i64) {
    for t in f.find(Some(r), Some(&vocab(order::ORDER)), None) {
        f.remove(&t);
    }
    f.add(Triple::new(r.clone(), vocab(order::ORDER), order_literal(position)));
}

fn order_literal(position: i64) -> RdfObject {
    RdfObject::Literal(Literal::new_typed_literal(
        position.to_string(),
        NamedNode::new_unchecked(xsd::INTEGER),
    ))
}

/// Whether the reification resource only carries reification bookkeeping
pub(super) fn can_unreify(f: &Factory, r: &RdfSubject) -> bool {
    let statement_type = vocab_node(rdf::STATEMENT);
    f.store().get_triples_with_subject(r).iter().all(|t| match t.predicate.as_str() {
        rdf::SUBJECT | rdf::PREDICATE | rdf::OBJECT | order::ORDER => true,
        rdf::TYPE => t.object == statement_type,
        _ => false,
    })
}

/// Reification resource for `(subject, p, o)`, without any check
///
/// A direct statement `(subject, p, o)` is left in place.
pub(super) fn create_wrapper(
    f: &mut Factory,
    subject: &RdfSubject,
    p: &RdfPredicate,
    o: &RdfObject,
    position: Option<i64>,
) -> RdfSubject {
    let r: RdfSubject = f.create_blank_node().into();
    f.add(Triple::new(r.clone(), vocab(rdf::TYPE), vocab_node(rdf::STATEMENT)));
    f.add(Triple::new(r.clone(), vocab(rdf::SUBJECT), RdfObject::from(subject.clone())));
    f.add(Triple::new(
        r.clone(),
        vocab(rdf::PREDICATE),
        RdfObject::NamedNode(p.as_named_node().clone()),
    ));
    f.add(Triple::new(r.clone(), vocab(rdf::OBJECT), o.clone()));
    if let Some(position) = position {
        f.add(Triple::new(r.clone(), vocab(order::ORDER), order_literal(position)));
    }
    r
}

/// Delete every statement of a reification resource
pub(super) fn remove_wrapper(f: &mut Factory, r: &RdfSubject) {
    f.remove_matching(Some(r), None, None);
}

impl Object {
    pub(super) fn reify_term(&mut self, f: &mut Factory, p: &RdfPredicate, o: &RdfObject) -> ObjectResult<Object> {
        f.aggregate(|f| {
            if wrapper_for(f, self.node(), p, o).is_some() {
                return Err(ObjectError::AlreadyReified(self.statement(p, o.clone()).to_string()));
            }
            self.write_rdf_type(f);
            f.remove(&self.statement(p, o.clone()));
            Ok(Object::from_subject(create_wrapper(f, self.node(), p, o, None)))
        })
    }

    pub(super) fn unreify_term(&mut self, f: &mut Factory, p: &RdfPredicate, o: &RdfObject) -> ObjectResult<()> {
        f.aggregate(|f| {
            let Some(r) = wrapper_for(f, self.node(), p, o) else {
                return Ok(());
            };
            if !can_unreify(f, &r) {
                return Err(ObjectError::CannotUnreify(self.statement(p, o.clone()).to_string()));
            }
            remove_wrapper(f, &r);
            f.add(self.statement(p, o.clone()));
            Ok(())
        })
    }

    /// Reify the statement `(self, pred, value)`, creating it if needed
    ///
    /// Returns the reification resource so further properties can be
    /// attached to the statement. Fails with [`ObjectError::AlreadyReified`]
    /// when the statement already has one.
    pub fn reify_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
    ) -> ObjectResult<Object> {
        let term = value_term(&value.into())?;
        self.reify_term(f, &predicate(pred)?, &term)
    }

    /// Reify the statement `(self, pred, object)`, creating it if needed
    pub fn reify_object(&mut self, f: &mut Factory, pred: &str, object: &Object) -> ObjectResult<Object> {
        self.reify_term(f, &predicate(pred)?, &object.term())
    }

    /// Reification resource of `(self, pred, value)`, if the statement is reified
    pub fn reified_property_value(
        &self,
        f: &Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
    ) -> ObjectResult<Option<Object>> {
        let term = value_term(&value.into())?;
        Ok(wrapper_for(f, self.node(), &predicate(pred)?, &term).map(Object::from_subject))
    }

    /// Reification resource of `(self, pred, object)`, if the statement is reified
    pub fn reified_object(&self, f: &Factory, pred: &str, object: &Object) -> ObjectResult<Option<Object>> {
        Ok(wrapper_for(f, self.node(), &predicate(pred)?, &object.term()).map(Object::from_subject))
    }

    /// Drop the reification of `(self, pred, value)` and restore the plain statement
    ///
    /// No-op when the statement is not reified. Fails with
    /// [`ObjectError::CannotUnreify`] while the reification resource carries
    /// properties of its own.
    pub fn unreify_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
    ) -> ObjectResult<()> {
        let term = value_term(&value.into())?;
        self.unreify_term(f, &predicate(pred)?, &term)
    }

    /// Drop the reification of `(self, pred, object)` and restore the plain statement
    pub fn unreify_object(&mut self, f: &mut Factory, pred: &str, object: &Object) -> ObjectResult<()> {
        self.unreify_term(f, &predicate(pred)?, &object.term())
    }
}
