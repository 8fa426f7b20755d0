//! Property values and object relations
//!
//! Every accessor exists in a literal flavour (`*_property_value*`, taking
//! [`PropertyValue`]s) and a resource flavour (`*_object*`, taking
//! [`Object`]s). Both share the statement-level implementation below.
//!
//! Values of a predicate are either plain statements or reified statements.
//! Ordered values are always reified and carry their position on the
//! reification resource.

use super::error::{ObjectError, ObjectResult};
use super::factory::Factory;
use super::property_value::PropertyValue;
use super::reification::{
    can_unreify, create_wrapper, remove_wrapper, set_wrapper_order, wrapper_for, wrapper_order, wrapper_value,
    wrappers_for,
};
use super::resource::{predicate, value_term, Object};
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject};

impl Object {
    fn direct_values(&self, f: &Factory, p: &RdfPredicate) -> Vec<RdfObject> {
        f.find(Some(self.node()), Some(p), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    fn property_not_found(&self, p: &RdfPredicate) -> ObjectError {
        ObjectError::PropertyNotFound {
            property: p.as_str().to_string(),
            subject: self.to_string(),
        }
    }

    /// First plain value, else first reified one
    pub(super) fn get_term(&self, f: &Factory, p: &RdfPredicate) -> Option<RdfObject> {
        f.store().first_object(self.node(), p).or_else(|| {
            wrappers_for(f, self.node(), p)
                .iter()
                .find_map(|r| wrapper_value(f, r))
        })
    }

    /// Ordered reification resources of `p`, sorted by position
    fn ordered_wrappers(&self, f: &Factory, p: &RdfPredicate) -> ObjectResult<Vec<(i64, RdfSubject)>> {
        let cannot_preserve = || ObjectError::CannotPreserveOrder {
            property: p.as_str().to_string(),
            subject: self.to_string(),
        };

        if f.store().first_object(self.node(), p).is_some() {
            return Err(cannot_preserve());
        }

        let mut ordered = wrappers_for(f, self.node(), p)
            .into_iter()
            .map(|r| wrapper_order(f, &r).map(|position| (position, r)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(cannot_preserve)?;
        ordered.sort_by_key(|(position, _)| *position);
        Ok(ordered)
    }

    pub(super) fn term_list(&self, f: &Factory, p: &RdfPredicate, preserve_order: bool) -> ObjectResult<Vec<RdfObject>> {
        if preserve_order {
            return Ok(self
                .ordered_wrappers(f, p)?
                .iter()
                .filter_map(|(_, r)| wrapper_value(f, r))
                .collect());
        }

        let mut values = self.direct_values(f, p);
        values.extend(
            wrappers_for(f, self.node(), p)
                .iter()
                .filter_map(|r| wrapper_value(f, r)),
        );
        Ok(values)
    }

    pub(super) fn add_term(
        &mut self,
        f: &mut Factory,
        p: &RdfPredicate,
        o: RdfObject,
        preserve_order: bool,
    ) -> ObjectResult<()> {
        f.aggregate(|f| {
            self.write_rdf_type(f);
            // A reified value is already present, ordered or not
            if wrapper_for(f, self.node(), p, &o).is_some() {
                return Ok(());
            }
            if !preserve_order {
                f.add(self.statement(p, o));
                return Ok(());
            }

            let next = wrappers_for(f, self.node(), p)
                .iter()
                .filter_map(|r| wrapper_order(f, r))
                .max()
                .unwrap_or(0)
                + 1;
            create_wrapper(f, self.node(), p, &o, Some(next));
            Ok(())
        })
    }

    /// Replace every value of `p`; nothing is written when a reified value cannot be dropped
    pub(super) fn set_term_list(
        &mut self,
        f: &mut Factory,
        p: &RdfPredicate,
        values: &[RdfObject],
        preserve_order: bool,
    ) -> ObjectResult<()> {
        f.aggregate(|f| {
            let wrappers = wrappers_for(f, self.node(), p);
            if let Some(r) = wrappers.iter().find(|r| !can_unreify(f, r)) {
                let value = wrapper_value(f, r).map(|v| v.to_string()).unwrap_or_default();
                return Err(ObjectError::CannotUnreify(format!("{} {} {}", self, p, value)));
            }

            self.write_rdf_type(f);
            for r in &wrappers {
                remove_wrapper(f, r);
            }
            f.remove_matching(Some(self.node()), Some(p), None);

            for (i, value) in values.iter().enumerate() {
                if preserve_order {
                    create_wrapper(f, self.node(), p, value, Some(i as i64 + 1));
                } else {
                    f.add(self.statement(p, value.clone()));
                }
            }
            Ok(())
        })
    }

    /// Remove one value, dropping its reification resource if it has one
    pub(super) fn remove_term(&mut self, f: &mut Factory, p: &RdfPredicate, o: &RdfObject) -> ObjectResult<()> {
        f.aggregate(|f| {
            if let Some(r) = wrapper_for(f, self.node(), p, o) {
                if !can_unreify(f, &r) {
                    return Err(ObjectError::CannotUnreify(self.statement(p, o.clone()).to_string()));
                }
                remove_wrapper(f, &r);
                return Ok(());
            }

            if !f.remove(&self.statement(p, o.clone())) {
                return Err(self.property_not_found(p));
            }
            Ok(())
        })
    }

    /// Swap one value for another, keeping its position when ordered
    pub(super) fn replace_term(
        &mut self,
        f: &mut Factory,
        p: &RdfPredicate,
        old: &RdfObject,
        new: RdfObject,
    ) -> ObjectResult<()> {
        f.aggregate(|f| {
            match wrapper_for(f, self.node(), p, old) {
                Some(r) => {
                    if !can_unreify(f, &r) {
                        return Err(ObjectError::CannotUnreify(self.statement(p, old.clone()).to_string()));
                    }
                    let position = wrapper_order(f, &r);
                    self.write_rdf_type(f);
                    remove_wrapper(f, &r);
                    create_wrapper(f, self.node(), p, &new, position);
                }
                None => {
                    let statement = self.statement(p, old.clone());
                    if !f.contains(&statement) {
                        return Err(self.property_not_found(p));
                    }
                    self.write_rdf_type(f);
                    f.remove(&statement);
                    f.add(self.statement(p, new));
                }
            }
            Ok(())
        })
    }

    /// Move an ordered value to `position` (0-based, clamped to the last slot)
    pub(super) fn move_term(
        &mut self,
        f: &mut Factory,
        p: &RdfPredicate,
        o: &RdfObject,
        position: usize,
    ) -> ObjectResult<()> {
        f.aggregate(|f| {
            let not_ordered = || ObjectError::NotOrdered(format!("{} {} {}", self, p, o));

            let r = wrapper_for(f, self.node(), p, o)
                .filter(|r| wrapper_order(f, r).is_some())
                .ok_or_else(not_ordered)?;
            let mut ordered = self.ordered_wrappers(f, p)?;
            let from = ordered
                .iter()
                .position(|(_, w)| *w == r)
                .ok_or_else(not_ordered)?;

            let entry = ordered.remove(from);
            let to = position.min(ordered.len());
            ordered.insert(to, entry);

            self.write_rdf_type(f);
            for (i, (_, w)) in ordered.iter().enumerate() {
                set_wrapper_order(f, w, i as i64 + 1);
            }
            Ok(())
        })
    }

    fn to_value(p: &RdfPredicate, term: RdfObject) -> ObjectResult<PropertyValue> {
        match term {
            RdfObject::Literal(l) => Ok(PropertyValue::from_literal(&l)),
            _ => Err(ObjectError::InvalidNodeType {
                property: p.as_str().to_string(),
                expected: "literal",
            }),
        }
    }

    fn to_object(p: &RdfPredicate, term: RdfObject) -> ObjectResult<Object> {
        term.as_subject()
            .map(Object::from_subject)
            .ok_or_else(|| ObjectError::InvalidNodeType {
                property: p.as_str().to_string(),
                expected: "resource",
            })
    }

    // Literal properties

    /// Single value of `pred`
    ///
    /// Fails with [`ObjectError::PropertyNotFound`] when there is none and with
    /// [`ObjectError::InvalidNodeType`] when it is a resource.
    pub fn get_property_value(&self, f: &Factory, pred: &str) -> ObjectResult<PropertyValue> {
        let p = predicate(pred)?;
        let term = self.get_term(f, &p).ok_or_else(|| self.property_not_found(&p))?;
        Self::to_value(&p, term)
    }

    /// Single value of `pred`, `None` when there is none
    pub fn get_optional_property_value(&self, f: &Factory, pred: &str) -> ObjectResult<Option<PropertyValue>> {
        let p = predicate(pred)?;
        self.get_term(f, &p).map(|term| Self::to_value(&p, term)).transpose()
    }

    /// Single value of `pred`, `default` only when there is no statement
    pub fn get_property_value_or(
        &self,
        f: &Factory,
        pred: &str,
        default: impl Into<PropertyValue>,
    ) -> ObjectResult<PropertyValue> {
        Ok(self
            .get_optional_property_value(f, pred)?
            .unwrap_or_else(|| default.into()))
    }

    /// All values of `pred`
    ///
    /// With `preserve_order` the values come back in list order, and the call
    /// fails with [`ObjectError::CannotPreserveOrder`] if any value was
    /// written without order.
    pub fn get_property_value_list(
        &self,
        f: &Factory,
        pred: &str,
        preserve_order: bool,
    ) -> ObjectResult<Vec<PropertyValue>> {
        let p = predicate(pred)?;
        self.term_list(f, &p, preserve_order)?
            .into_iter()
            .map(|term| Self::to_value(&p, term))
            .collect()
    }

    /// Replace all values of `pred` with `value`
    pub fn set_property_value(&mut self, f: &mut Factory, pred: &str, value: impl Into<PropertyValue>) -> ObjectResult<()> {
        let term = value_term(&value.into())?;
        self.set_term_list(f, &predicate(pred)?, &[term], false)
    }

    /// Add a value to `pred`, at the end of the list when `preserve_order`
    pub fn add_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
        preserve_order: bool,
    ) -> ObjectResult<()> {
        let term = value_term(&value.into())?;
        self.add_term(f, &predicate(pred)?, term, preserve_order)
    }

    /// Replace all values of `pred` with `values`
    pub fn set_property_value_list(
        &mut self,
        f: &mut Factory,
        pred: &str,
        values: &[PropertyValue],
        preserve_order: bool,
    ) -> ObjectResult<()> {
        let terms = values.iter().map(value_term).collect::<ObjectResult<Vec<_>>>()?;
        self.set_term_list(f, &predicate(pred)?, &terms, preserve_order)
    }

    /// Remove one value of `pred`
    pub fn remove_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
    ) -> ObjectResult<()> {
        let term = value_term(&value.into())?;
        self.remove_term(f, &predicate(pred)?, &term)
    }

    /// Replace `old` by `new`, keeping its list position
    pub fn replace_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        old: impl Into<PropertyValue>,
        new: impl Into<PropertyValue>,
    ) -> ObjectResult<()> {
        let old = value_term(&old.into())?;
        let new = value_term(&new.into())?;
        self.replace_term(f, &predicate(pred)?, &old, new)
    }

    /// Move an ordered value to `position`
    pub fn move_property_value(
        &mut self,
        f: &mut Factory,
        pred: &str,
        value: impl Into<PropertyValue>,
        position: usize,
    ) -> ObjectResult<()> {
        let term = value_term(&value.into())?;
        self.move_term(f, &predicate(pred)?, &term, position)
    }

    // Object relations

    /// Single object of `pred`
    pub fn get_object(&self, f: &Factory, pred: &str) -> ObjectResult<Object> {
        let p = predicate(pred)?;
        let term = self.get_term(f, &p).ok_or_else(|| self.property_not_found(&p))?;
        Self::to_object(&p, term)
    }

    /// Single object of `pred`, `None` when there is none
    pub fn get_optional_object(&self, f: &Factory, pred: &str) -> ObjectResult<Option<Object>> {
        let p = predicate(pred)?;
        self.get_term(f, &p).map(|term| Self::to_object(&p, term)).transpose()
    }

    /// All objects of `pred`
    pub fn get_object_list(&self, f: &Factory, pred: &str, preserve_order: bool) -> ObjectResult<Vec<Object>> {
        let p = predicate(pred)?;
        self.term_list(f, &p, preserve_order)?
            .into_iter()
            .map(|term| Self::to_object(&p, term))
            .collect()
    }

    /// Replace all objects of `pred` with `object`
    pub fn set_object(&mut self, f: &mut Factory, pred: &str, object: &Object) -> ObjectResult<()> {
        self.set_term_list(f, &predicate(pred)?, &[object.term()], false)
    }

    /// Add an object to `pred`, at the end of the list when `preserve_order`
    pub fn add_object(&mut self, f: &mut Factory, pred: &str, object: &Object, preserve_order: bool) -> ObjectResult<()> {
        self.add_term(f, &predicate(pred)?, object.term(), preserve_order)
    }

    /// Replace all objects of `pred` with `objects`
    pub fn set_object_list(
        &mut self,
        f: &mut Factory,
        pred: &str,
        objects: &[Object],
        preserve_order: bool,
    ) -> ObjectResult<()> {
        let terms: Vec<RdfObject> = objects.iter().map(Object::term).collect();
        self.set_term_list(f, &predicate(pred)?, &terms, preserve_order)
    }

    /// Remove one object of `pred`
    pub fn remove_object(&mut self, f: &mut Factory, pred: &str, object: &Object) -> ObjectResult<()> {
        self.remove_term(f, &predicate(pred)?, &object.term())
    }

    /// Replace `old` by `new`, keeping its list position
    pub fn replace_object(&mut self, f: &mut Factory, pred: &str, old: &Object, new: &Object) -> ObjectResult<()> {
        self.replace_term(f, &predicate(pred)?, &old.term(), new.term())
    }

    /// Move an ordered object to `position`
    pub fn move_object(&mut self, f: &mut Factory, pred: &str, object: &Object, position: usize) -> ObjectResult<()> {
        self.move_term(f, &predicate(pred)?, &object.term(), position)
    }
}
