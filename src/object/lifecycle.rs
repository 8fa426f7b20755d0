//! Removal, cloning and JSON rendering of objects

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ObjectResult;
use super::factory::Factory;
use super::reification::{
    create_wrapper, wrapper_for, wrapper_predicate, wrapper_subject, wrapper_value, wrappers_of,
};
use super::resource::{vocab, Object};
use super::traversal::sources_of;
use crate::rdf::vocab::rdf;
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};

/// Filter deciding which resources a clone leaves behind
///
/// Called with a blank object and the predicate pointing at it, with a
/// reification resource and the predicate of its statement, and once with
/// the cloned object itself and an empty predicate. Returning true skips
/// that resource.
pub type CloneFilter<'a> = &'a dyn Fn(&Object, &str) -> bool;

fn clone_everything(_: &Object, _: &str) -> bool {
    false
}

/// State of one clone operation
struct CloneContext<'a> {
    /// Original blank node -> its copy
    memo: HashMap<RdfSubject, RdfSubject>,
    skip: CloneFilter<'a>,
}

impl<'a> CloneContext<'a> {
    fn new(skip: CloneFilter<'a>) -> Self {
        Self {
            memo: HashMap::new(),
            skip,
        }
    }

    fn skips(&self, node: &RdfSubject, p: &RdfPredicate) -> bool {
        (self.skip)(&Object::from_subject(node.clone()), p.as_str())
    }
}

fn is_reification_link(p: &RdfPredicate) -> bool {
    matches!(p.as_str(), rdf::SUBJECT | rdf::PREDICATE | rdf::OBJECT)
}

fn remove_subject(f: &mut Factory, node: &RdfSubject) -> usize {
    f.remove_matching(Some(node), None, None)
}

/// Resources removed together with `root` by a recursive removal
///
/// Starts from every blank node and reification resource reachable from
/// `root`, then drops the ones still referred to from outside the set until
/// nothing changes. Cycles of blank nodes are visited once.
fn cascade_set(f: &Factory, root: &RdfSubject) -> IndexSet<RdfSubject> {
    let mut members = IndexSet::new();
    members.insert(root.clone());
    let mut queue = vec![root.clone()];

    while let Some(node) = queue.pop() {
        for r in wrappers_of(f, &node) {
            if members.insert(r.clone()) {
                queue.push(r);
            }
        }
        for t in f.find(Some(&node), None, None) {
            if t.predicate.as_str() == rdf::SUBJECT {
                continue;
            }
            if let RdfObject::BlankNode(b) = t.object {
                let child = RdfSubject::BlankNode(b);
                if members.insert(child.clone()) {
                    queue.push(child);
                }
            }
        }
    }

    loop {
        let detached: Vec<RdfSubject> = members
            .iter()
            .skip(1)
            .filter(|m| match wrapper_subject(f, m) {
                Some(owner) => !members.contains(&owner),
                None => sources_of(f, m).iter().any(|s| !members.contains(s)),
            })
            .cloned()
            .collect();
        if detached.is_empty() {
            return members;
        }
        for m in &detached {
            members.shift_remove(m);
        }
    }
}

/// Copy the statements of `from` onto `to`, cloning blank objects when `deep`
fn copy_properties(
    f: &mut Factory,
    from: &RdfSubject,
    to: &RdfSubject,
    deep: bool,
    cx: &mut CloneContext<'_>,
) {
    for t in f.find(Some(from), None, None) {
        if is_reification_link(&t.predicate) {
            continue;
        }
        let object = match t.object {
            RdfObject::BlankNode(b) if deep => {
                let node = RdfSubject::BlankNode(b);
                if cx.skips(&node, &t.predicate) {
                    continue;
                }
                RdfObject::from(clone_blank(f, &node, cx))
            }
            other => other,
        };
        f.add(Triple::new(to.clone(), t.predicate, object));
    }
}

/// Re-create the reified statements of `from` on `to`
fn copy_reified(f: &mut Factory, from: &RdfSubject, to: &RdfSubject, cx: &mut CloneContext<'_>) {
    for r in wrappers_of(f, from) {
        let (Some(p), Some(value)) = (wrapper_predicate(f, &r), wrapper_value(f, &r)) else {
            continue;
        };
        if cx.skips(&r, &p) {
            continue;
        }
        let value = match value {
            RdfObject::BlankNode(b) => RdfObject::from(clone_blank(f, &RdfSubject::BlankNode(b), cx)),
            other => other,
        };
        let copy = match wrapper_for(f, to, &p, &value) {
            Some(existing) => existing,
            None => create_wrapper(f, to, &p, &value, None),
        };
        copy_properties(f, &r, &copy, true, cx);
    }
}

fn clone_blank(f: &mut Factory, node: &RdfSubject, cx: &mut CloneContext<'_>) -> RdfSubject {
    if let Some(copy) = cx.memo.get(node) {
        return copy.clone();
    }
    let copy = RdfSubject::BlankNode(f.create_blank_node());
    cx.memo.insert(node.clone(), copy.clone());
    copy_properties(f, node, &copy, true, cx);
    copy_reified(f, node, &copy, cx);
    copy
}

impl Object {
    /// Remove the statements of this object
    ///
    /// Always removes the object's own statements and the reification
    /// resources of those statements. With `recursive`, blank nodes reached
    /// from them are removed as well, as long as nothing outside the removed
    /// set still refers to them. Named resources are never removed by the
    /// cascade.
    ///
    /// A declared type becomes pending again.
    pub fn remove(&mut self, f: &mut Factory, recursive: bool) {
        let removed = f.aggregate(|f| {
            if recursive {
                let members = cascade_set(f, self.node());
                members.iter().map(|node| remove_subject(f, node)).sum::<usize>()
            } else {
                let mut removed = 0;
                for r in wrappers_of(f, self.node()) {
                    removed += remove_subject(f, &r);
                }
                removed + remove_subject(f, self.node())
            }
        });
        debug!("Removed {} statements of {}", removed, self);
        self.reset_type_pending();
    }

    /// Copy this object's statements to `iri` (a fresh blank node when `None`)
    ///
    /// Blank objects of plain statements are shared with the original;
    /// reified statements are re-created with their own properties. The
    /// declared type is carried over but not written.
    pub fn clone_as(&self, f: &mut Factory, iri: Option<&str>) -> ObjectResult<Object> {
        f.aggregate(|f| {
            let target = self.clone_target(f, iri, true)?;
            let keep_all = clone_everything;
            let mut cx = CloneContext::new(&keep_all);
            copy_properties(f, self.node(), target.node(), false, &mut cx);
            copy_reified(f, self.node(), target.node(), &mut cx);
            Ok(target)
        })
    }

    /// Deep copy to `iri`: blank objects are cloned recursively, named resources are shared
    pub fn clone_recursive_stop_at_resources(&self, f: &mut Factory, iri: Option<&str>) -> ObjectResult<Object> {
        self.clone_recursive_stop_at_resources_with(f, iri, &clone_everything)
    }

    /// [`Object::clone_recursive_stop_at_resources`] leaving out what `do_not_clone` rejects
    ///
    /// When the filter rejects this object itself (empty predicate), the copy
    /// is created without any statement.
    pub fn clone_recursive_stop_at_resources_with(
        &self,
        f: &mut Factory,
        iri: Option<&str>,
        do_not_clone: CloneFilter<'_>,
    ) -> ObjectResult<Object> {
        f.aggregate(|f| {
            let skip_all = do_not_clone(self, "");
            let target = self.clone_target(f, iri, !skip_all)?;
            if skip_all {
                return Ok(target);
            }
            let mut cx = CloneContext::new(do_not_clone);
            cx.memo.insert(self.node().clone(), target.node().clone());
            copy_properties(f, self.node(), target.node(), true, &mut cx);
            copy_reified(f, self.node(), target.node(), &mut cx);
            Ok(target)
        })
    }

    /// Handle on the copy; `copies` tells whether the statements travel with it
    fn clone_target(&self, f: &mut Factory, iri: Option<&str>, copies: bool) -> ObjectResult<Object> {
        let node: RdfSubject = match iri {
            Some(iri) => NamedNode::new(iri)?.into(),
            None => f.create_blank_node().into(),
        };
        let target = Object::from_subject(node);
        Ok(match self.declared_type() {
            Some(rdf_type) => {
                let rdf_type = NamedNode::new(rdf_type)?;
                let written = f.contains(&Triple::new(
                    target.node().clone(),
                    vocab(rdf::TYPE),
                    RdfObject::NamedNode(rdf_type.clone()),
                ));
                let target = target.declare_type(rdf_type);
                if written || (copies && !self.is_type_pending()) {
                    // The type statement travels with the copied statements
                    target.mark_type_written()
                } else {
                    target
                }
            }
            None => target,
        })
    }

    /// JSON view of the object
    ///
    /// Keys are predicate IRIs, plus `"Subject"` for the identifier. Literals
    /// render as their lexical form, resources as their identifier or, while
    /// `recurse > 0`, as nested objects.
    pub fn to_json(&self, f: &Factory, recurse: usize) -> Value {
        let mut map = Map::new();
        map.insert("Subject".to_string(), Value::String(self.qname(f)));

        let mut by_predicate: IndexMap<RdfPredicate, Vec<RdfObject>> = IndexMap::new();
        for t in f.find(Some(self.node()), None, None) {
            by_predicate.entry(t.predicate).or_default().push(t.object);
        }
        for r in wrappers_of(f, self.node()) {
            if let (Some(p), Some(value)) = (wrapper_predicate(f, &r), wrapper_value(f, &r)) {
                by_predicate.entry(p).or_default().push(value);
            }
        }

        for (p, values) in by_predicate {
            let mut rendered: Vec<Value> = values
                .into_iter()
                .map(|value| render_json_value(f, value, recurse))
                .collect();
            let value = if rendered.len() == 1 {
                rendered.remove(0)
            } else {
                Value::Array(rendered)
            };
            map.insert(p.as_str().to_string(), value);
        }
        Value::Object(map)
    }

    /// Pretty printed [`Object::to_json`]
    pub fn dump(&self, f: &Factory, recurse: usize) -> String {
        format!("{:#}", self.to_json(f, recurse))
    }
}

fn render_json_value(f: &Factory, value: RdfObject, recurse: usize) -> Value {
    match value {
        RdfObject::Literal(l) => Value::String(l.value().to_string()),
        resource => match resource.as_subject() {
            Some(node) if recurse > 0 && !f.store().get_triples_with_subject(&node).is_empty() => {
                Object::from_subject(node).to_json(f, recurse - 1)
            }
            Some(node) => Value::String(Object::from_subject(node).qname(f)),
            None => Value::Null,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PropertyValue;

    const PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
    const NAME: &str = "http://xmlns.com/foaf/0.1/name";
    const NICK: &str = "http://xmlns.com/foaf/0.1/nick";
    const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
    const ADDRESS: &str = "http://example.org/address";
    const CITY: &str = "http://example.org/city";
    const SINCE: &str = "http://example.org/since";

    #[test]
    fn test_remove_non_recursive() {
        let mut f = Factory::new();
        let mut alice = Object::with_type("http://example.org/alice", PERSON).unwrap();
        let mut address = Object::blank(&mut f);
        address.set_property_value(&mut f, CITY, "Paris").unwrap();
        alice.set_property_value(&mut f, NAME, "Alice").unwrap();
        alice.set_object(&mut f, ADDRESS, &address).unwrap();
        let bob = Object::new("http://example.org/bob").unwrap();
        alice.reify_object(&mut f, KNOWS, &bob).unwrap();
        assert_eq!(f.find_size(), 8);

        alice.remove(&mut f, false);
        // Only the address statement is left
        assert_eq!(f.find_size(), 1);
        assert!(alice.is_type_pending());
        assert!(alice.find_targets(&f).is_empty());
    }

    #[test]
    fn test_remove_recursive_cascades_into_blank_nodes() {
        let mut f = Factory::new();
        let mut s = Object::new("http://example.org/s").unwrap();
        s.set_property_value(&mut f, NAME, "S").unwrap();
        s.set_property_value(&mut f, NICK, "s").unwrap();

        let mut b = Object::blank(&mut f);
        b.set_property_value(&mut f, CITY, "Paris").unwrap();
        s.set_object(&mut f, ADDRESS, &b).unwrap();

        let mut r = Object::blank(&mut f);
        r.set_property_value(&mut f, NAME, "R").unwrap();
        r.set_object(&mut f, KNOWS, &Object::new("http://example.org/shared").unwrap())
            .unwrap();
        s.reify_object(&mut f, KNOWS, &r).unwrap();

        assert_eq!(f.find_size(), 10);
        s.remove(&mut f, true);
        assert_eq!(f.find_size(), 0);
    }

    #[test]
    fn test_remove_recursive_keeps_shared_blank_nodes() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let mut other = Object::new("http://example.org/other").unwrap();
        let mut shared = Object::blank(&mut f);
        shared.set_property_value(&mut f, NAME, "shared").unwrap();
        a.set_object(&mut f, KNOWS, &shared).unwrap();
        other.set_object(&mut f, KNOWS, &shared).unwrap();

        a.remove(&mut f, true);
        assert_eq!(f.find_size(), 2);
        assert_eq!(shared.get_property_value(&f, NAME).unwrap(), PropertyValue::from("shared"));
    }

    #[test]
    fn test_remove_recursive_terminates_on_cycles() {
        let mut f = Factory::new();
        let mut root = Object::new("http://example.org/root").unwrap();
        let mut x = Object::blank(&mut f);
        let mut y = Object::blank(&mut f);
        x.set_object(&mut f, KNOWS, &y).unwrap();
        y.set_object(&mut f, KNOWS, &x).unwrap();
        root.set_object(&mut f, KNOWS, &x).unwrap();

        root.remove(&mut f, true);
        assert_eq!(f.find_size(), 0);
    }

    #[test]
    fn test_clone_does_not_write_delayed_type() {
        let mut f = Factory::new();
        let obj = Object::with_type("http://example.org/a", PERSON).unwrap();
        let copy = obj.clone_as(&mut f, Some("http://example.org/b")).unwrap();

        assert_eq!(f.find_size(), 0);
        assert!(copy.is_type_pending());
        assert!(copy.is_a(&f, PERSON).unwrap());
    }

    #[test]
    fn test_clone_shares_blank_objects() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let mut address = Object::blank(&mut f);
        address.set_property_value(&mut f, CITY, "Paris").unwrap();
        a.set_object(&mut f, ADDRESS, &address).unwrap();
        a.set_property_value(&mut f, NAME, "A").unwrap();

        let b = a.clone_as(&mut f, Some("http://example.org/b")).unwrap();
        assert_eq!(f.find_size(), 5);
        assert_eq!(b.get_object(&f, ADDRESS).unwrap(), address);
    }

    #[test]
    fn test_clone_recursive_copies_blank_objects_only() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let mut address = Object::blank(&mut f);
        address.set_property_value(&mut f, CITY, "Paris").unwrap();
        a.set_object(&mut f, ADDRESS, &address).unwrap();
        let friend = Object::new("http://example.org/friend").unwrap();
        a.set_object(&mut f, KNOWS, &friend).unwrap();

        let b = a
            .clone_recursive_stop_at_resources(&mut f, Some("http://example.org/b"))
            .unwrap();
        assert_eq!(f.find_size(), 6);

        let copied_address = b.get_object(&f, ADDRESS).unwrap();
        assert_ne!(copied_address, address);
        assert_eq!(
            copied_address.get_property_value(&f, CITY).unwrap(),
            PropertyValue::from("Paris")
        );
        assert_eq!(b.get_object(&f, KNOWS).unwrap(), friend);
    }

    #[test]
    fn test_clone_copies_reified_statements() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let friend = Object::new("http://example.org/friend").unwrap();
        let mut wrapper = a.reify_object(&mut f, KNOWS, &friend).unwrap();
        wrapper.set_property_value(&mut f, SINCE, 2010).unwrap();
        a.set_property_value_list(
            &mut f,
            NICK,
            &[PropertyValue::from("x"), PropertyValue::from("y")],
            true,
        )
        .unwrap();

        let b = a.clone_as(&mut f, Some("http://example.org/b")).unwrap();
        assert_eq!(f.find_size(), 30);

        let copied = b.reified_object(&f, KNOWS, &friend).unwrap().unwrap();
        assert_ne!(copied, wrapper);
        assert_eq!(copied.get_property_value(&f, SINCE).unwrap(), PropertyValue::Integer(2010));
        assert_eq!(
            b.get_property_value_list(&f, NICK, true).unwrap(),
            vec![PropertyValue::from("x"), PropertyValue::from("y")]
        );
    }

    #[test]
    fn test_clone_recursive_handles_cycles() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let mut x = Object::blank(&mut f);
        x.set_object(&mut f, KNOWS, &a).unwrap();
        let itself = x.clone();
        x.set_object(&mut f, ADDRESS, &itself).unwrap();
        a.set_object(&mut f, KNOWS, &x).unwrap();

        let b = a.clone_recursive_stop_at_resources(&mut f, None).unwrap();
        assert!(b.is_blank());
        let copied_x = b.get_object(&f, KNOWS).unwrap();
        assert_ne!(copied_x, x);
        assert_eq!(copied_x.get_object(&f, ADDRESS).unwrap(), copied_x);
        // Named resources are shared, not copied
        assert_eq!(copied_x.get_object(&f, KNOWS).unwrap(), a);
    }

    #[test]
    fn test_clone_recursive_with_filter() {
        let mut f = Factory::new();
        let mut a = Object::new("http://example.org/a").unwrap();
        let mut address = Object::blank(&mut f);
        address.set_property_value(&mut f, CITY, "Paris").unwrap();
        a.set_object(&mut f, ADDRESS, &address).unwrap();
        let friend = Object::new("http://example.org/friend").unwrap();
        a.set_object(&mut f, KNOWS, &friend).unwrap();
        a.set_property_value(&mut f, NAME, "A").unwrap();
        let mut statement = a.reify_property_value(&mut f, NAME, "A").unwrap();
        statement.set_property_value(&mut f, SINCE, "2001").unwrap();
        assert_eq!(f.find_size(), 8);

        let skip_address = |_: &Object, p: &str| p == ADDRESS;
        let b = a
            .clone_recursive_stop_at_resources_with(&mut f, Some("http://example.org/b"), &skip_address)
            .unwrap();
        assert_eq!(f.find_size(), 14);
        assert!(b.get_optional_object(&f, ADDRESS).unwrap().is_none());
        assert_eq!(b.get_object(&f, KNOWS).unwrap(), friend);
        let copied = b.reified_property_value(&f, NAME, "A").unwrap().unwrap();
        assert_eq!(copied.get_property_value(&f, SINCE).unwrap(), PropertyValue::from("2001"));

        let skip_name = |_: &Object, p: &str| p == NAME;
        let c = a
            .clone_recursive_stop_at_resources_with(&mut f, Some("http://example.org/c"), &skip_name)
            .unwrap();
        assert_eq!(f.find_size(), 17);
        assert!(c.get_optional_property_value(&f, NAME).unwrap().is_none());
        assert_ne!(c.get_object(&f, ADDRESS).unwrap(), address);

        let skip_root = |_: &Object, p: &str| p.is_empty();
        let d = a
            .clone_recursive_stop_at_resources_with(&mut f, Some("http://example.org/d"), &skip_root)
            .unwrap();
        assert_eq!(f.find_size(), 17);
        assert!(d.find_targets(&f).is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut f = Factory::new();
        let mut alice = Object::new("http://example.org/alice").unwrap();
        let mut address = Object::blank(&mut f);
        address.set_property_value(&mut f, CITY, "Paris").unwrap();
        alice.set_property_value(&mut f, NAME, "Alice").unwrap();
        alice.add_property_value(&mut f, NICK, "Al", false).unwrap();
        alice.add_property_value(&mut f, NICK, "Ally", false).unwrap();
        alice.set_object(&mut f, ADDRESS, &address).unwrap();

        let flat = alice.to_json(&f, 0);
        assert_eq!(flat["Subject"], "http://example.org/alice");
        assert_eq!(flat[NAME], "Alice");
        assert_eq!(flat[NICK], serde_json::json!(["Al", "Ally"]));
        assert_eq!(flat[ADDRESS], address.qname(&f));

        let nested = alice.to_json(&f, 1);
        assert_eq!(nested[ADDRESS][CITY], "Paris");
        assert!(alice.dump(&f, 1).contains("Paris"));
    }
}
