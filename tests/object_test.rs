use rdf_object::{Factory, Object, ObjectError, PropertyValue};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/foaf_example.ttl");
const FOAF: &str = "http://xmlns.com/foaf/0.1/";
const PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
const NAME: &str = "http://xmlns.com/foaf/0.1/name";
const NICK: &str = "http://xmlns.com/foaf/0.1/nick";
const MBOX: &str = "http://xmlns.com/foaf/0.1/mbox";
const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
const HOLDS_ACCOUNT: &str = "http://xmlns.com/foaf/0.1/holdsAccount";
const ACCOUNT_NAME: &str = "http://xmlns.com/foaf/0.1/accountName";
const SINCE: &str = "http://example.org/since";
const JIMMY: &str = "http://jimmywales.com/#me";

fn loaded() -> Factory {
    let mut f = Factory::new();
    f.load_from_file(FIXTURE, None).unwrap();
    f
}

fn strings(values: &[&str]) -> Vec<PropertyValue> {
    values.iter().map(|v| PropertyValue::from(*v)).collect()
}

#[test]
fn test_read_loaded_resources() {
    let f = loaded();
    let jimmy = Object::new(JIMMY).unwrap();

    assert!(jimmy.is_a(&f, PERSON).unwrap());
    assert_eq!(jimmy.get_property_value(&f, NAME).unwrap(), PropertyValue::from("Jimmy Wales"));
    assert_eq!(jimmy.get_property_value(&f, NICK).unwrap().as_string(), Some("Jimbo"));
    assert_eq!(
        jimmy.get_object(&f, MBOX).unwrap().iri(),
        Some("mailto:jwales@bomis.com")
    );
    assert_eq!(jimmy.qname(&f), JIMMY);

    let friends = jimmy.get_object_list(&f, KNOWS, false).unwrap();
    let names: Vec<PropertyValue> = friends
        .iter()
        .map(|friend| friend.get_property_value(&f, NAME).unwrap())
        .collect();
    assert_eq!(names, strings(&["Angela Beesley", "Larry Sanger"]));
}

#[test]
fn test_wrong_node_kind_is_reported() {
    let f = loaded();
    let jimmy = Object::new(JIMMY).unwrap();

    assert!(matches!(
        jimmy.get_property_value(&f, MBOX),
        Err(ObjectError::InvalidNodeType { .. })
    ));
    assert!(matches!(
        jimmy.get_object(&f, NAME),
        Err(ObjectError::InvalidNodeType { .. })
    ));
    assert!(matches!(
        jimmy.get_property_value(&f, "http://xmlns.com/foaf/0.1/age"),
        Err(ObjectError::PropertyNotFound { .. })
    ));
    assert!(jimmy
        .get_optional_property_value(&f, "http://xmlns.com/foaf/0.1/age")
        .unwrap()
        .is_none());
}

#[test]
fn test_blank_account() {
    let f = loaded();
    let jimmy = Object::new(JIMMY).unwrap();
    let account = jimmy.get_object(&f, HOLDS_ACCOUNT).unwrap();

    assert!(account.is_blank());
    assert_eq!(
        account.get_types_in_namespace(&f, FOAF).len(),
        2
    );
    assert_eq!(Object::find_by_key(&f, ACCOUNT_NAME, "Jimbo").unwrap(), account);
    assert_eq!(account.find_sources(&f), vec![jimmy]);
}

#[test]
fn test_graph_neighbourhood() {
    let f = loaded();
    let jimmy = Object::new(JIMMY).unwrap();

    let sources = jimmy.find_sources(&f);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].iri(), Some("http://example.org/nupedia"));

    let targets = jimmy.find_targets(&f);
    assert!(targets.contains(&Object::new("http://example.org/angela").unwrap()));
    assert!(targets.contains(&Object::new("http://example.org/larry").unwrap()));
    assert!(targets.contains(&Object::new(PERSON).unwrap()));
    assert_eq!(targets.len(), 5);

    for target in &targets {
        if target.iri().is_some_and(|iri| iri.starts_with("http://example.org/")) {
            assert!(target.find_sources(&f).contains(&jimmy));
        }
    }
}

#[test]
fn test_annotated_friendship() {
    let mut f = loaded();
    let mut jimmy = Object::new(JIMMY).unwrap();
    let angela = Object::new("http://example.org/angela").unwrap();
    let before = f.find_size();

    let mut link = jimmy.reify_object(&mut f, KNOWS, &angela).unwrap();
    link.set_property_value(&mut f, SINCE, 2001).unwrap();
    // Plain statement replaced by four reification statements, plus `since`
    assert_eq!(f.find_size(), before + 4);

    assert_eq!(jimmy.get_object_list(&f, KNOWS, false).unwrap().len(), 2);
    assert_eq!(jimmy.find_reified(&f), vec![angela.clone()]);
    assert_eq!(Object::find_by_key_object(&f, KNOWS, &angela).unwrap(), jimmy);
    assert!(matches!(
        jimmy.reify_object(&mut f, KNOWS, &angela),
        Err(ObjectError::AlreadyReified(_))
    ));

    assert!(matches!(
        jimmy.unreify_object(&mut f, KNOWS, &angela),
        Err(ObjectError::CannotUnreify(_))
    ));
    link.remove_property_value(&mut f, SINCE, 2001).unwrap();
    jimmy.unreify_object(&mut f, KNOWS, &angela).unwrap();
    assert_eq!(f.find_size(), before);
    assert!(jimmy.reified_object(&f, KNOWS, &angela).unwrap().is_none());
}

#[test]
fn test_ordered_nicknames() {
    let mut f = Factory::new();
    let mut person = Object::with_type("http://example.org/p", PERSON).unwrap();

    person
        .set_property_value_list(&mut f, NICK, &strings(&["c", "a", "b"]), true)
        .unwrap();
    assert_eq!(
        person.get_property_value_list(&f, NICK, true).unwrap(),
        strings(&["c", "a", "b"])
    );

    person.add_property_value(&mut f, NICK, "d", true).unwrap();
    person.move_property_value(&mut f, NICK, "d", 0).unwrap();
    person.replace_property_value(&mut f, NICK, "a", "z").unwrap();
    assert_eq!(
        person.get_property_value_list(&f, NICK, true).unwrap(),
        strings(&["d", "c", "z", "b"])
    );

    // A plain value among ordered ones makes the order unknowable
    person.add_property_value(&mut f, NICK, "e", false).unwrap();
    assert!(matches!(
        person.get_property_value_list(&f, NICK, true),
        Err(ObjectError::CannotPreserveOrder { .. })
    ));
    assert_eq!(person.get_property_value_list(&f, NICK, false).unwrap().len(), 5);
}

#[test]
fn test_typed_values() {
    let mut f = Factory::new();
    let mut obj = Object::new("http://example.org/thing").unwrap();

    obj.set_property_value(&mut f, "http://example.org/count", 42i64).unwrap();
    obj.set_property_value(&mut f, "http://example.org/ratio", 0.5).unwrap();
    obj.set_property_value(&mut f, "http://example.org/flag", true).unwrap();
    obj.set_property_value(&mut f, "http://example.org/label", PropertyValue::lang_string("chose", "fr"))
        .unwrap();

    assert_eq!(obj.get_property_value(&f, "http://example.org/count").unwrap().to_integer().unwrap(), 42);
    assert_eq!(obj.get_property_value(&f, "http://example.org/ratio").unwrap().as_decimal(), Some(0.5));
    assert_eq!(obj.get_property_value(&f, "http://example.org/flag").unwrap().as_boolean(), Some(true));
    let label = obj.get_property_value(&f, "http://example.org/label").unwrap();
    assert_eq!(label.lang(), Some("fr"));
    assert_eq!(label.lexical(), "chose");

    assert_eq!(Object::find_by_value(&f, "http://example.org/count", 42i64).unwrap(), vec![obj]);
}

#[test]
fn test_remove_and_clone_person() {
    let mut f = loaded();
    let mut jimmy = Object::new(JIMMY).unwrap();

    let copy = jimmy
        .clone_recursive_stop_at_resources(&mut f, Some("http://example.org/jimmy-copy"))
        .unwrap();
    // Seven statements of the person plus three of a fresh account
    assert_eq!(f.find_size(), 26);
    let copied_account = copy.get_object(&f, HOLDS_ACCOUNT).unwrap();
    assert_ne!(copied_account, jimmy.get_object(&f, HOLDS_ACCOUNT).unwrap());

    jimmy.remove(&mut f, true);
    // The person and its account are gone, friends and the document remain
    assert_eq!(f.find_size(), 16);
    assert!(jimmy.find_targets(&f).is_empty());
    assert_eq!(Object::find_by_type(&f, PERSON).unwrap().len(), 3);
    assert_eq!(Object::find_by_key(&f, NAME, "Jimmy Wales").unwrap(), copy);
}
