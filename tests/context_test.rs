use rdf_object::object::context;
use rdf_object::{Factory, Object, ObjectError, PropertyValue};

const NAME: &str = "http://xmlns.com/foaf/0.1/name";

#[test]
fn test_objects_through_current_factory() {
    context::set_factory(Factory::new()).unwrap();
    assert!(context::is_factory_loaded());

    context::with_factory(|f| {
        let mut alice = Object::new("http://example.org/alice")?;
        alice.set_property_value(f, NAME, "Alice")?;
        Ok(())
    })
    .unwrap();

    let name = context::with_factory(|f| {
        Object::find_by_key(f, NAME, "Alice")?.get_property_value(f, NAME)
    })
    .unwrap();
    assert_eq!(name, PropertyValue::from("Alice"));
    context::pop_factory().unwrap();
}

#[test]
fn test_push_and_pop_restore_previous_factory() {
    let mut outer = Factory::new();
    let mut marker = Object::new("http://example.org/outer").unwrap();
    marker.set_property_value(&mut outer, NAME, "outer").unwrap();
    context::push_factory(outer).unwrap();

    context::push_factory(Factory::new()).unwrap();
    assert_eq!(context::with_factory(|f| Ok(f.find_size())).unwrap(), 0);

    let inner = context::pop_factory().unwrap().unwrap();
    assert_eq!(inner.find_size(), 0);
    assert_eq!(context::with_factory(|f| Ok(f.find_size())).unwrap(), 1);

    context::pop_factory().unwrap();
    assert!(!context::is_factory_loaded());
    assert!(context::pop_factory().unwrap().is_none());
}

#[test]
fn test_errors_propagate_from_closure() {
    context::set_factory(Factory::new()).unwrap();
    let result = context::with_factory(|f| Object::new("http://example.org/nobody")?.get_property_value(f, NAME));
    assert!(matches!(result, Err(ObjectError::PropertyNotFound { .. })));
    context::pop_factory().unwrap();
}

#[test]
fn test_nested_access_is_refused() {
    context::set_factory(Factory::new()).unwrap();
    let result = context::with_factory(|_| context::with_factory(|f| Ok(f.find_size())));
    assert!(matches!(result, Err(ObjectError::FactoryBusy)));
    context::pop_factory().unwrap();
}

#[test]
fn test_factories_are_per_thread() {
    context::set_factory(Factory::new()).unwrap();
    let loaded_elsewhere = std::thread::spawn(context::is_factory_loaded).join().unwrap();
    assert!(!loaded_elsewhere);
    assert!(context::is_factory_loaded());
    context::pop_factory().unwrap();
}
