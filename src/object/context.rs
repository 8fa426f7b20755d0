//! Ambient factory for the current thread
//!
//! Object operations always take an explicit [`Factory`]. This module keeps a
//! per-thread stack of factories for callers that prefer not to thread one
//! through every call:
//!
//! ```rust
//! use rdf_object::object::context;
//! use rdf_object::{Factory, Object};
//!
//! context::set_factory(Factory::new()).unwrap();
//! let size = context::with_factory(|f| {
//!     let mut alice = Object::new("http://example.org/alice")?;
//!     alice.set_property_value(f, "http://xmlns.com/foaf/0.1/name", "Alice")?;
//!     Ok(f.find_size())
//! })
//! .unwrap();
//! assert_eq!(size, 1);
//! ```

use std::cell::RefCell;

use super::error::{ObjectError, ObjectResult};
use super::factory::Factory;

thread_local! {
    static FACTORIES: RefCell<Vec<Factory>> = const { RefCell::new(Vec::new()) };
}

fn with_stack<R>(func: impl FnOnce(&mut Vec<Factory>) -> R) -> ObjectResult<R> {
    FACTORIES.with(|cell| {
        let mut stack = cell.try_borrow_mut().map_err(|_| ObjectError::FactoryBusy)?;
        Ok(func(&mut stack))
    })
}

/// Install `factory` as the current one, replacing the current one if any
pub fn set_factory(factory: Factory) -> ObjectResult<()> {
    with_stack(|stack| match stack.last_mut() {
        Some(top) => *top = factory,
        None => stack.push(factory),
    })
}

/// Make `factory` current, keeping the previous one underneath
pub fn push_factory(factory: Factory) -> ObjectResult<()> {
    with_stack(|stack| stack.push(factory))
}

/// Remove the current factory, restoring the previous one
pub fn pop_factory() -> ObjectResult<Option<Factory>> {
    with_stack(|stack| stack.pop())
}

/// Whether a factory is installed in this thread
pub fn is_factory_loaded() -> bool {
    FACTORIES.with(|cell| cell.try_borrow().map(|stack| !stack.is_empty()).unwrap_or(true))
}

/// Run `func` against the current factory
///
/// Fails with [`ObjectError::NoFactory`] when none is installed and with
/// [`ObjectError::FactoryBusy`] when called from inside another `with_factory`.
pub fn with_factory<R>(func: impl FnOnce(&mut Factory) -> ObjectResult<R>) -> ObjectResult<R> {
    with_stack(|stack| match stack.last_mut() {
        Some(factory) => func(factory),
        None => Err(ObjectError::NoFactory),
    })?
}
