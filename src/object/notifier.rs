//! Change notification
//!
//! A [`Factory`](super::Factory) can hold one [`Notifier`]. Every statement
//! added or removed through the factory is reported to it. Object operations
//! run as one aggregation: the statements are still reported one by one, and
//! [`Notifier::aggregation_finished`] is called once when the outermost
//! operation returns.

use crate::rdf::Triple;

/// Receiver of store changes made through a factory
pub trait Notifier: Send {
    /// Called after a statement was added
    fn added(&mut self, triple: &Triple);

    /// Called after a statement was removed
    fn removed(&mut self, triple: &Triple);

    /// Called when the outermost aggregated operation returns
    fn aggregation_finished(&mut self) {}
}
