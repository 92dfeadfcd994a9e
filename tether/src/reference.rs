//! References: a value snapshot bundled with the capability to update it.
use crate::{Mailbox, MailboxConfig, Sink, Stream, Update};
use std::fmt;
use tether_common::{Data, Focus, FocusExt};

/// A snapshot of a value, together with an address that updates the value's storage location.
///
/// References are produced by a root mailbox (see [`signal`] and [`from_mailbox`]) and can be
/// narrowed down to a part of the value with [`Reference::field`]. Every reference derived from a
/// root writes into that root's mailbox, whatever the number of projections applied.
///
/// The snapshot is only valid at the time the reference was produced; a component typically
/// receives a fresh reference on every render.
pub struct Reference<T> {
    value: T,
    address: Sink<Update<T>>,
}

impl<T: Clone> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Reference {
            value: self.value.clone(),
            address: self.address.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reference").field("value", &self.value).finish_non_exhaustive()
    }
}

impl<T: Data> Data for Reference<T> {
    fn same(&self, other: &Self) -> bool {
        self.value.same(&other.value) && self.address.same(&other.address)
    }
}

impl<T: Clone + 'static> Reference<T> {
    /// Creates a reference from a snapshot and an address.
    pub fn new(value: T, address: Sink<Update<T>>) -> Reference<T> {
        Reference { value, address }
    }

    /// The snapshot.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// The address: a sink of update functions for the referenced location.
    pub fn address(&self) -> &Sink<Update<T>> {
        &self.address
    }

    /// Returns a sink that overwrites the referenced location.
    ///
    /// The written value replaces whatever is stored at the time it is delivered (last write wins),
    /// it is not merged with the snapshot.
    pub fn set(&self) -> Sink<T> {
        self.address.adapt(|value: T| -> Update<T> { Box::new(move |_: &T| value) })
    }

    /// Returns a sink of update functions for the referenced location.
    ///
    /// Functions are applied to the value stored when they are delivered, not to the snapshot,
    /// so that several updates sent from the same (stale) reference all take effect.
    pub fn transform(&self) -> Sink<Update<T>> {
        self.address.clone()
    }

    /// Returns a sink of update functions that are applied to the snapshot, the result
    /// overwriting the referenced location.
    ///
    /// Of two updates sent through the same snapshot, only the last one survives.
    pub fn transform_snapshot(&self) -> Sink<Update<T>> {
        let snapshot = self.value.clone();
        self.address.adapt(move |f: Update<T>| -> Update<T> {
            let value = f(&snapshot);
            Box::new(move |_: &T| value)
        })
    }

    /// Returns a reference to the part of the value watched by `focus`.
    ///
    /// Writing through the returned reference rewrites only that part, leaving the rest of the
    /// value as it is at delivery time.
    pub fn map<U, L>(&self, focus: L) -> Reference<U>
    where
        U: Clone + 'static,
        L: Focus<T, U> + Clone + 'static,
    {
        let value = focus.get(&self.value);
        let address = self.address.adapt(move |update: Update<U>| -> Update<T> {
            let focus = focus.clone();
            Box::new(move |whole: &T| focus.modify(whole, update))
        });
        Reference { value, address }
    }

    /// Returns a reference to a field, given a focus generated by `#[derive(Focus)]`.
    ///
    /// ```
    /// use tether::Focus;
    ///
    /// #[derive(Clone, tether::Data, Focus)]
    /// struct Counter {
    ///     count: i32,
    /// }
    ///
    /// let root = tether::signal(Counter { count: 5 }).latest();
    /// let count = root.field(Counter::count);
    /// assert_eq!(*count.value(), 5);
    /// ```
    pub fn field<U, L>(&self, focus: L) -> Reference<U>
    where
        U: Clone + 'static,
        L: Focus<T, U> + Clone + 'static,
    {
        self.map(focus)
    }
}

impl<T: Clone + 'static> Sink<Update<T>> {
    /// Sends an update function.
    pub fn modify(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.send(Box::new(f))
    }
}

/// Returns a reference to the part of `reference` watched by `focus`.
pub fn map<T, U, L>(focus: L, reference: &Reference<T>) -> Reference<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    L: Focus<T, U> + Clone + 'static,
{
    reference.map(focus)
}

/// Returns a reference to the field of `reference` watched by `focus`.
///
/// Field foci are generated by `#[derive(Focus)]`: `field(Model::name, &reference)`. Naming a field
/// that doesn't exist is a compile error.
pub fn field<T, U, L>(focus: L, reference: &Reference<T>) -> Reference<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    L: Focus<T, U> + Clone + 'static,
{
    reference.field(focus)
}

/// Returns a sink that overwrites the location of `reference`. See [`Reference::set`].
pub fn set<T: Clone + 'static>(reference: &Reference<T>) -> Sink<T> {
    reference.set()
}

/// Returns a sink of update functions for the location of `reference`. See [`Reference::transform`].
pub fn transform<T: Clone + 'static>(reference: &Reference<T>) -> Sink<Update<T>> {
    reference.transform()
}

/// Returns the stream of references to the value of `mailbox`.
///
/// Each value published by the mailbox produces one reference, in order. All of them share the
/// mailbox's address.
pub fn from_mailbox<T: Data>(mailbox: &Mailbox<T>) -> Stream<Reference<T>> {
    let address = mailbox.address();
    mailbox
        .stream()
        .map(move |value: &T| Reference::new(value.clone(), address.clone()))
}

/// Creates a new root storage location holding `initial`, and returns the stream of references to
/// it.
pub fn signal<T: Data>(initial: T) -> Stream<Reference<T>> {
    signal_with(MailboxConfig::default(), initial)
}

/// Like [`signal`], with a custom mailbox configuration.
pub fn signal_with<T: Data>(config: MailboxConfig, initial: T) -> Stream<Reference<T>> {
    from_mailbox(&Mailbox::with_config(config, initial))
}
