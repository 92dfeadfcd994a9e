//! Mailboxes: the storage cells behind references.
//!
//! A mailbox holds a current value, accepts updates through sinks and publishes every new value on
//! its stream. All updates go through a single queue, so they are applied in the order they were
//! sent, even when they are sent from a subscriber while the mailbox is publishing.
use crate::{
    stream::{Observer, Source, Stream, Subscription},
    SendError, Sink,
};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};
use tether_common::{Atom, Data};
use tracing::{debug, trace};

/// An update to a value: a function from the value current when the update is applied to its
/// replacement.
pub type Update<T> = Box<dyn FnOnce(&T) -> T>;

/// Default value of [`MailboxConfig::max_cascade`].
pub const DEFAULT_MAX_CASCADE: usize = 1024;

/// Mailbox options.
#[derive(Clone, Debug)]
pub struct MailboxConfig {
    /// Name of the mailbox in log messages and errors.
    pub label: Atom,
    /// Don't publish values that are `same` as the current one.
    pub skip_unchanged: bool,
    /// Maximum number of updates applied during a single delivery, before further sends are
    /// rejected with `SendError::CascadeLimit`.
    pub max_cascade: usize,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        MailboxConfig {
            label: Atom::anonymous(),
            skip_unchanged: false,
            max_cascade: DEFAULT_MAX_CASCADE,
        }
    }
}

impl MailboxConfig {
    pub fn new() -> MailboxConfig {
        MailboxConfig::default()
    }

    pub fn label(mut self, label: impl Into<Atom>) -> Self {
        self.label = label.into();
        self
    }

    pub fn skip_unchanged(mut self, skip_unchanged: bool) -> Self {
        self.skip_unchanged = skip_unchanged;
        self
    }

    pub fn max_cascade(mut self, max_cascade: usize) -> Self {
        self.max_cascade = max_cascade;
        self
    }
}

new_key_type! {
    struct ObserverKey;
}

struct Shared<T> {
    config: MailboxConfig,
    value: RefCell<T>,
    observers: RefCell<SlotMap<ObserverKey, Observer<T>>>,
    pending: RefCell<VecDeque<Update<T>>>,
    /// Whether updates are being applied (further updates are queued).
    delivering: Cell<bool>,
    /// Number of updates applied during the current delivery.
    cascade: Cell<usize>,
    /// Number of values published so far.
    revision: Cell<u64>,
}

/// Resets the delivery state even if an observer panics. Updates still queued by an interrupted
/// delivery are dropped.
struct DeliveryGuard<'a, T>(&'a Shared<T>);

impl<'a, T> Drop for DeliveryGuard<'a, T> {
    fn drop(&mut self) {
        self.0.delivering.set(false);
        self.0.cascade.set(0);
        self.0.pending.borrow_mut().clear();
    }
}

impl<T: Data> Shared<T> {
    fn post(&self, update: Update<T>) -> Result<(), SendError> {
        if self.delivering.get() {
            let queued = self.cascade.get() + self.pending.borrow().len();
            if queued >= self.config.max_cascade {
                return Err(SendError::CascadeLimit {
                    label: self.config.label.clone(),
                    limit: self.config.max_cascade,
                });
            }
            self.pending.borrow_mut().push_back(update);
            return Ok(());
        }

        self.delivering.set(true);
        let _guard = DeliveryGuard(self);
        self.apply(update);
        self.drain();
        Ok(())
    }

    /// Applies queued updates until the queue is empty.
    fn drain(&self) {
        loop {
            // don't hold the borrow while applying: observers may queue more updates
            let next = self.pending.borrow_mut().pop_front();
            let Some(update) = next else { break };
            self.apply(update);
        }
    }

    fn apply(&self, update: Update<T>) {
        self.cascade.set(self.cascade.get() + 1);
        let new_value = update(&*self.value.borrow());
        if self.config.skip_unchanged && new_value.same(&*self.value.borrow()) {
            debug!(mailbox = %self.config.label, "value unchanged, not published");
            return;
        }
        *self.value.borrow_mut() = new_value;
        let revision = self.revision.get() + 1;
        self.revision.set(revision);
        trace!(mailbox = %self.config.label, revision, "publishing");

        let observers: SmallVec<[Observer<T>; 4]> = self.observers.borrow().values().cloned().collect();
        let value = self.value.borrow();
        for observer in observers {
            observer(&value);
        }
    }
}

impl<T: Data> Source<T> for Rc<Shared<T>> {
    fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let shared: &Shared<T> = self;
        // the observer may write back into the mailbox during the replay: queue those writes and
        // apply them once the observer is registered, so that it sees their result
        let current = shared.value.borrow().clone();
        let key = if shared.delivering.get() {
            // the outermost delivery drains the queue
            observer(&current);
            shared.observers.borrow_mut().insert(observer)
        } else {
            shared.delivering.set(true);
            let _guard = DeliveryGuard(shared);
            observer(&current);
            let key = shared.observers.borrow_mut().insert(observer);
            shared.drain();
            key
        };
        let weak = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.observers.borrow_mut().remove(key);
            }
        })
    }

    fn latest(&self) -> T {
        self.value.borrow().clone()
    }
}

/// A storage cell paired with a sink that updates it and a stream that publishes its values.
///
/// The mailbox is kept alive by the `Mailbox` handle and by the streams derived from it. Sinks
/// only hold a weak link: sending to a mailbox that is gone fails with `SendError::Closed`.
pub struct Mailbox<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Mailbox {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for Mailbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("label", &self.shared.config.label)
            .field("revision", &self.shared.revision.get())
            .finish_non_exhaustive()
    }
}

impl<T: Data> Mailbox<T> {
    /// Creates a mailbox with the default configuration.
    pub fn new(initial: T) -> Mailbox<T> {
        Mailbox::with_config(MailboxConfig::default(), initial)
    }

    pub fn with_config(config: MailboxConfig, initial: T) -> Mailbox<T> {
        trace!(mailbox = %config.label, "mailbox created");
        Mailbox {
            shared: Rc::new(Shared {
                config,
                value: RefCell::new(initial),
                observers: RefCell::new(SlotMap::with_key()),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
                cascade: Cell::new(0),
                revision: Cell::new(0),
            }),
        }
    }

    /// Returns a sink accepting update functions.
    ///
    /// Each function is applied to the value current at the time it is applied, which may be more
    /// recent than the value the sender has seen.
    pub fn address(&self) -> Sink<Update<T>> {
        let weak: Weak<Shared<T>> = Rc::downgrade(&self.shared);
        let label = self.shared.config.label.clone();
        Sink::new(move |update: Update<T>| match weak.upgrade() {
            Some(shared) => shared.post(update),
            None => Err(SendError::Closed { label: label.clone() }),
        })
    }

    /// Returns a sink replacing the value of the mailbox.
    pub fn sink(&self) -> Sink<T> {
        self.address().adapt(|value: T| -> Update<T> { Box::new(move |_: &T| value) })
    }

    /// Returns the stream of values of this mailbox.
    ///
    /// The current value is replayed to every new subscriber.
    pub fn stream(&self) -> Stream<T> {
        Stream::from_source(Rc::new(self.shared.clone()))
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Number of values published since creation (the initial value is revision 0).
    pub fn revision(&self) -> u64 {
        self.shared.revision.get()
    }

    pub fn label(&self) -> &Atom {
        &self.shared.config.label
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }
}
