//! Push-based streams of values.
use std::{cell::RefCell, collections::VecDeque, fmt, rc::Rc};

/// Callback invoked with each value emitted by a stream.
pub(crate) type Observer<T> = Rc<dyn Fn(&T)>;

/// Something that emits values over time and remembers the last one.
pub(crate) trait Source<T> {
    /// Registers an observer. It is called immediately with the latest value, then once per
    /// emission, until the returned subscription is dropped.
    fn subscribe(&self, observer: Observer<T>) -> Subscription;

    /// Returns the latest emitted value.
    fn latest(&self) -> T;
}

/// An unbounded, time-ordered sequence of values.
///
/// Streams are lazy: nothing happens until someone subscribes. Each subscriber first receives the
/// latest value, then every subsequent one, in emission order. Cloning a stream doesn't duplicate
/// emissions, clones observe the same source.
pub struct Stream<T> {
    source: Rc<dyn Source<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Stream {
            source: self.source.clone(),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl<T: 'static> Stream<T> {
    pub(crate) fn from_source(source: Rc<dyn Source<T>>) -> Stream<T> {
        Stream { source }
    }

    /// Calls `f` with the latest value and then with every new one.
    ///
    /// Dropping the returned subscription stops the calls.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(Rc::new(f))
    }

    /// Returns the latest value of the stream.
    pub fn latest(&self) -> T {
        self.source.latest()
    }

    /// Returns a stream whose values are those of this stream transformed by `f`.
    ///
    /// `f` should be pure: it is called once per emission per subscriber, and again by `latest`.
    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Stream<U> {
        Stream::from_source(Rc::new(Map {
            parent: self.clone(),
            f: Rc::new(f),
        }))
    }

    /// Buffers emissions, starting with the latest value, so that they can be consumed as an
    /// iterator.
    pub fn events(&self) -> Events<T>
    where
        T: Clone,
    {
        let buffer = Rc::new(RefCell::new(VecDeque::new()));
        let subscription = self.subscribe({
            let buffer = buffer.clone();
            move |value: &T| buffer.borrow_mut().push_back(value.clone())
        });
        Events {
            buffer,
            _subscription: subscription,
        }
    }
}

struct Map<A, B> {
    parent: Stream<A>,
    f: Rc<dyn Fn(&A) -> B>,
}

impl<A: 'static, B: 'static> Source<B> for Map<A, B> {
    fn subscribe(&self, observer: Observer<B>) -> Subscription {
        let f = self.f.clone();
        self.parent.subscribe(move |value| observer(&f(value)))
    }

    fn latest(&self) -> B {
        (self.f)(&self.parent.latest())
    }
}

/// Keeps an observer registered on a stream. The observer is removed when this is dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(unsubscribe: impl FnOnce() + 'static) -> Subscription {
        Subscription {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Keeps the observer registered for as long as the source lives.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Emissions of a stream, buffered. See [`Stream::events`].
///
/// `next` returns `None` when no emission is pending; more may arrive later.
pub struct Events<T> {
    buffer: Rc<RefCell<VecDeque<T>>>,
    _subscription: Subscription,
}

impl<T> Events<T> {
    /// Number of buffered emissions.
    pub fn pending(&self) -> usize {
        self.buffer.borrow().len()
    }
}

impl<T> Iterator for Events<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.borrow_mut().pop_front()
    }
}
