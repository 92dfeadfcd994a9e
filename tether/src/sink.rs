use crate::SendError;
use std::{fmt, rc::Rc};
use tether_common::Data;
use tracing::warn;

/// A write-only capability: accepts messages and publishes them somewhere.
///
/// Sinks are cheap to clone; clones deliver to the same destination.
pub struct Sink<M> {
    post: Rc<dyn Fn(M) -> Result<(), SendError>>,
}

impl<M> Clone for Sink<M> {
    fn clone(&self) -> Self {
        Sink {
            post: self.post.clone(),
        }
    }
}

impl<M> fmt::Debug for Sink<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

impl<M: 'static> Sink<M> {
    /// Creates a sink that calls `post` for every message.
    pub fn new(post: impl Fn(M) -> Result<(), SendError> + 'static) -> Sink<M> {
        Sink { post: Rc::new(post) }
    }

    /// Sends a message, reporting delivery failures.
    pub fn try_send(&self, message: M) -> Result<(), SendError> {
        (self.post)(message)
    }

    /// Sends a message.
    ///
    /// Fire-and-forget: if the message can't be delivered it is dropped and a warning is logged.
    pub fn send(&self, message: M) {
        if let Err(err) = self.try_send(message) {
            warn!("message dropped: {err}");
        }
    }

    /// Returns a sink that converts messages with `f` before forwarding them to this sink.
    pub fn adapt<N: 'static>(&self, f: impl Fn(N) -> M + 'static) -> Sink<N> {
        let inner = self.clone();
        Sink::new(move |message| inner.try_send(f(message)))
    }
}

impl<M: 'static> Data for Sink<M> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.post, &other.post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tether_common::Atom;

    fn recorder() -> (Sink<i32>, Rc<RefCell<Vec<i32>>>) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Sink::new({
            let received = received.clone();
            move |v| {
                received.borrow_mut().push(v);
                Ok(())
            }
        });
        (sink, received)
    }

    #[test]
    fn adapt_converts_before_forwarding() {
        let (sink, received) = recorder();
        let strings = sink.adapt(|s: &'static str| s.len() as i32);
        strings.send("four");
        sink.send(1);
        assert_eq!(*received.borrow(), vec![4, 1]);
    }

    #[test]
    fn send_swallows_errors() {
        let sink: Sink<i32> = Sink::new(|_| {
            Err(SendError::Closed {
                label: Atom::from("gone"),
            })
        });
        sink.send(1);
        assert!(matches!(sink.try_send(1), Err(SendError::Closed { .. })));
    }

    #[test]
    fn clones_are_the_same_sink() {
        let (sink, _) = recorder();
        assert!(sink.same(&sink.clone()));
        assert!(!sink.same(&sink.adapt(|v: i32| v)));
    }
}
