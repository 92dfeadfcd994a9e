//! Foci: reified accessors for a part of a larger value.
//!
//! A focus over `A` with target `B` knows how to look at (and modify) a `B` stored somewhere inside
//! an `A`. Think of it as a sequence of field accesses and indexing operations
//! (e.g. `.settings.colors[2].name`) packaged as a value that can be passed around and composed.
//!
//! Field foci are generated by `#[derive(Focus)]`:
//!
//! ```
//! use tether_common::{Focus, FocusExt};
//!
//! #[derive(Clone, Focus)]
//! struct Counter {
//!     count: i32,
//!     label: String,
//! }
//!
//! let c = Counter { count: 5, label: "clicks".into() };
//! assert_eq!(Counter::count.get(&c), 5);
//! let c = Counter::count.set(9, &c);
//! assert_eq!(c.count, 9);
//! assert_eq!(c.label, "clicks");
//! ```
//!
//! All foci are expected to follow the usual lens laws: `get(set(b, a)) == b` and
//! `set(get(a), a) == a`. A focus that violates them silently corrupts data on write-back.
use std::marker::PhantomData;

mod vec;

pub use vec::{index, Index};

// We use closures to access the target value because this lets foci compute the target on the fly
// (see `Pair`) instead of requiring it to be borrowable from the source.
pub trait Focus<A: ?Sized, B: ?Sized> {
    /// Calls `f` with a reference to the target part of `data`.
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R;

    /// Calls `f` with a mutable reference to the target part of `data`.
    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R;

    /// Focus composition: the resulting focus looks at the part of `B` watched by `rhs`.
    fn then<K, C: ?Sized>(self, rhs: K) -> Then<Self, K, B>
    where
        Self: Sized,
        K: Focus<B, C>,
    {
        Then(self, rhs, PhantomData)
    }
}

/// Value-level accessors, for foci over cloneable data.
pub trait FocusExt<A: Clone, B: Clone>: Focus<A, B> {
    /// Returns a copy of the target part of `data`.
    fn get(&self, data: &A) -> B {
        self.with(data, |x| x.clone())
    }

    /// Returns a copy of `data` with the target part replaced by `value`.
    fn set(&self, value: B, data: &A) -> A {
        let mut data = data.clone();
        self.with_mut(&mut data, |x| *x = value);
        data
    }

    /// Returns a copy of `data` with `f` applied to the target part.
    fn modify(&self, data: &A, f: impl FnOnce(&B) -> B) -> A {
        let mut data = data.clone();
        self.with_mut(&mut data, |x| *x = f(x));
        data
    }
}

impl<A: Clone, B: Clone, L: Focus<A, B>> FocusExt<A, B> for L {}

/// Identity focus.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl<A: ?Sized> Focus<A, A> for Identity {
    fn with<R, F: FnOnce(&A) -> R>(&self, data: &A, f: F) -> R {
        f(data)
    }

    fn with_mut<R, F: FnOnce(&mut A) -> R>(&self, data: &mut A, f: F) -> R {
        f(data)
    }
}

/// Focus composition: combines `Focus<A,B>` and `Focus<B,C>` to `Focus<A,C>`.
///
/// Equivalent to applying two foci in succession.
#[derive(Debug)]
pub struct Then<K, L, B: ?Sized>(pub K, pub L, pub PhantomData<B>);

// #26925
impl<K: Clone, L: Clone, B: ?Sized> Clone for Then<K, L, B> {
    fn clone(&self) -> Self {
        Then(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<K: Copy, L: Copy, B: ?Sized> Copy for Then<K, L, B> {}

impl<K, L, A: ?Sized, B: ?Sized, C: ?Sized> Focus<A, C> for Then<K, L, B>
where
    K: Focus<A, B>,
    L: Focus<B, C>,
{
    fn with<R, F: FnOnce(&C) -> R>(&self, data: &A, f: F) -> R {
        self.0.with(data, |data| self.1.with(data, f))
    }

    fn with_mut<R, F: FnOnce(&mut C) -> R>(&self, data: &mut A, f: F) -> R {
        self.0.with_mut(data, |data| self.1.with_mut(data, f))
    }
}

/// A focus built from a getter and a setter.
///
/// See [`pair`].
#[derive(Copy, Clone)]
pub struct Pair<G, S> {
    get: G,
    set: S,
}

/// Creates a focus from a `get` function returning the target, and a `set` function returning a
/// copy of the source with the target replaced.
///
/// ```
/// use tether_common::{focus, FocusExt};
///
/// // the first component of a pair, written by hand
/// let first = focus::pair(|p: &(i32, i32)| p.0, |v, p: &(i32, i32)| (v, p.1));
/// assert_eq!(first.set(3, &(1, 2)), (3, 2));
/// ```
pub fn pair<A, B, G, S>(get: G, set: S) -> Pair<G, S>
where
    G: Fn(&A) -> B,
    S: Fn(B, &A) -> A,
{
    Pair { get, set }
}

impl<A, B, G, S> Focus<A, B> for Pair<G, S>
where
    G: Fn(&A) -> B,
    S: Fn(B, &A) -> A,
{
    fn with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> R {
        f(&(self.get)(data))
    }

    fn with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> R {
        let mut target = (self.get)(data);
        let result = f(&mut target);
        *data = (self.set)(target, data);
        result
    }
}
