//! Foci over sequence elements.
use crate::Focus;
use std::collections::VecDeque;

/// A focus that looks at a particular item in a sequence.
///
/// It implements `Focus<Vec<T>, T>`, `Focus<VecDeque<T>, T>`, `Focus<[T; N], T>` and, with the
/// `imbl` feature, `Focus<imbl::Vector<T>, T>`.
///
/// # Panics
///
/// Accessing an out-of-range element panics, like indexing does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Index(pub usize);

/// Returns a focus on the element at position `i`.
pub fn index(i: usize) -> Index {
    Index(i)
}

impl<T> Focus<Vec<T>, T> for Index {
    fn with<R, F: FnOnce(&T) -> R>(&self, data: &Vec<T>, f: F) -> R {
        f(&data[self.0])
    }

    fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut Vec<T>, f: F) -> R {
        f(&mut data[self.0])
    }
}

impl<T> Focus<VecDeque<T>, T> for Index {
    fn with<R, F: FnOnce(&T) -> R>(&self, data: &VecDeque<T>, f: F) -> R {
        f(&data[self.0])
    }

    fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut VecDeque<T>, f: F) -> R {
        f(&mut data[self.0])
    }
}

impl<T, const N: usize> Focus<[T; N], T> for Index {
    fn with<R, F: FnOnce(&T) -> R>(&self, data: &[T; N], f: F) -> R {
        f(&data[self.0])
    }

    fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut [T; N], f: F) -> R {
        f(&mut data[self.0])
    }
}

#[cfg(feature = "imbl")]
impl<T: Clone> Focus<imbl::Vector<T>, T> for Index {
    fn with<R, F: FnOnce(&T) -> R>(&self, data: &imbl::Vector<T>, f: F) -> R {
        f(&data[self.0])
    }

    fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut imbl::Vector<T>, f: F) -> R {
        f(&mut data[self.0])
    }
}
