use crate::Data;
use std::{fmt, ops::Deref};
use string_cache::DefaultAtom;

/// Interned strings. Used for mailbox labels in log output and errors.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Atom(DefaultAtom);

impl Atom {
    /// The label given to mailboxes that were not named explicitly.
    pub fn anonymous() -> Atom {
        Atom::from("<anonymous>")
    }
}

impl Default for Atom {
    fn default() -> Self {
        Atom::anonymous()
    }
}

impl Deref for Atom {
    type Target = DefaultAtom;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Data for Atom {
    fn same(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> From<T> for Atom
where
    DefaultAtom: From<T>,
{
    fn from(value: T) -> Self {
        Atom(DefaultAtom::from(value))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
