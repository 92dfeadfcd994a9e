use tether_common::Atom;
use thiserror::Error;

/// Why a message could not be delivered to a mailbox.
#[derive(Clone, Debug, Error)]
pub enum SendError {
    /// The mailbox (and every stream reading from it) has been dropped.
    #[error("mailbox `{label}` has been dropped")]
    Closed { label: Atom },
    /// Too many updates were sent while the mailbox was publishing, usually because a subscriber
    /// writes back into the mailbox it observes on every change.
    #[error("mailbox `{label}`: more than {limit} updates in a single delivery")]
    CascadeLimit { label: Atom, limit: usize },
}

impl SendError {
    /// Label of the mailbox the message was addressed to.
    pub fn label(&self) -> &Atom {
        match self {
            SendError::Closed { label } | SendError::CascadeLimit { label, .. } => label,
        }
    }
}
