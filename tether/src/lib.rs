//! Self-updating references for reactive UI components.
//!
//! A [`Reference`] pairs a snapshot of a value with an address that updates the place where the
//! value is stored. Components receive references to the parts of the application model they
//! display, read them, and write through them, without their parents having to route update
//! messages by hand.
//!
//! ```
//! use tether::{Data, Focus};
//!
//! #[derive(Clone, Debug, PartialEq, Data, Focus)]
//! struct Settings {
//!     volume: u8,
//!     muted: bool,
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Data, Focus)]
//! struct App {
//!     settings: Settings,
//!     title: String,
//! }
//!
//! let refs = tether::signal(App {
//!     settings: Settings { volume: 3, muted: false },
//!     title: "player".into(),
//! });
//!
//! // a component that only knows about `bool`
//! fn toggle(flag: &tether::Reference<bool>) {
//!     tether::transform(flag).modify(|on: &bool| !on);
//! }
//!
//! let root = refs.latest();
//! toggle(&root.field(App::settings).field(Settings::muted));
//!
//! let app = refs.latest().into_value();
//! assert!(app.settings.muted);
//! assert_eq!(app.settings.volume, 3);
//! assert_eq!(app.title, "player");
//! ```
//!
//! Storage is provided by [`Mailbox`]es; [`signal`] creates one and returns the [`Stream`] of
//! references to its value, one per published value.
//!
//! Field foci come from `#[derive(Focus)]`, whose generated code refers to the `tether_common`
//! crate: depend on it alongside this one.
mod error;
mod mailbox;
mod reference;
mod sink;
mod stream;

pub use error::SendError;
pub use mailbox::{Mailbox, MailboxConfig, Update, DEFAULT_MAX_CASCADE};
pub use reference::{field, from_mailbox, map, set, signal, signal_with, transform, Reference};
pub use sink::Sink;
pub use stream::{Events, Stream, Subscription};
pub use tether_common::{focus, Atom, Data, Focus, FocusExt};
