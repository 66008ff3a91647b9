//! Portable session model shared by every platform adapter.
//!
//! Adapters (KOOK, ...) translate their gateway events into a [`Session`],
//! render rich content with the bracketed [`markup`] encoding, and hand the
//! result to a host-provided [`SessionSink`].

pub mod markup;
pub mod session;
pub mod sink;

pub use {
    markup::Segment,
    session::{
        Author, BotIdentity, EventKind, Guild, Quote, Session, SessionFactory, Subtype, User,
    },
    sink::SessionSink,
};
