//! KOOK channel adapter.
//!
//! Normalizes KOOK gateway events (messages, edits, deletions and
//! reactions) into portable [`Session`](portside_channels::Session)s. The
//! entry point is [`adapt_session`]; [`KookInbound`] wraps it for raw
//! gateway frames.

pub mod adapt;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inbound;
pub mod markup;
pub mod normalize;
pub mod types;

pub use {
    config::KookAccountConfig,
    dispatch::adapt_session,
    error::{Error, Result},
    inbound::KookInbound,
};
