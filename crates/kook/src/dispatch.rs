//! Envelope classification and dispatch.

use {
    portside_channels::{EventKind, Session, SessionFactory},
    serde_json::Value,
    tracing::{debug, warn},
};

use crate::{
    Error, Result,
    adapt::{adapt_message_create, adapt_message_modify, adapt_reaction},
    normalize::camelize_keys,
    types::{Envelope, MessageExtra, MessageType, Notice, NoticeKind},
};

/// A normalized envelope, classified by shape.
#[derive(Debug, Clone)]
pub enum Event {
    Message {
        data: Envelope,
        extra: MessageExtra,
    },
    Notice {
        data: Envelope,
        notice: Notice,
    },
}

impl Event {
    /// Camelize the envelope's keys into a working copy and decode it.
    pub fn classify(raw: &Value) -> Result<Self> {
        let normalized = Value::Object(camelize_keys(raw)?);
        let mut data: Envelope =
            serde_json::from_value(normalized).map_err(|e| Error::decode("envelope", e))?;
        let extra = std::mem::take(&mut data.extra);
        if extra.is_null() {
            return Ok(match data.kind {
                MessageType::System => Self::Notice {
                    data,
                    notice: Notice::default(),
                },
                _ => Self::Message {
                    data,
                    extra: MessageExtra::default(),
                },
            });
        }
        match data.kind {
            MessageType::System => {
                let notice =
                    serde_json::from_value(extra).map_err(|e| Error::decode("notice", e))?;
                Ok(Self::Notice { data, notice })
            },
            // A broken extra only costs the message its metadata.
            _ => {
                let extra = serde_json::from_value(extra).unwrap_or_else(|e| {
                    warn!(
                        error = %Error::decode("message extra", e),
                        message_id = ?data.msg_id,
                        "ignoring undecodable kook message extra"
                    );
                    MessageExtra::default()
                });
                Ok(Self::Message { data, extra })
            },
        }
    }
}

/// Normalize one raw gateway event into a session.
///
/// Returns `None` when the event is dropped: an unknown system notice, a
/// fresh message without representable content, or an envelope that cannot
/// be decoded at all.
pub fn adapt_session(bot: &impl SessionFactory, raw: &Value) -> Option<Session> {
    let event = match Event::classify(raw) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "dropping undecodable kook event");
            return None;
        },
    };
    let session = bot.session();
    match event {
        Event::Notice { data, notice } => {
            let body = &notice.body;
            let session = match NoticeKind::from(notice.kind.as_str()) {
                NoticeKind::UpdatedMessage | NoticeKind::UpdatedPrivateMessage => {
                    adapt_message_modify(&data, body, session.with_kind(EventKind::MessageUpdated))
                },
                NoticeKind::DeletedMessage | NoticeKind::DeletedPrivateMessage => {
                    adapt_message_modify(&data, body, session.with_kind(EventKind::MessageDeleted))
                },
                NoticeKind::AddedReaction | NoticeKind::PrivateAddedReaction => {
                    adapt_reaction(body).apply(session.with_kind(EventKind::ReactionAdded))
                },
                NoticeKind::DeletedReaction | NoticeKind::PrivateDeletedReaction => {
                    adapt_reaction(body).apply(session.with_kind(EventKind::ReactionDeleted))
                },
                NoticeKind::Unknown(kind) => {
                    debug!(notice = %kind, "dropping unhandled kook notice");
                    return None;
                },
            };
            Some(session)
        },
        Event::Message { data, extra } => {
            let session = adapt_message_create(&data, &extra, session.with_kind(EventKind::Message));
            if !session.has_content() {
                debug!(
                    message_id = ?session.message_id,
                    message_type = ?data.kind,
                    "dropping kook message without portable content"
                );
                return None;
            }
            Some(session)
        },
    }
}
