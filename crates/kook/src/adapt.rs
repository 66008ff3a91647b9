//! Field adapters from KOOK records to the portable session model.
//!
//! Each adapter returns a partial record; the partial records are merged
//! into the session by value, so no stage holds a reference to a
//! half-built session.

use portside_channels::{self as portable, Quote, Session, Subtype};

use crate::{
    markup,
    types::{self, Envelope, MessageBase, MessageExtra, MessageMeta, NoticeBody},
};

// ── Entities ────────────────────────────────────────────────────────────────

pub fn adapt_guild(guild: &types::Guild) -> portable::Guild {
    portable::Guild {
        guild_id: guild.id.clone(),
        guild_name: guild.name.clone(),
    }
}

pub fn adapt_user(user: &types::User) -> portable::User {
    portable::User {
        user_id: user.id.clone(),
        avatar: user.avatar.clone(),
        username: user.username.clone(),
        discriminator: user.identify_num.clone(),
    }
}

pub fn adapt_author(author: &types::Author) -> portable::Author {
    portable::Author {
        user: adapt_user(&author.user),
        nickname: author.nickname.clone(),
    }
}

// ── Message fields ──────────────────────────────────────────────────────────

/// Author and content fields common to every message-bearing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFields {
    pub author: Option<portable::Author>,
    pub user_id: Option<String>,
    pub content: Option<String>,
}

impl MessageFields {
    fn into_quote(
        self,
        message_id: Option<String>,
        channel_id: Option<String>,
        subtype: Subtype,
    ) -> Quote {
        Quote {
            message_id,
            channel_id,
            subtype: Some(subtype),
            content: self.content,
            author: self.author,
            user_id: self.user_id,
        }
    }
}

/// Base adapter: author (when present) plus translated content.
pub fn adapt_message(base: &impl MessageBase, meta: &impl MessageMeta) -> MessageFields {
    let author = meta.author();
    MessageFields {
        author: author.map(adapt_author),
        user_id: author.map(|a| a.user.id.clone()),
        content: markup::translate(base, meta),
    }
}

/// Message fields plus identity, time, conversation subtype and quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub fields: MessageFields,
    pub message_id: Option<String>,
    pub timestamp: Option<i64>,
    pub subtype: Subtype,
    pub quote: Option<Quote>,
}

impl MessageContext {
    #[must_use]
    pub fn apply(self, session: Session) -> Session {
        Session {
            author: self.fields.author.or(session.author),
            user_id: self.fields.user_id.or(session.user_id),
            content: self.fields.content.or(session.content),
            message_id: self.message_id,
            timestamp: self.timestamp,
            subtype: Some(self.subtype),
            quote: self.quote.map(Box::new),
            ..session
        }
    }
}

/// Context adapter. `channel_id` is the already resolved channel of the
/// message; the quote inherits it together with the subtype, since quotes
/// carry no channel identity on the wire.
pub fn adapt_message_context(
    data: &Envelope,
    meta: &impl MessageMeta,
    channel_id: Option<&str>,
) -> MessageContext {
    let subtype = Subtype::from_is_group(data.is_group());
    let quote = meta.quote().map(|quoted| {
        adapt_message(quoted, quoted).into_quote(
            quoted.id.clone(),
            channel_id.map(str::to_owned),
            subtype,
        )
    });
    MessageContext {
        fields: adapt_message(data, meta),
        message_id: data.msg_id.clone(),
        timestamp: data.msg_timestamp,
        subtype,
        quote,
    }
}

/// Fresh message: channel id is the target for group chats and the private
/// session code for direct messages.
#[must_use]
pub fn adapt_message_create(data: &Envelope, extra: &MessageExtra, session: Session) -> Session {
    let is_group = data.is_group();
    let channel_id = if is_group {
        data.target_id.clone()
    } else {
        extra.code.clone()
    };
    let session = adapt_message_context(data, extra, channel_id.as_deref()).apply(session);
    Session {
        guild_id: extra.guild_id.clone(),
        channel_name: extra.channel_name.clone(),
        subtype: Some(Subtype::from_is_group(is_group)),
        channel_id,
        ..session
    }
}

/// Edited or deleted message: ids come straight from the notice body.
#[must_use]
pub fn adapt_message_modify(data: &Envelope, body: &NoticeBody, session: Session) -> Session {
    let session = adapt_message_context(data, body, body.channel_id.as_deref()).apply(session);
    Session {
        message_id: body.msg_id.clone(),
        channel_id: body.channel_id.clone(),
        ..session
    }
}

// ── Reactions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionFields {
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    pub user_id: Option<String>,
    pub emoji: Option<String>,
}

impl ReactionFields {
    #[must_use]
    pub fn apply(self, session: Session) -> Session {
        Session {
            channel_id: self.channel_id,
            message_id: self.message_id,
            user_id: self.user_id,
            emoji: self.emoji,
            ..session
        }
    }
}

pub fn adapt_reaction(body: &NoticeBody) -> ReactionFields {
    ReactionFields {
        channel_id: body.channel_id.clone(),
        message_id: body.msg_id.clone(),
        user_id: body.user_id.clone(),
        emoji: body.emoji.as_ref().and_then(|e| e.id.clone()),
    }
}
