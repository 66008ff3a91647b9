use serde::{Deserialize, Serialize};

// ── Entities ────────────────────────────────────────────────────────────────

/// Platform-independent user identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub username: String,
    pub discriminator: String,
}

/// A message author: a [`User`] plus the conversation-scoped display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Platform-independent group (guild / server) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub guild_id: String,
    pub guild_name: String,
}

// ── Session ─────────────────────────────────────────────────────────────────

/// Outward event type of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Message,
    MessageUpdated,
    MessageDeleted,
    ReactionAdded,
    ReactionDeleted,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::MessageUpdated => "message-updated",
            Self::MessageDeleted => "message-deleted",
            Self::ReactionAdded => "reaction-added",
            Self::ReactionDeleted => "reaction-deleted",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation context of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Group,
    Private,
}

impl Subtype {
    pub fn from_is_group(is_group: bool) -> Self {
        if is_group {
            Self::Group
        } else {
            Self::Private
        }
    }
}

/// A message referenced (replied to) by the session's message.
///
/// Quotes never nest: there is no `quote` field here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// One normalized inbound event, ready for the host framework.
///
/// A session is created by a [`SessionFactory`] for every inbound event,
/// filled by the platform adapter, then handed off. It is never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub platform: String,
    pub self_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Emoji identifier for reaction events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Box<Quote>>,
}

impl Session {
    #[must_use]
    pub fn with_kind(self, kind: EventKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    /// Whether the session carries non-empty content.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

// ── Factory ─────────────────────────────────────────────────────────────────

/// Allocates a fresh session for each inbound event (the host bot instance).
pub trait SessionFactory: Send + Sync {
    fn session(&self) -> Session;
}

/// Minimal [`SessionFactory`]: stamps the platform name and the bot's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub platform: String,
    pub self_id: String,
}

impl BotIdentity {
    pub fn new(platform: impl Into<String>, self_id: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            self_id: self_id.into(),
        }
    }
}

impl SessionFactory for BotIdentity {
    fn session(&self) -> Session {
        Session {
            platform: self.platform.clone(),
            self_id: self.self_id.clone(),
            ..Default::default()
        }
    }
}
