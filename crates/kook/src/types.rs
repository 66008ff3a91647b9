//! KOOK gateway wire records.
//!
//! Only the fields the adapters read are decoded. Every field is optional
//! or defaulted, and `null` reads as absent: the gateway omits and nulls
//! fields freely, and neither may fail decoding. Top-level envelope keys are
//! camelized before decoding (see [`crate::normalize`]); nested records keep
//! their snake_case wire names.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `type` discriminant shared by envelopes and message records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "u16")]
pub enum MessageType {
    Text,
    Image,
    Video,
    File,
    Audio,
    KMarkdown,
    Card,
    System,
    #[default]
    Unknown,
}

impl From<u16> for MessageType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::Text,
            2 => Self::Image,
            3 => Self::Video,
            4 => Self::File,
            8 => Self::Audio,
            9 => Self::KMarkdown,
            10 => Self::Card,
            255 => Self::System,
            _ => Self::Unknown,
        }
    }
}

/// Platform user record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub username: String,
    #[serde(deserialize_with = "null_default")]
    pub identify_num: String,
    pub avatar: Option<String>,
}

/// User record as it appears on a message, with the guild nickname.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(flatten)]
    pub user: User,
    pub nickname: Option<String>,
}

/// Platform guild (server) record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Guild {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

/// Media attached to a message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub name: Option<String>,
}

/// Fields shared by every record that carries message content.
pub trait MessageBase {
    fn message_type(&self) -> MessageType;
    fn content(&self) -> &str;
}

/// Sibling metadata of message content: author, attachment and quote.
pub trait MessageMeta {
    fn author(&self) -> Option<&Author>;
    fn attachments(&self) -> Option<&Attachment>;
    fn quote(&self) -> Option<&QuotedMessage>;
}

/// A message quoted (replied to) by another message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuotedMessage {
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: MessageType,
    #[serde(deserialize_with = "null_default")]
    pub content: String,
    pub author: Option<Author>,
    pub attachments: Option<Attachment>,
}

impl MessageBase for QuotedMessage {
    fn message_type(&self) -> MessageType {
        self.kind
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl MessageMeta for QuotedMessage {
    fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    fn attachments(&self) -> Option<&Attachment> {
        self.attachments.as_ref()
    }

    // Quotes do not nest.
    fn quote(&self) -> Option<&QuotedMessage> {
        None
    }
}

/// Event envelope (the `d` of a gateway frame) after key camelization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: MessageType,
    pub channel_type: Option<String>,
    pub target_id: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub content: String,
    pub msg_id: Option<String>,
    pub msg_timestamp: Option<i64>,
    pub extra: serde_json::Value,
}

impl Envelope {
    pub fn is_group(&self) -> bool {
        self.channel_type.as_deref() == Some("GROUP")
    }
}

impl MessageBase for Envelope {
    fn message_type(&self) -> MessageType {
        self.kind
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// `extra` of a regular (non-system) message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageExtra {
    pub guild_id: Option<String>,
    pub channel_name: Option<String>,
    /// Private-chat session code; the channel id of direct messages.
    pub code: Option<String>,
    pub author: Option<Author>,
    pub attachments: Option<Attachment>,
    pub quote: Option<QuotedMessage>,
}

impl MessageMeta for MessageExtra {
    fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    fn attachments(&self) -> Option<&Attachment> {
        self.attachments.as_ref()
    }

    fn quote(&self) -> Option<&QuotedMessage> {
        self.quote.as_ref()
    }
}

/// `extra` of a system (type 255) envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Notice {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub body: NoticeBody,
}

/// Emoji reference in a reaction notice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Emoji {
    pub id: Option<String>,
}

/// Body of a system notice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NoticeBody {
    pub msg_id: Option<String>,
    pub channel_id: Option<String>,
    pub user_id: Option<String>,
    pub emoji: Option<Emoji>,
    pub author: Option<Author>,
    pub attachments: Option<Attachment>,
    pub quote: Option<QuotedMessage>,
}

impl MessageMeta for NoticeBody {
    fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    fn attachments(&self) -> Option<&Attachment> {
        self.attachments.as_ref()
    }

    fn quote(&self) -> Option<&QuotedMessage> {
        self.quote.as_ref()
    }
}

/// System notice kinds the adapter understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    UpdatedMessage,
    UpdatedPrivateMessage,
    DeletedMessage,
    DeletedPrivateMessage,
    AddedReaction,
    PrivateAddedReaction,
    DeletedReaction,
    PrivateDeletedReaction,
    Unknown(String),
}

impl From<&str> for NoticeKind {
    fn from(value: &str) -> Self {
        match value {
            "updated_message" => Self::UpdatedMessage,
            "updated_private_message" => Self::UpdatedPrivateMessage,
            "deleted_message" => Self::DeletedMessage,
            "deleted_private_message" => Self::DeletedPrivateMessage,
            "added_reaction" => Self::AddedReaction,
            "private_added_reaction" => Self::PrivateAddedReaction,
            "deleted_reaction" => Self::DeletedReaction,
            "private_deleted_reaction" => Self::PrivateDeletedReaction,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest, serde_json::json};

    #[rstest]
    #[case(1, MessageType::Text)]
    #[case(2, MessageType::Image)]
    #[case(9, MessageType::KMarkdown)]
    #[case(255, MessageType::System)]
    #[case(42, MessageType::Unknown)]
    fn message_type_codes(#[case] code: u16, #[case] expected: MessageType) {
        let kind: MessageType = serde_json::from_value(json!(code)).unwrap();
        assert_eq!(kind, expected);
    }

    #[test]
    fn author_reads_flattened_user() {
        let author: Author = serde_json::from_value(json!({
            "id": "U1",
            "username": "alice",
            "identify_num": "0001",
            "avatar": "a.png",
            "nickname": "Al",
            "roles": [1, 2],
        }))
        .unwrap();
        assert_eq!(author.user.id, "U1");
        assert_eq!(author.user.identify_num, "0001");
        assert_eq!(author.nickname.as_deref(), Some("Al"));
    }

    #[test]
    fn null_fields_read_as_absent() {
        let quoted: QuotedMessage = serde_json::from_value(json!({
            "id": null,
            "type": null,
            "content": null,
            "author": { "id": "U1", "username": null, "identify_num": null },
        }))
        .unwrap();
        assert_eq!(quoted.kind, MessageType::Unknown);
        assert_eq!(quoted.content, "");
        let author = quoted.author.unwrap();
        assert_eq!(author.user.id, "U1");
        assert_eq!(author.user.username, "");

        let notice: Notice =
            serde_json::from_value(json!({ "type": "deleted_message", "body": null })).unwrap();
        assert!(notice.body.msg_id.is_none());
    }

    #[test]
    fn notice_body_tolerates_missing_fields() {
        let notice: Notice = serde_json::from_value(json!({
            "type": "deleted_reaction",
            "body": { "msg_id": "M1" },
        }))
        .unwrap();
        assert_eq!(NoticeKind::from(notice.kind.as_str()), NoticeKind::DeletedReaction);
        assert_eq!(notice.body.msg_id.as_deref(), Some("M1"));
        assert!(notice.body.emoji.is_none());
        assert!(notice.body.quote.is_none());
    }

    #[test]
    fn unknown_notice_kind_is_kept() {
        assert_eq!(
            NoticeKind::from("joined_guild"),
            NoticeKind::Unknown("joined_guild".into())
        );
    }

    #[test]
    fn envelope_group_detection() {
        let group = Envelope {
            channel_type: Some("GROUP".into()),
            ..Default::default()
        };
        let person = Envelope {
            channel_type: Some("PERSON".into()),
            ..Default::default()
        };
        assert!(group.is_group());
        assert!(!person.is_group());
        assert!(!Envelope::default().is_group());
    }
}
