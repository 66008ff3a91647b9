//! KOOK inline markup → portable markup.
//!
//! KOOK text messages encode rich references inline:
//!
//! - `@name#1234` user mention (name, then the user id)
//! - `@全体成员` / `@在线成员` mention everyone / everyone online
//! - `@role:42;` role mention
//! - `#channel:42;` channel reference
//!
//! Each form is rewritten at most once per message: only the first
//! occurrence is translated, later ones stay as plain text.

use std::{borrow::Cow, sync::LazyLock};

use {
    portside_channels::Segment,
    regex::{Captures, Regex},
};

use crate::types::{MessageBase, MessageMeta, MessageType};

const MENTION_ALL: &str = "@全体成员";
const MENTION_HERE: &str = "@在线成员";

static USER_MENTION: LazyLock<Regex> = LazyLock::new(|| compile(r"@(.+?)#(\d+)"));
static ROLE_MENTION: LazyLock<Regex> = LazyLock::new(|| compile(r"@role:(\d+);"));
static CHANNEL_REF: LazyLock<Regex> = LazyLock::new(|| compile(r"#channel:(\d+);"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static markup pattern")
}

/// Render the portable content of a message record.
///
/// Text is rewritten with [`translate_text`]; images become an image segment
/// whose file name comes from the attachment metadata. Every other message
/// type has no portable content.
pub fn translate(base: &impl MessageBase, meta: &impl MessageMeta) -> Option<String> {
    match base.message_type() {
        MessageType::Text => Some(translate_text(base.content())),
        MessageType::Image => {
            let file = meta.attachments().and_then(|a| a.name.clone());
            Some(Segment::image(base.content(), file).to_string())
        },
        _ => None,
    }
}

/// Rewrite KOOK inline references in text to portable markup.
pub fn translate_text(content: &str) -> String {
    let text = USER_MENTION.replace(content, |caps: &Captures<'_>| {
        Segment::mention_user(&caps[2], Some(caps[1].to_string())).to_string()
    });
    let text = replace_first(text, MENTION_ALL, &Segment::mention_all().to_string());
    let text = replace_first(text, MENTION_HERE, &Segment::mention_here().to_string());
    let text = ROLE_MENTION
        .replace(&text, |caps: &Captures<'_>| {
            Segment::mention_role(&caps[1]).to_string()
        })
        .into_owned();
    CHANNEL_REF
        .replace(&text, |caps: &Captures<'_>| Segment::sharp(&caps[1]).to_string())
        .into_owned()
}

fn replace_first<'a>(text: Cow<'a, str>, needle: &str, replacement: &str) -> Cow<'a, str> {
    if text.contains(needle) {
        Cow::Owned(text.replacen(needle, replacement, 1))
    } else {
        text
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::types::QuotedMessage, rstest::rstest, serde_json::json};

    fn record(value: serde_json::Value) -> QuotedMessage {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case("hello", "hello")]
    #[case("hi @alice#1234 there", "hi [mention:user=1234,name=alice] there")]
    #[case("@全体成员 meeting", "[mention:type=all] meeting")]
    #[case("@在线成员 ping", "[mention:type=here] ping")]
    #[case("ping @role:42; now", "ping [mention:role=42] now")]
    #[case("see #channel:123; please", "see [channel:id=123] please")]
    fn rewrites_inline_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(translate_text(input), expected);
    }

    #[test]
    fn only_first_user_mention_is_rewritten() {
        assert_eq!(
            translate_text("@a#1 and @b#2"),
            "[mention:user=1,name=a] and @b#2"
        );
    }

    #[test]
    fn only_first_channel_reference_is_rewritten() {
        assert_eq!(
            translate_text("#channel:1; #channel:2;"),
            "[channel:id=1] #channel:2;"
        );
    }

    #[test]
    fn channel_reference_keeps_surrounding_text() {
        let out = translate_text("before #channel:123; after");
        assert_eq!(out.matches("[channel:id=123]").count(), 1);
        assert!(out.starts_with("before "));
        assert!(out.ends_with(" after"));
    }

    #[test]
    fn combined_rewrites_apply_in_order() {
        assert_eq!(
            translate_text("@bob#7 @全体成员 @在线成员 @role:3; #channel:9;"),
            "[mention:user=7,name=bob] [mention:type=all] [mention:type=here] \
             [mention:role=3] [channel:id=9]"
        );
    }

    #[test]
    fn text_record_is_translated() {
        let msg = record(json!({ "type": 1, "content": "yo #channel:5;" }));
        assert_eq!(translate(&msg, &msg).as_deref(), Some("yo [channel:id=5]"));
    }

    #[test]
    fn image_record_uses_attachment_name() {
        let msg = record(json!({
            "type": 2,
            "content": "https://x/img.png",
            "attachments": { "type": "image", "name": "pic.png" },
        }));
        assert_eq!(
            translate(&msg, &msg).as_deref(),
            Some("[image:url=https://x/img.png,file=pic.png]")
        );
    }

    #[test]
    fn image_without_attachment_has_no_file_name() {
        let msg = record(json!({ "type": 2, "content": "https://x/img.png" }));
        assert_eq!(
            translate(&msg, &msg).as_deref(),
            Some("[image:url=https://x/img.png]")
        );
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(9)]
    #[case(10)]
    #[case(255)]
    fn other_types_have_no_content(#[case] kind: u16) {
        let msg = record(json!({ "type": kind, "content": "whatever" }));
        assert!(translate(&msg, &msg).is_none());
    }
}
