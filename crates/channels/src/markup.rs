//! Portable inline markup.
//!
//! Rich content is encoded as bracketed tags embedded in plain text:
//! `[<tag>:<key>=<value>,...]`. Attribute values are escaped so that a
//! literal `[`, `]`, `,` or `&` never terminates a tag early.

use std::fmt;

/// A single portable markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mention of a single user, optionally with the display name seen by the sender.
    MentionUser { id: String, name: Option<String> },
    /// Mention of every member of the conversation.
    MentionAll,
    /// Mention of every member currently online.
    MentionHere,
    /// Mention of a role.
    MentionRole { id: String },
    /// Reference to a channel.
    Sharp { id: String },
    /// An image with its source URL and display file name.
    Image { url: String, file: Option<String> },
}

impl Segment {
    pub fn mention_user(id: impl Into<String>, name: Option<String>) -> Self {
        Self::MentionUser {
            id: id.into(),
            name,
        }
    }

    pub fn mention_all() -> Self {
        Self::MentionAll
    }

    pub fn mention_here() -> Self {
        Self::MentionHere
    }

    pub fn mention_role(id: impl Into<String>) -> Self {
        Self::MentionRole { id: id.into() }
    }

    pub fn sharp(id: impl Into<String>) -> Self {
        Self::Sharp { id: id.into() }
    }

    pub fn image(url: impl Into<String>, file: Option<String>) -> Self {
        Self::Image {
            url: url.into(),
            file,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::MentionUser { .. }
            | Self::MentionAll
            | Self::MentionHere
            | Self::MentionRole { .. } => "mention",
            Self::Sharp { .. } => "channel",
            Self::Image { .. } => "image",
        }
    }

    fn attrs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::MentionUser { id, name } => {
                let mut attrs = vec![("user", id.as_str())];
                if let Some(name) = name {
                    attrs.push(("name", name.as_str()));
                }
                attrs
            },
            Self::MentionAll => vec![("type", "all")],
            Self::MentionHere => vec![("type", "here")],
            Self::MentionRole { id } => vec![("role", id.as_str())],
            Self::Sharp { id } => vec![("id", id.as_str())],
            Self::Image { url, file } => {
                let mut attrs = vec![("url", url.as_str())];
                if let Some(file) = file {
                    attrs.push(("file", file.as_str()));
                }
                attrs
            },
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.tag())?;
        for (i, (key, value)) in self.attrs().into_iter().enumerate() {
            let sep = if i == 0 {
                ':'
            } else {
                ','
            };
            write!(f, "{sep}{key}={}", escape(value))?;
        }
        f.write_str("]")
    }
}

/// Escape an attribute value for embedding in a tag.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            ',' => out.push_str("&#44;"),
            _ => out.push(ch),
        }
    }
    out
}
