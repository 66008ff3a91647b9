use thiserror::Error;

/// Envelope decoding failures. None of these escape
/// [`adapt_session`](crate::adapt_session): they are logged and the event is
/// dropped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("envelope must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("failed to decode {record}: {source}")]
    Decode {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[must_use]
    pub fn decode(record: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { record, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
