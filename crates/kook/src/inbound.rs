//! Gateway frame handling.
//!
//! The transport (WebSocket or webhook) hands every text frame to
//! [`KookInbound::handle_frame`]. Event frames are normalized into sessions
//! and forwarded to the host sink; every other signal belongs to connection
//! management and is ignored here.

use std::sync::Arc;

use {
    anyhow::Context,
    portside_channels::{SessionFactory, SessionSink},
    serde::Deserialize,
    serde_json::Value,
    tracing::{debug, trace},
};

use crate::{config::KookAccountConfig, dispatch::adapt_session};

/// Gateway signal codes (`s` of a frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Event,
    Hello,
    Ping,
    Pong,
    Resume,
    Reconnect,
    ResumeAck,
    Unknown(u8),
}

impl From<u8> for Signal {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Event,
            1 => Self::Hello,
            2 => Self::Ping,
            3 => Self::Pong,
            4 => Self::Resume,
            5 => Self::Reconnect,
            6 => Self::ResumeAck,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Frame {
    s: u8,
    #[serde(default)]
    d: Value,
    #[serde(default)]
    sn: Option<u64>,
}

/// Inbound side of one KOOK bot account.
pub struct KookInbound<F> {
    account_id: String,
    config: KookAccountConfig,
    bot: F,
    sink: Arc<dyn SessionSink>,
}

impl<F: SessionFactory> KookInbound<F> {
    pub fn new(
        account_id: impl Into<String>,
        config: KookAccountConfig,
        bot: F,
        sink: Arc<dyn SessionSink>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            config,
            bot,
            sink,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn config(&self) -> &KookAccountConfig {
        &self.config
    }

    /// Handle one raw gateway frame. Returns the decoded signal.
    pub async fn handle_frame(&self, text: &str) -> anyhow::Result<Signal> {
        let frame: Frame = serde_json::from_str(text).context("invalid kook gateway frame")?;
        let signal = Signal::from(frame.s);
        if signal != Signal::Event {
            trace!(account_id = %self.account_id, ?signal, "ignoring non-event frame");
            return Ok(signal);
        }

        match adapt_session(&self.bot, &frame.d) {
            Some(session) => {
                debug!(
                    account_id = %self.account_id,
                    channel_type = "kook",
                    sn = ?frame.sn,
                    kind = ?session.kind,
                    "inbound session"
                );
                self.sink.emit(session).await;
            },
            None => {
                debug!(account_id = %self.account_id, sn = ?frame.sn, "inbound event dropped");
            },
        }
        Ok(signal)
    }
}
