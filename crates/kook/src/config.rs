use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// How the adapter receives gateway events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Persistent WebSocket connection to the gateway.
    #[default]
    Ws,
    /// Events pushed to a webhook served under [`KookAccountConfig::path`].
    Http,
}

/// Configuration for a single KOOK bot account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KookAccountConfig {
    /// Bot token from the KOOK developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Event delivery protocol.
    pub protocol: Protocol,

    /// Webhook path, only used with [`Protocol::Http`].
    pub path: String,

    /// Reconnect attempts before backing off to `retry_lazy_ms`.
    pub retry_times: u32,

    /// Delay between the first `retry_times` reconnect attempts (ms).
    pub retry_interval_ms: u64,

    /// Delay between reconnect attempts once `retry_times` is exhausted (ms).
    pub retry_lazy_ms: u64,
}

impl KookAccountConfig {
    /// Webhook path with exactly one leading slash.
    pub fn webhook_path(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for KookAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KookAccountConfig")
            .field("token", &"[REDACTED]")
            .field("protocol", &self.protocol)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for KookAccountConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            protocol: Protocol::default(),
            path: "/kaiheila".into(),
            retry_times: 6,
            retry_interval_ms: 5_000,
            retry_lazy_ms: 60_000,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = KookAccountConfig::default();
        assert_eq!(cfg.protocol, Protocol::Ws);
        assert_eq!(cfg.path, "/kaiheila");
        assert_eq!(cfg.retry_times, 6);
        assert_eq!(cfg.retry_interval_ms, 5_000);
        assert_eq!(cfg.retry_lazy_ms, 60_000);
    }

    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "token": "1/ABC",
            "protocol": "http",
            "path": "kook-events"
        }"#;
        let cfg: KookAccountConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.token.expose_secret(), "1/ABC");
        assert_eq!(cfg.protocol, Protocol::Http);
        assert_eq!(cfg.webhook_path(), "/kook-events");
        // defaults for unspecified fields
        assert_eq!(cfg.retry_times, 6);
    }

    #[test]
    fn serialize_roundtrip() {
        let cfg = KookAccountConfig {
            token: Secret::new("tok".into()),
            retry_times: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: KookAccountConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.retry_times, 2);
        assert_eq!(cfg2.token.expose_secret(), "tok");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = KookAccountConfig {
            token: Secret::new("super-secret".into()),
            ..Default::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}
