use async_trait::async_trait;

use crate::session::Session;

/// Sink for normalized sessions. The host framework provides the concrete
/// implementation.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Hand a fully built session to the host.
    async fn emit(&self, session: Session);
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        std::sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Session>>,
    }

    #[async_trait]
    impl SessionSink for Recorder {
        async fn emit(&self, session: Session) {
            self.seen.lock().unwrap().push(session);
        }
    }

    #[tokio::test]
    async fn sink_is_object_safe() {
        let recorder = Arc::new(Recorder::default());
        let sink: Arc<dyn SessionSink> = recorder.clone();
        sink.emit(Session::default()).await;
        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }
}
