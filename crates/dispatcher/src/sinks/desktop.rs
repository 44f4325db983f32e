//! DesktopSink - desktop toast delivery

use std::sync::Arc;

use tracing::{debug, instrument};

use contracts::{Message, Notifier, SendError};

/// Desktop notification binding.
///
/// Blocking; the sink calls it from the blocking thread pool.
pub trait DesktopBackend: Send + Sync {
    /// Show one notification
    fn notify(&self, summary: &str, body: &str, persistent: bool) -> Result<(), SendError>;
}

/// Desktop backend using notify-rust
#[derive(Debug, Clone)]
pub struct NotifyRustBackend {
    app_name: String,
}

impl NotifyRustBackend {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl DesktopBackend for NotifyRustBackend {
    fn notify(&self, summary: &str, body: &str, persistent: bool) -> Result<(), SendError> {
        use notify_rust::{Notification, Timeout};

        let mut notification = Notification::new();
        notification.appname(&self.app_name).summary(summary).body(body);
        if persistent {
            notification.timeout(Timeout::Never);
        }

        notification
            .show()
            .map(|_| ())
            .map_err(|e| SendError::desktop_unavailable(e.to_string()))
    }
}

/// Sink that shows a desktop notification
#[derive(Clone)]
pub struct DesktopSink {
    name: String,
    summary: String,
    persistent: bool,
    backend: Arc<dyn DesktopBackend>,
}

impl DesktopSink {
    pub fn new(
        name: impl Into<String>,
        summary: impl Into<String>,
        persistent: bool,
        backend: Arc<dyn DesktopBackend>,
    ) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            persistent,
            backend,
        }
    }
}

impl std::fmt::Debug for DesktopSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopSink")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("persistent", &self.persistent)
            .finish_non_exhaustive()
    }
}

impl Notifier for DesktopSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "desktop_sink_send",
        skip(self, message),
        fields(sink = %self.name, persistent = self.persistent)
    )]
    async fn send(&self, message: &Message) -> Result<(), SendError> {
        let backend = Arc::clone(&self.backend);
        let summary = self.summary.clone();
        let body = message.clone();
        let persistent = self.persistent;

        tokio::task::spawn_blocking(move || backend.notify(&summary, &body, persistent))
            .await
            .map_err(|e| {
                SendError::desktop_unavailable(format!("notification task failed: {e}"))
            })??;

        debug!(sink = %self.name, "Shown");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records notifications instead of showing them
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub(crate) shown: Mutex<Vec<(String, String, bool)>>,
        pub(crate) fail: bool,
    }

    impl DesktopBackend for RecordingBackend {
        fn notify(&self, summary: &str, body: &str, persistent: bool) -> Result<(), SendError> {
            if self.fail {
                return Err(SendError::desktop_unavailable("no notification daemon"));
            }
            self.shown
                .lock()
                .unwrap()
                .push((summary.to_string(), body.to_string(), persistent));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_desktop_sink_forwards_to_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let sink = DesktopSink::new("desk", "Build", true, backend.clone());

        assert!(sink.send(&Message::from("finished")).await.is_ok());

        let shown = backend.shown.lock().unwrap();
        assert_eq!(
            shown.as_slice(),
            &[("Build".to_string(), "finished".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_desktop_failure_is_reported() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });
        let sink = DesktopSink::new("desk", "Build", false, backend);

        let result = sink.send(&Message::from("finished")).await;
        assert!(matches!(result, Err(SendError::DesktopUnavailable { .. })));
    }

    #[test]
    fn test_desktop_sink_name() {
        let backend = Arc::new(RecordingBackend::default());
        let sink = DesktopSink::new("my_desktop", "s", false, backend);
        assert_eq!(sink.name(), "my_desktop");
    }
}
