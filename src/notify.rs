//! Toast surface as an injected dependency — the feed state manager stays
//! unit-testable without a render layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Danger,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn success(description: &str) -> Self {
        Self {
            level: ToastLevel::Success,
            title: "Success".into(),
            description: description.into(),
        }
    }

    pub fn danger(description: &str) -> Self {
        Self {
            level: ToastLevel::Danger,
            title: "Error".into(),
            description: description.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Default sink: structured log events, echoed to stderr by the CLI.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => {
                tracing::info!(title = %toast.title, "{}", toast.description);
            }
            ToastLevel::Danger => {
                tracing::warn!(title = %toast.title, "{}", toast.description);
            }
        }
        eprintln!("[{}] {}: {}", toast.level.as_str(), toast.title, toast.description);
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every toast for assertions.
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        pub toasts: Arc<Mutex<Vec<Toast>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn descriptions(&self) -> Vec<String> {
            self.toasts
                .lock()
                .unwrap()
                .iter()
                .map(|t| t.description.clone())
                .collect()
        }

        pub fn levels(&self) -> Vec<ToastLevel> {
            self.toasts.lock().unwrap().iter().map(|t| t.level).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.toasts.lock().unwrap().push(toast);
        }
    }
}
