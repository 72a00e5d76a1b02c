use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => f.write_str("success"),
            NoticeKind::Error => f.write_str("error"),
            NoticeKind::Info => f.write_str("info"),
        }
    }
}

/// Transient user-visible message (toast). Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, kind: NoticeKind);
}
