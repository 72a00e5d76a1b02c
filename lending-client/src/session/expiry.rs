use super::{InactivityHandler, LogoutHandler};
use crate::navigation::{is_exempt_route, RouteSource};
use crate::services::{NoticeKind, Notifier};
use async_trait::async_trait;
use std::sync::Arc;

pub const SESSION_EXPIRED_TITLE: &str = "Session expired";
pub const SESSION_EXPIRED_MESSAGE: &str =
    "You have been signed out after a period of inactivity. Please sign in again.";

/// Forces a logout when the idle timer fires, unless the user is already
/// on an authentication or onboarding screen.
pub struct SessionExpiryHandler {
    routes: Arc<dyn RouteSource>,
    notifier: Arc<dyn Notifier>,
    session: Arc<dyn LogoutHandler>,
}

impl SessionExpiryHandler {
    pub fn new(
        routes: Arc<dyn RouteSource>,
        notifier: Arc<dyn Notifier>,
        session: Arc<dyn LogoutHandler>,
    ) -> Self {
        Self {
            routes,
            notifier,
            session,
        }
    }
}

#[async_trait]
impl InactivityHandler for SessionExpiryHandler {
    async fn on_inactive(&self) {
        let path = self.routes.current_path();
        if is_exempt_route(&path) {
            tracing::debug!(path = %path, "Idle on exempt route, session kept");
            return;
        }

        tracing::info!(path = %path, "Session expired after inactivity");
        self.notifier
            .notify(SESSION_EXPIRED_TITLE, SESSION_EXPIRED_MESSAGE, NoticeKind::Info);
        self.session.logout().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Screen, EXEMPT_ROUTES};
    use crate::services::{RecordingNavigator, RecordingNotifier};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLogout {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LogoutHandler for CountingLogout {
        async fn logout(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handler_at(
        path: &str,
    ) -> (SessionExpiryHandler, Arc<RecordingNotifier>, Arc<CountingLogout>) {
        let routes = Arc::new(RecordingNavigator::at_path(path));
        let notifier = Arc::new(RecordingNotifier::new());
        let logout = Arc::new(CountingLogout::default());
        let handler = SessionExpiryHandler::new(routes, notifier.clone(), logout.clone());
        (handler, notifier, logout)
    }

    #[tokio::test]
    async fn exempt_routes_keep_the_session() {
        for path in EXEMPT_ROUTES {
            let (handler, notifier, logout) = handler_at(path);
            handler.on_inactive().await;

            assert!(notifier.notices().is_empty(), "toast shown on {path}");
            assert_eq!(logout.calls.load(Ordering::SeqCst), 0, "logout on {path}");
        }
    }

    #[tokio::test]
    async fn other_routes_toast_once_and_logout_once() {
        for path in [
            Screen::Home.path(),
            Screen::Loans.path(),
            Screen::Settings.path(),
            "/login/help",
            "/unknown",
        ] {
            let (handler, notifier, logout) = handler_at(path);
            handler.on_inactive().await;

            let notices = notifier.notices();
            assert_eq!(notices.len(), 1, "toast count on {path}");
            assert_eq!(notices[0].0, SESSION_EXPIRED_TITLE);
            assert_eq!(notices[0].2, NoticeKind::Info);
            assert_eq!(logout.calls.load(Ordering::SeqCst), 1, "logout count on {path}");
        }
    }
}
