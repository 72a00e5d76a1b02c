pub mod config;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod session;
pub mod shell;
pub mod utils;
pub mod wizard;

use config::SessionSettings;
use navigation::{Navigator, RouteSource};
use screens::ScreenServices;
use services::{CredentialStore, ErrorReporter, Notifier, VerificationService};
use session::{AppContext, InactivityConfig, InactivityMonitor, SessionExpiryHandler};
use std::sync::Arc;

/// Application wiring: the shared session context, the collaborators
/// handed to every screen, and the idle monitor guarding the session.
pub struct AppState {
    pub context: Arc<AppContext>,
    pub services: ScreenServices,
    pub monitor: InactivityMonitor,
}

impl AppState {
    pub fn new(
        session: &SessionSettings,
        verification: Arc<dyn VerificationService>,
        navigator: Arc<dyn Navigator>,
        routes: Arc<dyn RouteSource>,
        notifier: Arc<dyn Notifier>,
        errors: Arc<dyn ErrorReporter>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let context = Arc::new(AppContext::new(credentials, navigator.clone()));

        let expiry = SessionExpiryHandler::new(routes, notifier.clone(), context.clone());
        let monitor = InactivityMonitor::new(InactivityConfig::from(session), Arc::new(expiry));

        Self {
            context,
            services: ScreenServices {
                verification,
                navigator,
                notifier,
                errors,
            },
            monitor,
        }
    }
}
