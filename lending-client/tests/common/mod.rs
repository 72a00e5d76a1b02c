//! Shared fixtures for lending-client integration tests.

#![allow(dead_code)]

use lending_client::config::SessionSettings;
use lending_client::navigation::Screen;
use lending_client::screens::ScreenServices;
use lending_client::services::{
    MemoryCredentialStore, MockVerificationService, RecordingErrorReporter, RecordingNavigator,
    RecordingNotifier, SendBehavior,
};
use lending_client::session::AppContext;
use lending_client::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const PHONE_NO: &str = "99112233";
pub const EMAIL: &str = "abcdef@example.com";

/// Every collaborator of a screen, kept concrete so tests can inspect them.
pub struct Harness {
    pub service: Arc<MockVerificationService>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub errors: Arc<RecordingErrorReporter>,
    pub credentials: Arc<MemoryCredentialStore>,
}

impl Harness {
    pub fn new(behavior: SendBehavior) -> Self {
        Self::with_service(MockVerificationService::new(behavior))
    }

    pub fn with_service(service: MockVerificationService) -> Self {
        Self {
            service: Arc::new(service),
            navigator: Arc::new(RecordingNavigator::new(Screen::VerifyDevice)),
            notifier: Arc::new(RecordingNotifier::new()),
            errors: Arc::new(RecordingErrorReporter::new()),
            credentials: Arc::new(MemoryCredentialStore::new()),
        }
    }

    pub fn services(&self) -> ScreenServices {
        ScreenServices {
            verification: self.service.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
            errors: self.errors.clone(),
        }
    }

    pub fn context(&self) -> Arc<AppContext> {
        Arc::new(AppContext::new(
            self.credentials.clone(),
            self.navigator.clone(),
        ))
    }

    pub fn app_state(&self, session: &SessionSettings) -> AppState {
        AppState::new(
            session,
            self.service.clone(),
            self.navigator.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
            self.errors.clone(),
            self.credentials.clone(),
        )
    }
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}
