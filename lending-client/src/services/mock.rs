use super::{ErrorReporter, NoticeKind, Notifier, VerificationService};
use crate::models::{AuthSession, AuthTokens, UserProfile, VerificationRequest};
use crate::navigation::{NavParams, Navigator, RouteSource, Screen};
use crate::utils::lock;
use async_trait::async_trait;
use client_core::ClientError;
use secrecy::Secret;
use std::sync::Mutex;
use std::time::Duration;

/// How the mock backend answers a send-code call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendBehavior {
    Sent,
    Declined,
    Fail(u16),
}

/// In-process stand-in for the verification backend.
pub struct MockVerificationService {
    behavior: SendBehavior,
    delay: Duration,
    accepted_code: String,
    pub phone_calls: Mutex<Vec<String>>,
    pub email_calls: Mutex<Vec<(String, String)>>,
    pub verify_calls: Mutex<Vec<String>>,
}

impl MockVerificationService {
    pub fn new(behavior: SendBehavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            accepted_code: "123456".to_string(),
            phone_calls: Mutex::new(Vec::new()),
            email_calls: Mutex::new(Vec::new()),
            verify_calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call suspends for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_accepted_code(mut self, code: &str) -> Self {
        self.accepted_code = code.to_string();
        self
    }

    pub fn phone_calls(&self) -> Vec<String> {
        lock(&self.phone_calls).clone()
    }

    pub fn email_calls(&self) -> Vec<(String, String)> {
        lock(&self.email_calls).clone()
    }

    pub fn verify_calls(&self) -> Vec<String> {
        lock(&self.verify_calls).clone()
    }

    async fn answer(&self) -> Result<bool, ClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.behavior {
            SendBehavior::Sent => Ok(true),
            SendBehavior::Declined => Ok(false),
            SendBehavior::Fail(status) => Err(ClientError::Service {
                status,
                message: "mock backend failure".to_string(),
            }),
        }
    }
}

#[async_trait]
impl VerificationService for MockVerificationService {
    async fn send_phone_code(&self, phone_no: &str) -> Result<bool, ClientError> {
        lock(&self.phone_calls).push(phone_no.to_string());
        self.answer().await
    }

    async fn send_email_code(&self, email: &str, phone_no: &str) -> Result<bool, ClientError> {
        lock(&self.email_calls).push((email.to_string(), phone_no.to_string()));
        self.answer().await
    }

    async fn verify_code(
        &self,
        request: &VerificationRequest,
        code: &str,
    ) -> Result<Option<AuthSession>, ClientError> {
        lock(&self.verify_calls).push(code.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let SendBehavior::Fail(status) = self.behavior {
            return Err(ClientError::Service {
                status,
                message: "mock backend failure".to_string(),
            });
        }
        if code != self.accepted_code {
            return Ok(None);
        }

        Ok(Some(AuthSession {
            tokens: AuthTokens {
                access_token: Secret::new("mock-access-token".to_string()),
                refresh_token: Secret::new("mock-refresh-token".to_string()),
            },
            user: UserProfile {
                user_id: "mock-user".to_string(),
                phone_no: request.phone_no.clone(),
                email: request.email.clone(),
                first_name: None,
                last_name: None,
            },
        }))
    }
}

/// Navigator that records every transition and tracks the current route.
pub struct RecordingNavigator {
    current: Mutex<String>,
    pub history: Mutex<Vec<(Screen, NavParams, bool)>>,
}

impl RecordingNavigator {
    pub fn new(initial: Screen) -> Self {
        Self::at_path(initial.path())
    }

    pub fn at_path(path: &str) -> Self {
        Self {
            current: Mutex::new(path.to_string()),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn set_current(&self, path: &str) {
        *lock(&self.current) = path.to_string();
    }

    pub fn history(&self) -> Vec<(Screen, NavParams, bool)> {
        lock(&self.history).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: Screen, params: NavParams, reset_stack: bool) {
        *lock(&self.current) = screen.path().to_string();
        lock(&self.history).push((screen, params, reset_stack));
    }
}

impl RouteSource for RecordingNavigator {
    fn current_path(&self) -> String {
        lock(&self.current).clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(String, String, NoticeKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(String, String, NoticeKind)> {
        lock(&self.notices).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, kind: NoticeKind) {
        lock(&self.notices).push((title.to_string(), message.to_string(), kind));
    }
}

#[derive(Default)]
pub struct RecordingErrorReporter {
    pub reports: Mutex<Vec<(String, String)>>,
}

impl RecordingErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(context, rendered error)` pairs in report order.
    pub fn reports(&self) -> Vec<(String, String)> {
        lock(&self.reports).clone()
    }
}

impl ErrorReporter for RecordingErrorReporter {
    fn report(&self, error: &ClientError, context: &str) {
        lock(&self.reports).push((context.to_string(), error.to_string()));
    }
}
