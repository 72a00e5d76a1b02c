//! Collaborators the screens talk to: the backend, the notice surface,
//! the error reporter and the credential store.

pub mod auth_client;
mod credentials;
mod error_reporter;
mod mock;
mod notifier;

pub use auth_client::AuthClient;
pub use credentials::{CredentialStore, MemoryCredentialStore, StoredCredentials};
pub use error_reporter::{ErrorReporter, TracingErrorReporter};
pub use mock::{
    MockVerificationService, RecordingErrorReporter, RecordingNavigator, RecordingNotifier,
    SendBehavior,
};
pub use notifier::{NoticeKind, Notifier};

use crate::models::{AuthSession, VerificationRequest};
use async_trait::async_trait;
use client_core::ClientError;

/// One-time code delivery and verification, as exposed by the backend.
///
/// The send operations resolve to `false` when the backend declined to
/// dispatch a code; that is not an error.
#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn send_phone_code(&self, phone_no: &str) -> Result<bool, ClientError>;

    async fn send_email_code(&self, email: &str, phone_no: &str) -> Result<bool, ClientError>;

    /// `Ok(None)` means the code was rejected.
    async fn verify_code(
        &self,
        request: &VerificationRequest,
        code: &str,
    ) -> Result<Option<AuthSession>, ClientError>;
}
