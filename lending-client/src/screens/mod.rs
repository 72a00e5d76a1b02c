//! Screen controllers: the logic behind a screen, minus rendering.

pub mod profile;
pub mod verify_device;
pub mod verify_otp;

pub use profile::{ProfileForm, ProfileStep};
pub use verify_device::VerifyDeviceScreen;
pub use verify_otp::{ResendOutcome, VerifyOtpScreen};

use crate::models::{Channel, VerificationRequest};
use crate::navigation::Navigator;
use crate::services::{ErrorReporter, Notifier, VerificationService};
use client_core::ClientError;
use std::sync::Arc;
use validator::ValidationErrors;

/// Collaborators every screen controller is built with.
#[derive(Clone)]
pub struct ScreenServices {
    pub verification: Arc<dyn VerificationService>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub errors: Arc<dyn ErrorReporter>,
}

/// What a guarded submission ended in.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The follow-up screen was opened.
    Navigated,
    /// The backend declined; the screen stays as it is.
    Stayed,
    /// Another submission was still in flight; nothing was sent.
    Busy,
    /// The requested channel has no address on file.
    ChannelUnavailable,
    /// Input failed validation before any network call.
    Invalid(ValidationErrors),
    /// The call failed and was handed to the error reporter.
    Failed,
    /// The screen was unmounted before the result arrived.
    Discarded,
}

impl SubmitOutcome {
    pub fn navigated(&self) -> bool {
        matches!(self, SubmitOutcome::Navigated)
    }
}

/// Ask the backend to deliver a code through the request's channel.
pub async fn dispatch_code(
    service: &dyn VerificationService,
    request: &VerificationRequest,
) -> Result<bool, ClientError> {
    match (request.channel, request.email.as_deref()) {
        (Channel::Email, Some(email)) => service.send_email_code(email, &request.phone_no).await,
        (Channel::Email, None) => Err(ClientError::BadRequest(anyhow::anyhow!(
            "Email channel requested without an email address"
        ))),
        (Channel::Phone, _) => service.send_phone_code(&request.phone_no).await,
    }
}
