//! Verification channel selector shown when signing in from a new device.

use super::{dispatch_code, ScreenServices, SubmitOutcome};
use crate::models::verification::{PARAM_EMAIL, PARAM_PHONE_NO};
use crate::models::{Channel, VerificationRequest};
use crate::navigation::{NavParams, Screen};
use crate::utils::{mask_email, ScreenScope, SubmitGuard};
use client_core::ClientError;
use std::sync::atomic::{AtomicBool, Ordering};
use validator::{Validate, ValidationError};

/// Label attached to errors reported from this screen.
pub const CONTEXT: &str = "VerifyDeviceScreen";

#[derive(Debug, Validate)]
struct ContactForm {
    #[validate(custom(function = "validate_phone_no"))]
    phone_no: String,
    #[validate(email(message = "Invalid email format"))]
    email: Option<String>,
}

/// Digits only, optional leading `+`, 8 to 15 digits.
pub fn validate_phone_no(phone_no: &str) -> Result<(), ValidationError> {
    let digits = phone_no.strip_prefix('+').unwrap_or(phone_no);
    let valid = (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone_no"))
    }
}

pub struct VerifyDeviceScreen {
    phone_no: String,
    email: Option<String>,
    remember_device: AtomicBool,
    services: ScreenServices,
    guard: SubmitGuard,
    scope: ScreenScope,
}

impl VerifyDeviceScreen {
    pub fn new(phone_no: &str, email: Option<&str>, services: ScreenServices) -> Self {
        Self {
            phone_no: phone_no.to_string(),
            email: email.filter(|e| !e.is_empty()).map(str::to_string),
            remember_device: AtomicBool::new(false),
            services,
            guard: SubmitGuard::new(),
            scope: ScreenScope::new(),
        }
    }

    /// Build from the parameters the sign-in screen navigated with.
    pub fn from_params(params: &NavParams, services: ScreenServices) -> Result<Self, ClientError> {
        let phone_no = params.get(PARAM_PHONE_NO).ok_or_else(|| {
            ClientError::BadRequest(anyhow::anyhow!("Missing '{}' parameter", PARAM_PHONE_NO))
        })?;
        Ok(Self::new(phone_no, params.get(PARAM_EMAIL), services))
    }

    /// Email is only offered when an address is on file.
    pub fn available_channels(&self) -> Vec<Channel> {
        let mut channels = vec![Channel::Phone];
        if self.email.is_some() {
            channels.push(Channel::Email);
        }
        channels
    }

    pub fn phone_no(&self) -> &str {
        &self.phone_no
    }

    pub fn masked_email(&self) -> Option<String> {
        self.email.as_deref().map(mask_email)
    }

    pub fn remember_device(&self) -> bool {
        self.remember_device.load(Ordering::Relaxed)
    }

    pub fn set_remember_device(&self, remember: bool) {
        self.remember_device.store(remember, Ordering::Relaxed);
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_in_flight()
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    fn request_for(&self, channel: Channel) -> Option<VerificationRequest> {
        let remember = self.remember_device();
        match channel {
            Channel::Phone => Some(VerificationRequest::phone(&self.phone_no, remember)),
            Channel::Email => self
                .email
                .as_deref()
                .map(|email| VerificationRequest::email(email, &self.phone_no, remember)),
        }
    }

    /// Request a code through `channel` and open the code-entry screen if
    /// one was dispatched.
    #[tracing::instrument(skip(self), fields(remember_device = self.remember_device()))]
    pub async fn submit(&self, channel: Channel) -> SubmitOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            tracing::debug!("Submission already in flight, ignoring");
            return SubmitOutcome::Busy;
        };

        let Some(request) = self.request_for(channel) else {
            tracing::warn!("Email channel selected without an address on file");
            return SubmitOutcome::ChannelUnavailable;
        };

        let form = ContactForm {
            phone_no: request.phone_no.clone(),
            email: request.email.clone(),
        };
        if let Err(errors) = form.validate() {
            return SubmitOutcome::Invalid(errors);
        }

        let token = self.scope.token();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("Screen unmounted while sending code");
                return SubmitOutcome::Discarded;
            }
            result = dispatch_code(self.services.verification.as_ref(), &request) => result,
        };

        if !self.scope.is_mounted() {
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(true) => {
                tracing::info!("Verification code sent");
                self.services
                    .navigator
                    .navigate(Screen::VerifyOtp, request.to_params(), false);
                SubmitOutcome::Navigated
            }
            Ok(false) => {
                tracing::info!("Backend declined to send a verification code");
                SubmitOutcome::Stayed
            }
            Err(e) => {
                self.services.errors.report(&e, CONTEXT);
                SubmitOutcome::Failed
            }
        }
    }
}
