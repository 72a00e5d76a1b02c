//! Code-entry screen reached after a verification code was dispatched.

use super::{dispatch_code, ScreenServices, SubmitOutcome};
use crate::models::{Channel, VerificationRequest};
use crate::navigation::{NavParams, Screen};
use crate::services::NoticeKind;
use crate::session::AppContext;
use crate::utils::{lock, mask_email, ScreenScope, SubmitGuard};
use client_core::ClientError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use validator::{Validate, ValidationError};

pub const CONTEXT: &str = "VerifyOtpScreen";

pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Validate)]
struct CodeForm {
    #[validate(custom(function = "validate_code"))]
    code: String,
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("code"))
    }
}

#[derive(Debug)]
pub enum ResendOutcome {
    Sent,
    Declined,
    CoolingDown { remaining: Duration },
    Busy,
    Failed,
    Discarded,
}

pub struct VerifyOtpScreen {
    request: VerificationRequest,
    services: ScreenServices,
    context: Arc<AppContext>,
    resend_cooldown: Duration,
    last_sent: Mutex<Instant>,
    submit_guard: SubmitGuard,
    resend_guard: SubmitGuard,
    scope: ScreenScope,
}

impl VerifyOtpScreen {
    /// Decode the verification request from the navigation parameters.
    ///
    /// The previous screen just sent a code, so the resend cooldown starts now.
    pub fn from_params(
        params: &NavParams,
        services: ScreenServices,
        context: Arc<AppContext>,
        resend_cooldown: Duration,
    ) -> Result<Self, ClientError> {
        let request = VerificationRequest::from_params(params)?;

        Ok(Self {
            request,
            services,
            context,
            resend_cooldown,
            last_sent: Mutex::new(Instant::now()),
            submit_guard: SubmitGuard::new(),
            resend_guard: SubmitGuard::new(),
            scope: ScreenScope::new(),
        })
    }

    pub fn request(&self) -> &VerificationRequest {
        &self.request
    }

    /// Where the code went, as shown to the user.
    pub fn masked_target(&self) -> String {
        match self.request.channel {
            Channel::Email => mask_email(self.request.target()),
            Channel::Phone => self.request.phone_no.clone(),
        }
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    fn last_sent(&self) -> Instant {
        *lock(&self.last_sent)
    }

    /// Time left before another code may be requested.
    pub fn resend_remaining(&self) -> Duration {
        self.resend_cooldown
            .saturating_sub(self.last_sent().elapsed())
    }

    #[tracing::instrument(skip(self, code), fields(channel = %self.request.channel))]
    pub async fn submit_code(&self, code: &str) -> SubmitOutcome {
        let Some(_permit) = self.submit_guard.try_acquire() else {
            return SubmitOutcome::Busy;
        };

        let form = CodeForm {
            code: code.trim().to_string(),
        };
        if let Err(errors) = form.validate() {
            return SubmitOutcome::Invalid(errors);
        }

        let token = self.scope.token();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return SubmitOutcome::Discarded,
            result = self.services.verification.verify_code(&self.request, &form.code) => result,
        };

        if !self.scope.is_mounted() {
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(Some(session)) => {
                if let Err(e) = self.context.login(session).await {
                    self.services.errors.report(&e, CONTEXT);
                    return SubmitOutcome::Failed;
                }
                tracing::info!(remember_device = self.request.remember_device, "Device verified");
                self.services
                    .navigator
                    .navigate(Screen::Home, NavParams::new(), true);
                SubmitOutcome::Navigated
            }
            Ok(None) => {
                self.services.notifier.notify(
                    "Invalid code",
                    "The code you entered is incorrect or has expired.",
                    NoticeKind::Error,
                );
                SubmitOutcome::Stayed
            }
            Err(e) => {
                self.services.errors.report(&e, CONTEXT);
                SubmitOutcome::Failed
            }
        }
    }

    #[tracing::instrument(skip(self), fields(channel = %self.request.channel))]
    pub async fn resend(&self) -> ResendOutcome {
        let Some(_permit) = self.resend_guard.try_acquire() else {
            return ResendOutcome::Busy;
        };

        let remaining = self.resend_remaining();
        if !remaining.is_zero() {
            return ResendOutcome::CoolingDown { remaining };
        }

        let token = self.scope.token();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return ResendOutcome::Discarded,
            result = dispatch_code(self.services.verification.as_ref(), &self.request) => result,
        };

        if !self.scope.is_mounted() {
            return ResendOutcome::Discarded;
        }

        match result {
            Ok(true) => {
                *lock(&self.last_sent) = Instant::now();
                self.services.notifier.notify(
                    "Code sent",
                    &format!("A new code was sent to {}.", self.masked_target()),
                    NoticeKind::Success,
                );
                ResendOutcome::Sent
            }
            Ok(false) => ResendOutcome::Declined,
            Err(e) => {
                self.services.errors.report(&e, CONTEXT);
                ResendOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_must_be_six_digits() {
        assert!(validate_code("123456").is_ok());
        assert!(validate_code("12345").is_err());
        assert!(validate_code("1234567").is_err());
        assert!(validate_code("12a456").is_err());
    }
}
