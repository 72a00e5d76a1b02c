//! HTTP client for the backend's one-time code endpoints.

use super::VerificationService;
use crate::config::BackendSettings;
use crate::models::{AuthSession, Channel, VerificationRequest};
use async_trait::async_trait;
use client_core::ClientError;
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const API_KEY_HEADER: &str = "x-api-key";

const SEND_CODE_PATH: &str = "/auth/otp/send";
const VERIFY_CODE_PATH: &str = "/auth/otp/verify";
const VERIFY_DEVICE_PURPOSE: &str = "verify_device";

#[derive(Debug, Serialize)]
struct SendCodeRequest<'a> {
    channel: &'a str,
    destination: &'a str,
    phone_no: &'a str,
    purpose: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendCodeResponse {
    #[serde(default)]
    sent: bool,
}

#[derive(Debug, Serialize)]
struct VerifyCodeRequest<'a> {
    channel: &'a str,
    destination: &'a str,
    phone_no: &'a str,
    code: &'a str,
    remember_device: bool,
}

pub struct AuthClient {
    client: Client,
    settings: BackendSettings,
}

impl AuthClient {
    pub fn new(settings: BackendSettings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        tracing::info!(url = %settings.url, "Backend client configured");

        Ok(Self { client, settings })
    }

    /// POST a JSON body, tagging the call with a fresh request id.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ClientError> {
        let url = format!("{}{}", self.settings.url.trim_end_matches('/'), path);
        let request_id = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .header(API_KEY_HEADER, self.settings.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, request_id = %request_id, error = %e, "Failed to send POST request");
                ClientError::Network(e)
            })?;

        tracing::debug!(
            url = %url,
            request_id = %request_id,
            status = %response.status(),
            "Backend responded"
        );

        Ok(response)
    }

    async fn send_code(&self, channel: Channel, destination: &str, phone_no: &str) -> Result<bool, ClientError> {
        let response = self
            .post(
                SEND_CODE_PATH,
                &SendCodeRequest {
                    channel: channel.api_code(),
                    destination,
                    phone_no,
                    purpose: VERIFY_DEVICE_PURPOSE,
                },
            )
            .await?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: SendCodeResponse = response.json().await?;
        tracing::info!(channel = %channel, sent = body.sent, "Verification code requested");
        Ok(body.sent)
    }
}

async fn service_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    ClientError::Service { status, message }
}

#[async_trait]
impl VerificationService for AuthClient {
    #[instrument(skip(self, phone_no))]
    async fn send_phone_code(&self, phone_no: &str) -> Result<bool, ClientError> {
        self.send_code(Channel::Phone, phone_no, phone_no).await
    }

    #[instrument(skip(self, email, phone_no))]
    async fn send_email_code(&self, email: &str, phone_no: &str) -> Result<bool, ClientError> {
        self.send_code(Channel::Email, email, phone_no).await
    }

    #[instrument(skip(self, request, code), fields(channel = %request.channel))]
    async fn verify_code(
        &self,
        request: &VerificationRequest,
        code: &str,
    ) -> Result<Option<AuthSession>, ClientError> {
        let response = self
            .post(
                VERIFY_CODE_PATH,
                &VerifyCodeRequest {
                    channel: request.channel.api_code(),
                    destination: request.target(),
                    phone_no: &request.phone_no,
                    code,
                    remember_device: request.remember_device,
                },
            )
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<AuthSession>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::info!("Verification code rejected");
                Ok(None)
            }
            _ => Err(service_error(response).await),
        }
    }
}
