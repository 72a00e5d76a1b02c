use crate::navigation::NavParams;
use client_core::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PARAM_MODE: &str = "mode";
pub const PARAM_PHONE_NO: &str = "phoneNo";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_REMEMBER_DEVICE: &str = "isRememberDevice";

/// Medium a one-time code is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Phone,
    Email,
}

impl Channel {
    /// Value of the `mode` navigation parameter on the code-entry screen.
    pub fn mode(&self) -> &'static str {
        match self {
            Channel::Phone => "verifyPhone",
            Channel::Email => "verifyEmail",
        }
    }

    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "verifyPhone" => Some(Channel::Phone),
            "verifyEmail" => Some(Channel::Email),
            _ => None,
        }
    }

    /// Channel code understood by the backend.
    pub fn api_code(&self) -> &'static str {
        match self {
            Channel::Phone => "sms",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Phone => f.write_str("phone"),
            Channel::Email => f.write_str("email"),
        }
    }
}

/// Parameters of one verification attempt, handed from the channel
/// selector to the code-entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub channel: Channel,
    pub phone_no: String,
    pub email: Option<String>,
    pub remember_device: bool,
}

impl VerificationRequest {
    pub fn phone(phone_no: &str, remember_device: bool) -> Self {
        Self {
            channel: Channel::Phone,
            phone_no: phone_no.to_string(),
            email: None,
            remember_device,
        }
    }

    pub fn email(email: &str, phone_no: &str, remember_device: bool) -> Self {
        Self {
            channel: Channel::Email,
            phone_no: phone_no.to_string(),
            email: Some(email.to_string()),
            remember_device,
        }
    }

    /// Address the code is sent to.
    pub fn target(&self) -> &str {
        match self.channel {
            Channel::Phone => &self.phone_no,
            Channel::Email => self.email.as_deref().unwrap_or(&self.phone_no),
        }
    }

    pub fn to_params(&self) -> NavParams {
        let mut params = NavParams::new();
        params.insert(PARAM_PHONE_NO, self.phone_no.as_str());
        params.insert(PARAM_MODE, self.channel.mode());
        params.insert_bool(PARAM_REMEMBER_DEVICE, self.remember_device);
        if self.channel == Channel::Email {
            if let Some(email) = &self.email {
                params.insert(PARAM_EMAIL, email.as_str());
            }
        }
        params
    }

    pub fn from_params(params: &NavParams) -> Result<Self, ClientError> {
        let mode = params.get(PARAM_MODE).ok_or_else(|| {
            ClientError::BadRequest(anyhow::anyhow!("Missing '{}' parameter", PARAM_MODE))
        })?;
        let channel = Channel::from_mode(mode).ok_or_else(|| {
            ClientError::BadRequest(anyhow::anyhow!("Unknown verification mode: {}", mode))
        })?;
        let phone_no = params
            .get(PARAM_PHONE_NO)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ClientError::BadRequest(anyhow::anyhow!("Missing '{}' parameter", PARAM_PHONE_NO))
            })?
            .to_string();
        let remember_device = params.get_bool(PARAM_REMEMBER_DEVICE)?;

        let email = match channel {
            Channel::Phone => None,
            Channel::Email => Some(
                params
                    .get(PARAM_EMAIL)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| {
                        ClientError::BadRequest(anyhow::anyhow!(
                            "Missing '{}' parameter for email verification",
                            PARAM_EMAIL
                        ))
                    })?
                    .to_string(),
            ),
        };

        Ok(Self {
            channel,
            phone_no,
            email,
            remember_device,
        })
    }
}
