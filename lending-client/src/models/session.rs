use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub phone_no: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.phone_no.clone(),
        }
    }
}

/// Tokens issued by the backend. Never logged; `Debug` is redacted.
#[derive(Debug, Deserialize)]
pub struct AuthTokens {
    pub access_token: Secret<String>,
    pub refresh_token: Secret<String>,
}

/// Result of a successful sign-in or device verification.
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub tokens: AuthTokens,
    pub user: UserProfile,
}

/// Snapshot of the signed-in user held by the app context.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub profile: UserProfile,
    pub signed_in_at: DateTime<Utc>,
}
