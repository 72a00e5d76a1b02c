use super::LogoutHandler;
use crate::models::{AuthSession, SessionStatus, SignedInUser, UserProfile};
use crate::navigation::{NavParams, Navigator, Screen};
use crate::services::{CredentialStore, StoredCredentials};
use async_trait::async_trait;
use chrono::Utc;
use client_core::ClientError;
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

struct ContextState {
    status: SessionStatus,
    user: Option<SignedInUser>,
    access_token: Option<Secret<String>>,
}

/// Application-wide session state, shared by handle with every screen.
///
/// Only `login`, `logout` and `update_profile` mutate it.
pub struct AppContext {
    state: RwLock<ContextState>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AppContext {
    pub fn new(credentials: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: RwLock::new(ContextState {
                status: SessionStatus::Active,
                user: None,
                access_token: None,
            }),
            credentials,
            navigator,
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn is_authenticated(&self) -> bool {
        let state = self.state.read().await;
        state.status == SessionStatus::Active && state.user.is_some()
    }

    pub async fn user(&self) -> Option<SignedInUser> {
        self.state.read().await.user.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .access_token
            .as_ref()
            .map(|token| token.expose_secret().clone())
    }

    /// Persist the issued credentials and mark the session active.
    #[tracing::instrument(skip(self, session), fields(user_id = %session.user.user_id))]
    pub async fn login(&self, session: AuthSession) -> Result<(), ClientError> {
        let AuthSession { tokens, user } = session;
        let access_token = tokens.access_token.expose_secret().clone();

        self.credentials
            .save(StoredCredentials {
                user_id: user.user_id.clone(),
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            })
            .await?;

        let mut state = self.state.write().await;
        state.status = SessionStatus::Active;
        state.access_token = Some(Secret::new(access_token));
        state.user = Some(SignedInUser {
            profile: user,
            signed_in_at: Utc::now(),
        });

        tracing::info!("User signed in");
        Ok(())
    }

    /// Expire the session, drop persisted credentials and return to the
    /// sign-in screen with a fresh navigation stack.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            state.status = SessionStatus::Expired;
            state.user = None;
            state.access_token = None;
        }

        if let Err(e) = self.credentials.clear().await {
            tracing::warn!(error = %e, "Failed to clear stored credentials during logout");
        }

        self.navigator.navigate(Screen::Login, NavParams::new(), true);
        tracing::info!("User signed out");
    }

    pub async fn update_profile<F>(&self, update: F) -> Result<UserProfile, ClientError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut state = self.state.write().await;
        let user = state.user.as_mut().ok_or_else(|| {
            ClientError::Unauthorized(anyhow::anyhow!("No signed-in user to update"))
        })?;

        update(&mut user.profile);
        tracing::debug!(user_id = %user.profile.user_id, "Profile updated");
        Ok(user.profile.clone())
    }
}

#[async_trait]
impl LogoutHandler for AppContext {
    async fn logout(&self) {
        AppContext::logout(self).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthTokens;
    use crate::services::{MemoryCredentialStore, RecordingNavigator};

    fn session() -> AuthSession {
        AuthSession {
            tokens: AuthTokens {
                access_token: Secret::new("access".to_string()),
                refresh_token: Secret::new("refresh".to_string()),
            },
            user: UserProfile {
                user_id: "user-7".to_string(),
                phone_no: "99112233".to_string(),
                email: None,
                first_name: Some("Bold".to_string()),
                last_name: None,
            },
        }
    }

    fn context() -> (AppContext, Arc<MemoryCredentialStore>, Arc<RecordingNavigator>) {
        let store = Arc::new(MemoryCredentialStore::new());
        let navigator = Arc::new(RecordingNavigator::new(Screen::Home));
        let context = AppContext::new(store.clone(), navigator.clone());
        (context, store, navigator)
    }

    #[tokio::test]
    async fn starts_active_without_user() {
        let (context, _, _) = context();
        assert_eq!(context.status().await, SessionStatus::Active);
        assert!(!context.is_authenticated().await);
        assert!(context.access_token().await.is_none());
    }

    #[tokio::test]
    async fn login_persists_credentials() {
        let (context, store, _) = context();
        context.login(session()).await.unwrap();

        assert!(context.is_authenticated().await);
        assert_eq!(context.access_token().await.as_deref(), Some("access"));
        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.user_id, "user-7");
    }

    #[tokio::test]
    async fn logout_expires_clears_and_navigates() {
        let (context, store, navigator) = context();
        context.login(session()).await.unwrap();

        context.logout().await;

        assert_eq!(context.status().await, SessionStatus::Expired);
        assert!(context.user().await.is_none());
        assert!(store.load().await.unwrap().is_none());
        let history = navigator.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0, Screen::Login);
        assert!(history[0].2, "logout must reset the navigation stack");
    }

    #[tokio::test]
    async fn login_after_logout_reactivates() {
        let (context, _, _) = context();
        context.logout().await;
        context.login(session()).await.unwrap();
        assert_eq!(context.status().await, SessionStatus::Active);
    }

    #[tokio::test]
    async fn update_profile_requires_user() {
        let (context, _, _) = context();
        let result = context.update_profile(|p| p.first_name = None).await;
        assert!(matches!(result, Err(ClientError::Unauthorized(_))));

        context.login(session()).await.unwrap();
        let profile = context
            .update_profile(|p| p.email = Some("bold@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(profile.email.as_deref(), Some("bold@example.com"));
        assert_eq!(
            context.user().await.unwrap().profile.email.as_deref(),
            Some("bold@example.com")
        );
    }
}
