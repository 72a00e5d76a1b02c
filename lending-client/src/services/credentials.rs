use async_trait::async_trait;
use client_core::ClientError;
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Credentials persisted between app launches.
#[derive(Debug)]
pub struct StoredCredentials {
    pub user_id: String,
    pub access_token: Secret<String>,
    pub refresh_token: Secret<String>,
}

impl Clone for StoredCredentials {
    fn clone(&self) -> Self {
        Self {
            user_id: self.user_id.clone(),
            access_token: Secret::new(self.access_token.expose_secret().clone()),
            refresh_token: Secret::new(self.refresh_token.expose_secret().clone()),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn save(&self, credentials: StoredCredentials) -> Result<(), ClientError>;

    async fn load(&self) -> Result<Option<StoredCredentials>, ClientError>;

    async fn clear(&self) -> Result<(), ClientError>;
}

/// Process-local store; credentials vanish with the process.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<Option<StoredCredentials>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, credentials: StoredCredentials) -> Result<(), ClientError> {
        *self.inner.write().await = Some(credentials);
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredCredentials>, ClientError> {
        Ok(self.inner.read().await.clone())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        self.inner.write().await.take();
        Ok(())
    }
}
