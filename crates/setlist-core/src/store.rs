//! Credential storage trait and the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::tokens::{AccessToken, Credential, RefreshToken};
use crate::Result;

/// The two persisted credential slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSlot {
    /// The short-lived access token.
    Access,
    /// The long-lived refresh token.
    Refresh,
}

impl TokenSlot {
    /// Both slots, in storage order.
    pub const ALL: [TokenSlot; 2] = [TokenSlot::Access, TokenSlot::Refresh];

    /// The fixed key this slot is stored under.
    pub const fn key(self) -> &'static str {
        match self {
            TokenSlot::Access => "token",
            TokenSlot::Refresh => "refreshToken",
        }
    }
}

/// Persistent storage for the credential pair.
///
/// The API client reads the access token before every request and writes or
/// clears both slots during refresh; implementations must tolerate concurrent
/// callers but need not be transactional across slots.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read one slot.
    async fn get(&self, slot: TokenSlot) -> Result<Option<String>>;

    /// Overwrite one slot.
    async fn set(&self, slot: TokenSlot, value: &str) -> Result<()>;

    /// Remove one slot. Removing an empty slot is not an error.
    async fn remove(&self, slot: TokenSlot) -> Result<()>;

    /// The stored access token, if any.
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.get(TokenSlot::Access).await?.map(AccessToken::new))
    }

    /// The stored refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.get(TokenSlot::Refresh).await?.map(RefreshToken::new))
    }

    /// Persist a credential. A missing refresh token leaves that slot untouched.
    async fn save(&self, credential: &Credential) -> Result<()> {
        self.set(TokenSlot::Access, credential.access_token.as_str())
            .await?;
        if let Some(refresh) = &credential.refresh_token {
            self.set(TokenSlot::Refresh, refresh.as_str()).await?;
        }
        Ok(())
    }

    /// Remove both slots.
    async fn clear(&self) -> Result<()> {
        for slot in TokenSlot::ALL {
            self.remove(slot).await?;
        }
        Ok(())
    }
}

/// A process-local credential store.
///
/// Nothing survives a restart; useful for embedding and as a test double.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: RwLock<HashMap<TokenSlot, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential.
    pub fn with_credential(credential: &Credential) -> Self {
        let mut slots = HashMap::new();
        slots.insert(
            TokenSlot::Access,
            credential.access_token.as_str().to_string(),
        );
        if let Some(refresh) = &credential.refresh_token {
            slots.insert(TokenSlot::Refresh, refresh.as_str().to_string());
        }
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, slot: TokenSlot) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(&slot).cloned())
    }

    async fn set(&self, slot: TokenSlot, value: &str) -> Result<()> {
        self.slots.write().await.insert(slot, value.to_string());
        Ok(())
    }

    async fn remove(&self, slot: TokenSlot) -> Result<()> {
        self.slots.write().await.remove(&slot);
        Ok(())
    }
}
