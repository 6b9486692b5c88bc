//! Shared helpers for the mock backend tests.

#![allow(dead_code)]

use std::sync::Arc;

use setlist_core::{ApiUrl, CredentialStore, MemoryCredentialStore, TokenSlot};
use setlist_http::{ApiClient, ClientConfig};
use wiremock::MockServer;

/// Base URL of a mock server, with the `/api` prefix the backend uses.
pub fn mock_api_url(server: &MockServer) -> ApiUrl {
    // For tests, we need to allow HTTP localhost
    ApiUrl::new(format!("http://127.0.0.1:{}/api", server.address().port())).unwrap()
}

/// A memory store holding the given slots.
pub async fn seeded_store(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryCredentialStore> {
    let store = Arc::new(MemoryCredentialStore::new());
    if let Some(access) = access {
        store.set(TokenSlot::Access, access).await.unwrap();
    }
    if let Some(refresh) = refresh {
        store.set(TokenSlot::Refresh, refresh).await.unwrap();
    }
    store
}

pub fn client_for(url: ApiUrl, store: Arc<dyn CredentialStore>) -> ApiClient {
    ApiClient::new(ClientConfig::new(url), store).unwrap()
}

pub async fn slot(store: &MemoryCredentialStore, slot: TokenSlot) -> Option<String> {
    store.get(slot).await.unwrap()
}
