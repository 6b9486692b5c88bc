//! Authenticated HTTP client with token-refresh retry.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, instrument, trace, warn};

use setlist_core::error::{Error, InvalidInputError, RequestError, TransportError};
use setlist_core::{AccessToken, ApiUrl, Credential, CredentialStore, RefreshToken, Result};

use crate::config::ClientConfig;
use crate::endpoints::{REFRESH_TOKEN, RefreshTokenRequest, RefreshTokenResponse};
use crate::request::{ApiRequest, ApiResponse};

/// Changes to the stored session, observable via [`ApiClient::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new access token was obtained and persisted.
    Refreshed,
    /// Credentials were cleared after an unrecoverable auth failure.
    ///
    /// The embedding application should drop user state and route to login.
    Expired,
}

/// Why a refresh attempt failed. Never leaves the crate: callers see
/// [`Error::AuthExpired`].
#[derive(Debug, thiserror::Error)]
enum RefreshError {
    #[error("refresh request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("refresh rejected with HTTP {status}")]
    Rejected { status: u16 },

    #[error("malformed refresh response: {message}")]
    Malformed { message: String },
}

/// HTTP client for the playlist backend.
///
/// Attaches the stored access token to every request and transparently
/// recovers from one expired token per request: on a 401 it exchanges the
/// refresh token, persists the new pair and re-issues the request once.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and safe to share
/// across tasks. Concurrent requests that are rejected at the same time
/// share a single refresh call.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base: ApiUrl,
    store: Arc<dyn CredentialStore>,
    refresh_guard: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a client for the configured backend using `store` for credentials.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;

        let (events, _) = broadcast::channel(16);

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base: config.base_url,
                store,
                refresh_guard: Mutex::new(()),
                events,
            }),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// Returns the credential store this client reads and writes.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Issue a request and return the successful response unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response arrived; never retried.
    /// - [`Error::AuthExpired`] if the access token was rejected and could not
    ///   be renewed, or the renewed token was rejected as well. Stored
    ///   credentials are cleared before this is returned.
    /// - [`Error::Request`] for any other non-success status.
    /// - [`Error::Storage`] if the store cannot be read, or cannot persist a
    ///   refreshed token. In the latter case no event is sent and the old
    ///   token stays stored.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        if request.is_anonymous() {
            let response = self.dispatch(request, None).await?;
            return into_outcome(response).await;
        }

        let token = self.inner.store.access_token().await?;
        let response = self.dispatch(request, token.as_ref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return into_outcome(response).await;
        }

        // The single retry of this request; a second 401 ends the session.
        debug!("Access token rejected, renewing");
        let renewed = self.renew(token.as_ref()).await?;

        let retried = self.dispatch(request, Some(&renewed)).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!("Renewed access token rejected, ending session");
            self.expire().await;
            return Err(Error::AuthExpired);
        }

        into_outcome(retried).await
    }

    /// Force a token refresh with the stored refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExpired`] (after clearing credentials) if no
    /// refresh token is stored or the refresh endpoint rejects it.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.inner.refresh_guard.lock().await;
        self.refresh_locked().await.map(|_| ())
    }

    /// Send a request and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    /// `GET path`, decoding the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(&ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(&ApiRequest::post(path).json(body)?).await
    }

    /// `PUT path` with a JSON body, decoding the JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(&ApiRequest::put(path).json(body)?).await
    }

    /// `DELETE path`, decoding the JSON response.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(&ApiRequest::delete(path)).await
    }

    /// `DELETE path`, ignoring the body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(&ApiRequest::delete(path)).await.map(|_| ())
    }

    /// Obtain a usable access token after `rejected` was refused.
    async fn renew(&self, rejected: Option<&AccessToken>) -> Result<AccessToken> {
        let _guard = self.inner.refresh_guard.lock().await;

        // Another request may have refreshed while this one waited.
        if let Some(current) = self.inner.store.access_token().await? {
            if rejected != Some(&current) {
                debug!("Access token already renewed by a concurrent request");
                return Ok(current);
            }
        }

        self.refresh_locked().await
    }

    /// Exchange the stored refresh token. Caller holds the refresh guard.
    async fn refresh_locked(&self) -> Result<AccessToken> {
        let Some(refresh_token) = self.inner.store.refresh_token().await? else {
            info!("No refresh token stored, ending session");
            self.expire().await;
            return Err(Error::AuthExpired);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(credential) => {
                self.inner.store.save(&credential).await?;
                info!("Access token refreshed");
                let _ = self.inner.events.send(SessionEvent::Refreshed);
                Ok(credential.access_token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, ending session");
                self.expire().await;
                Err(Error::AuthExpired)
            }
        }
    }

    async fn request_refresh(
        &self,
        refresh_token: &RefreshToken,
    ) -> std::result::Result<Credential, RefreshError> {
        let url = self.inner.base.endpoint(REFRESH_TOKEN);
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.as_str(),
        };

        let response = self
            .inner
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(RefreshError::Transport)?;

        let status = response.status();
        trace!(status = %status, "Refresh response");
        if !status.is_success() {
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: RefreshTokenResponse =
            response
                .json()
                .await
                .map_err(|e| RefreshError::Malformed {
                    message: e.to_string(),
                })?;

        if body.token.is_empty() {
            return Err(RefreshError::Malformed {
                message: "empty token".to_string(),
            });
        }

        Ok(Credential::new(
            AccessToken::new(body.token),
            body.refresh_token
                .filter(|t| !t.is_empty())
                .map(RefreshToken::new),
        ))
    }

    /// Clear credentials and notify subscribers.
    async fn expire(&self) {
        if let Err(e) = self.inner.store.clear().await {
            warn!(error = %e, "Failed to clear stored credentials");
        }
        let _ = self.inner.events.send(SessionEvent::Expired);
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response> {
        let url = self.inner.base.endpoint(request.path());
        trace!(%url, authed = token.is_some(), "Dispatching request");

        let mut builder = self
            .inner
            .http
            .request(request.method().clone(), &url)
            .headers(request_headers(request, token)?);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        trace!(status = %response.status(), "Response");
        Ok(response)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .field("store", &"[CredentialStore]")
            .finish()
    }
}

/// Default headers, the bearer token, then the caller's own headers.
fn request_headers(request: &ApiRequest, token: Option<&AccessToken>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(
            |_| InvalidInputError::Other {
                message: "stored access token contains invalid header characters".to_string(),
            },
        )?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in request.headers() {
        headers.insert(name.clone(), value.clone());
    }

    Ok(headers)
}

/// Read the body and classify the status.
async fn into_outcome(response: reqwest::Response) -> Result<ApiResponse> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(transport_error)?;

    if status.is_success() {
        Ok(ApiResponse::new(status, headers, body.to_vec()))
    } else {
        debug!(status = %status, "Request failed");
        Err(RequestError::new(status.as_u16(), String::from_utf8_lossy(&body)).into())
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_core::MemoryCredentialStore;

    fn client() -> ApiClient {
        let config = ClientConfig::new(ApiUrl::new("https://music.example.com/api").unwrap());
        ApiClient::new(config, Arc::new(MemoryCredentialStore::new())).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = client();
        assert_eq!(client.base_url().as_str(), "https://music.example.com/api");
    }

    #[test]
    fn debug_hides_store() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("music.example.com"));
        assert!(debug.contains("[CredentialStore]"));
    }

    #[test]
    fn headers_attach_bearer_and_defaults() {
        let request = ApiRequest::get("/playlists");
        let token = AccessToken::new("abc");
        let headers = request_headers(&request, Some(&token)).unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn caller_headers_override_defaults() {
        let request = ApiRequest::get("/playlists")
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let headers = request_headers(&request, None).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn invalid_token_characters_are_rejected() {
        let request = ApiRequest::get("/playlists");
        let token = AccessToken::new("bad\ntoken");
        assert!(matches!(
            request_headers(&request, Some(&token)),
            Err(Error::InvalidInput(_))
        ));
    }
}
