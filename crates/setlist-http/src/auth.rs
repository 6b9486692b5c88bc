//! Account operations: login, registration, logout.

use tracing::{info, instrument};

use setlist_core::{AuthResponse, LoginRequest, RegisterRequest, Result};

use crate::client::ApiClient;
use crate::endpoints::{LOGIN, REGISTER};
use crate::request::ApiRequest;

impl ApiClient {
    /// Log in and persist the returned credential.
    ///
    /// A 401 here means bad credentials and is returned as
    /// [`Error::Request`](setlist_core::Error::Request); no refresh is attempted.
    #[instrument(skip(self, login), fields(email = %login.email()))]
    pub async fn login(&self, login: &LoginRequest) -> Result<AuthResponse> {
        let request = ApiRequest::post(LOGIN).json(login)?.anonymous();
        self.authenticate(&request).await
    }

    /// Create an account and persist the returned credential.
    #[instrument(skip(self, registration), fields(username = %registration.username()))]
    pub async fn register(&self, registration: &RegisterRequest) -> Result<AuthResponse> {
        let request = ApiRequest::post(REGISTER).json(registration)?.anonymous();
        self.authenticate(&request).await
    }

    /// Forget the stored credential. No network call is made.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.store().clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Whether an access token is currently stored.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store().access_token().await?.is_some())
    }

    async fn authenticate(&self, request: &ApiRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.send_json(request).await?;
        self.store().save(&response.credential()).await?;
        info!("Session established");
        Ok(response)
    }
}
