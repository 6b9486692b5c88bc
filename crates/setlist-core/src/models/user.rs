//! Account types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokens::{AccessToken, Credential, RefreshToken};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Response of the login and registration endpoints.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    /// The credential to persist after a successful login.
    pub fn credential(&self) -> Credential {
        Credential::new(
            AccessToken::new(self.token.clone()),
            self.refresh_token.clone().map(RefreshToken::new),
        )
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_without_refresh_token() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "jwt",
            "user": {"_id": "u1", "username": "alice", "email": "alice@example.com"}
        }))
        .unwrap();

        let credential = response.credential();
        assert_eq!(credential.access_token.as_str(), "jwt");
        assert!(credential.refresh_token.is_none());
        assert_eq!(response.user.unwrap().id, "u1");
    }

    #[test]
    fn auth_response_debug_is_redacted() {
        let response: AuthResponse =
            serde_json::from_value(json!({"token": "jwt-secret", "refreshToken": "r-secret"}))
                .unwrap();
        let debug = format!("{:?}", response);
        assert!(!debug.contains("secret"));
    }
}
