//! Client-side session model

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Bearer token paired with the profile it was issued for
///
/// Either half may be missing after a partial read of storage; only a
/// session holding both counts as authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// An authenticated session
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// An empty, unauthenticated session
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

/// Token response from `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Credentials sent to `POST /api/auth/login`
#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_authenticated_requires_both_halves() {
        let user = UserProfile::new("a@b.com", "A", Role::Employee);

        assert!(Session::new("tok", user.clone()).is_authenticated());
        assert!(!Session::anonymous().is_authenticated());

        let token_only = Session {
            token: Some("tok".to_string()),
            user: None,
        };
        assert!(!token_only.is_authenticated());

        let user_only = Session {
            token: None,
            user: Some(user),
        };
        assert!(!user_only.is_authenticated());
    }

    #[test]
    fn test_access_token_defaults_type() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "bearer");
    }
}
