//! Auth service - login, logout, rehydration and session expiry
//!
//! `AuthService` is the only writer of the session. It owns the in-memory
//! copy, keeps the persisted copy in step with it, and tracks the current
//! location so login and logout can navigate.

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ApiRequest};
use crate::domain::result::{Error, Result, LOGIN_FALLBACK_MESSAGE};
use crate::domain::{AccessToken, Credentials, Session, UserProfile};
use crate::services::guard::{GuardPhase, Route};
use crate::services::session::SessionStore;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/auth/me";

pub struct AuthService {
    api: Arc<ApiClient>,
    store: SessionStore,
    session: Session,
    rehydrated: bool,
    location: Route,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, store: SessionStore) -> Self {
        Self {
            api,
            store,
            session: Session::anonymous(),
            rehydrated: false,
            location: Route::Login,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }

    pub fn phase(&self) -> GuardPhase {
        if !self.rehydrated {
            GuardPhase::Loading
        } else if self.session.is_authenticated() {
            GuardPhase::Authenticated
        } else {
            GuardPhase::Unauthenticated
        }
    }

    /// Current location
    pub fn location(&self) -> Route {
        self.location
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        self.location = route;
    }

    /// Load the persisted session, once
    ///
    /// The Loading phase ends here even when the store cannot be read; the
    /// session is then anonymous and the error is returned.
    pub fn rehydrate(&mut self) -> Result<&Session> {
        if self.rehydrated {
            return Ok(&self.session);
        }

        let loaded = self.store.load();
        self.rehydrated = true;

        match loaded {
            Ok(session) => {
                self.session = session;
                Ok(&self.session)
            }
            Err(e) => {
                self.session = Session::anonymous();
                Err(e)
            }
        }
    }

    /// Exchange credentials for a token, then fetch the profile
    ///
    /// Nothing is persisted until both calls succeed. On failure the session,
    /// persisted and in memory, is exactly what it was before.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let request = ApiRequest::post(LOGIN_PATH, &Credentials { email, password })?;
        let token: AccessToken = self.api.request(&request, None).map_err(login_error)?;

        let profile: UserProfile = self
            .api
            .request(&ApiRequest::get(PROFILE_PATH), Some(&token.access_token))
            .map_err(login_error)?;

        // Before rehydration the in-memory session says nothing about the store
        let previous = if self.rehydrated {
            Some(self.session.clone())
        } else {
            self.store.load().ok()
        };

        if let Err(e) = self.store.save(&token.access_token, &profile) {
            // A half-written session must not outlive the failed login
            if let Some(previous) = previous {
                if let Err(restore_err) = self.store.restore(&previous) {
                    return Err(Error::storage(format!(
                        "{}; restoring the previous session also failed: {}",
                        e, restore_err
                    )));
                }
            }
            return Err(e);
        }

        self.session = Session::new(token.access_token, profile.clone());
        self.rehydrated = true;
        self.location = Route::HOME;
        Ok(profile)
    }

    /// End the session; calling it again changes nothing
    pub fn logout(&mut self) -> Result<()> {
        self.end_session()
    }

    /// Tear down after the API rejected the token
    pub fn expire_session(&mut self) -> Result<()> {
        self.end_session()
    }

    fn end_session(&mut self) -> Result<()> {
        self.session = Session::anonymous();
        self.rehydrated = true;
        self.location = Route::Login;
        self.store.clear()
    }
}

/// Login failures carry the server's reason when there is one
fn login_error(error: Error) -> Error {
    let message = match error {
        Error::Unauthorized { detail } => detail.unwrap_or_default(),
        Error::LoginFailed(message) => message,
        other => other.to_string(),
    };

    if message.trim().is_empty() {
        Error::LoginFailed(LOGIN_FALLBACK_MESSAGE.to_string())
    } else {
        Error::LoginFailed(message)
    }
}
