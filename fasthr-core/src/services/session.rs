//! Session persistence - the token and user profile across restarts

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::{Session, UserProfile};
use crate::ports::KeyValueStore;

/// Key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-encoded user profile
pub const USER_KEY: &str = "user";

/// Reads and writes the session through a key-value store
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted session
    ///
    /// Both keys must be present and the profile must decode, otherwise the
    /// session is anonymous. Store failures are errors; bad profile JSON is not.
    pub fn load(&self) -> Result<Session> {
        let token = self.store.get(TOKEN_KEY)?;
        let user = self
            .store
            .get(USER_KEY)?
            .and_then(|raw| serde_json::from_str::<UserProfile>(&raw).ok());

        match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(Session::new(token, user)),
            _ => Ok(Session::anonymous()),
        }
    }

    /// Persist both halves of the session
    pub fn save(&self, token: &str, user: &UserProfile) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &user_json)
    }

    /// Remove both keys; removing absent keys succeeds
    pub fn clear(&self) -> Result<()> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }

    /// Put back a previous session after a failed save
    pub(crate) fn restore(&self, previous: &Session) -> Result<()> {
        match (previous.token(), previous.user()) {
            (Some(token), Some(user)) => self.save(token, user),
            _ => self.clear(),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryKeyValueStore;
    use crate::domain::Role;

    fn store() -> (Arc<MemoryKeyValueStore>, SessionStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let sessions = SessionStore::new(kv.clone());
        (kv, sessions)
    }

    fn profile() -> UserProfile {
        UserProfile::new("admin@fasthr.local", "Admin User", Role::Admin)
    }

    #[test]
    fn test_empty_store_is_anonymous() {
        let (_, sessions) = store();
        let session = sessions.load().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let (_, sessions) = store();
        sessions.save("abc", &profile()).unwrap();

        let session = sessions.load().unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user(), Some(&profile()));
    }

    #[test]
    fn test_token_without_user_is_anonymous() {
        let (kv, sessions) = store();
        kv.set(TOKEN_KEY, "abc").unwrap();
        assert!(!sessions.load().unwrap().is_authenticated());
    }

    #[test]
    fn test_unparseable_user_is_anonymous() {
        let (kv, sessions) = store();
        kv.set(TOKEN_KEY, "abc").unwrap();
        kv.set(USER_KEY, "{not json").unwrap();
        assert!(!sessions.load().unwrap().is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (kv, sessions) = store();
        sessions.save("abc", &profile()).unwrap();
        sessions.clear().unwrap();
        sessions.clear().unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn test_restore_previous() {
        let (kv, sessions) = store();
        sessions.save("new", &profile()).unwrap();

        sessions.restore(&Session::new("old", profile())).unwrap();
        assert_eq!(sessions.load().unwrap().token(), Some("old"));

        sessions.restore(&Session::anonymous()).unwrap();
        assert!(kv.is_empty());
    }
}
