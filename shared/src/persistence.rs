//! Durable session record.
//!
//! One key, [`SESSION_KEY`], holds `{ user, token, remember }`. A remembered
//! session is written to the durable backend and survives a browser restart;
//! otherwise it is written to the tab-scoped backend and survives reloads
//! only. Sessions saved under the old `smartLaundryUser` key are migrated on
//! first restore.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserRef;

pub const SESSION_KEY: &str = "auth";
pub const LEGACY_REMEMBER_KEY: &str = "smartLaundryUser";

/// String key/value storage such as `localStorage` or `sessionStorage`.
pub trait SessionBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn delete(&self, key: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: UserRef,
    pub token: String,
    #[serde(default)]
    pub remember: bool,
}

/// Reads and writes the session record across both storage scopes.
pub struct SessionPersistence<B> {
    durable: B,
    tab: B,
}

impl<B: SessionBackend> SessionPersistence<B> {
    pub fn new(durable: B, tab: B) -> Self {
        Self { durable, tab }
    }

    pub fn save(&self, user: &UserRef, token: &str, remember: bool) -> Result<(), AppError> {
        let record = PersistedSession {
            user: user.clone(),
            token: token.to_string(),
            remember,
        };
        let json = serde_json::to_string(&record)
            .map_err(|err| AppError::Serialization(format!("Failed to encode session: {err}")))?;

        let (target, other) = if remember {
            (&self.durable, &self.tab)
        } else {
            (&self.tab, &self.durable)
        };
        target.write(SESSION_KEY, &json)?;
        other.delete(SESSION_KEY);
        tracing::debug!(remember, "session persisted");
        Ok(())
    }

    /// Most recently saved session, if any. Unreadable records are removed.
    pub fn restore(&self) -> Option<PersistedSession> {
        if let Some(record) = read_record(&self.durable, SESSION_KEY) {
            return Some(record);
        }
        if let Some(record) = read_record(&self.tab, SESSION_KEY) {
            return Some(record);
        }
        self.migrate_legacy()
    }

    pub fn clear(&self) {
        for backend in [&self.durable, &self.tab] {
            backend.delete(SESSION_KEY);
            backend.delete(LEGACY_REMEMBER_KEY);
        }
    }

    fn migrate_legacy(&self) -> Option<PersistedSession> {
        let legacy = read_record(&self.durable, LEGACY_REMEMBER_KEY)?;
        self.durable.delete(LEGACY_REMEMBER_KEY);
        if let Err(err) = self.save(&legacy.user, &legacy.token, true) {
            tracing::warn!("failed to migrate legacy session: {err}");
        } else {
            tracing::info!("migrated legacy remembered session");
        }
        Some(PersistedSession {
            remember: true,
            ..legacy
        })
    }
}

fn read_record<B: SessionBackend>(backend: &B, key: &str) -> Option<PersistedSession> {
    let raw = backend.read(key)?;
    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(key, "discarding unreadable session record: {err}");
            backend.delete(key);
            None
        }
    }
}

/// In-memory backend for tests and non-browser hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::tests::user;

    fn persistence() -> (SessionPersistence<MemoryBackend>, MemoryBackend, MemoryBackend) {
        let durable = MemoryBackend::new();
        let tab = MemoryBackend::new();
        (
            SessionPersistence::new(durable.clone(), tab.clone()),
            durable,
            tab,
        )
    }

    #[test]
    fn test_remembered_session_goes_to_durable_storage() {
        let (persistence, durable, tab) = persistence();
        let alice = user("alice@example.com", Role::User);

        persistence.save(&alice, "tok-1", true).unwrap();

        assert_eq!(durable.keys(), vec![SESSION_KEY.to_string()]);
        assert!(tab.keys().is_empty());
        let restored = persistence.restore().unwrap();
        assert_eq!(restored.user, alice);
        assert_eq!(restored.token, "tok-1");
        assert!(restored.remember);
    }

    #[test]
    fn test_unremembered_session_stays_in_tab_storage() {
        let (persistence, durable, tab) = persistence();
        persistence
            .save(&user("alice@example.com", Role::User), "tok-1", true)
            .unwrap();
        persistence
            .save(&user("bob@example.com", Role::Admin), "tok-2", false)
            .unwrap();

        assert!(durable.keys().is_empty());
        assert_eq!(tab.keys(), vec![SESSION_KEY.to_string()]);
        let restored = persistence.restore().unwrap();
        assert_eq!(restored.token, "tok-2");
        assert!(!restored.remember);
    }

    #[test]
    fn test_restore_reproduces_exact_pair() {
        let (persistence, _, _) = persistence();
        let raw = r#"{"id":7,"role":"manager","phone":"9876543210","created_at":"2024-01-01"}"#;
        let odd_user: UserRef = serde_json::from_str(raw).unwrap();

        persistence.save(&odd_user, "tok", false).unwrap();
        let restored = persistence.restore().unwrap();

        assert_eq!(
            serde_json::to_value(&restored.user).unwrap(),
            serde_json::from_str::<serde_json::Value>(raw).unwrap()
        );
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let (persistence, durable, _) = persistence();
        durable.write(SESSION_KEY, "{not json").unwrap();

        assert_eq!(persistence.restore(), None);
        assert!(durable.keys().is_empty());
    }

    #[test]
    fn test_legacy_key_is_migrated_once() {
        let (persistence, durable, _) = persistence();
        durable
            .write(
                LEGACY_REMEMBER_KEY,
                r#"{"token":"legacy","user":{"id":"a@b.co","role":"user"}}"#,
            )
            .unwrap();

        let restored = persistence.restore().unwrap();
        assert_eq!(restored.token, "legacy");
        assert!(restored.remember);
        assert_eq!(durable.keys(), vec![SESSION_KEY.to_string()]);

        let again = persistence.restore().unwrap();
        assert_eq!(again, restored);
    }

    #[test]
    fn test_clear_removes_every_key() {
        let (persistence, durable, tab) = persistence();
        persistence
            .save(&user("a@b.co", Role::User), "tok", true)
            .unwrap();
        tab.write(SESSION_KEY, "{}").unwrap();
        durable.write(LEGACY_REMEMBER_KEY, "{}").unwrap();

        persistence.clear();

        assert!(durable.keys().is_empty());
        assert!(tab.keys().is_empty());
        assert_eq!(persistence.restore(), None);
    }
}
