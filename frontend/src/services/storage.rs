//! `localStorage` / `sessionStorage` backends for the persisted session and
//! theme. Storage may be unavailable (private browsing, disabled cookies);
//! reads then return nothing and writes report a storage error.

use laundry_shared::persistence::{SessionBackend, SessionPersistence};
use laundry_shared::theme::{ThemeMode, THEME_KEY};
use laundry_shared::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    /// Survives browser restarts.
    Local,
    /// Cleared when the tab closes.
    Session,
}

impl BrowserStorage {
    fn raw(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self {
            Self::Local => window.local_storage(),
            Self::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl SessionBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.raw()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = self
            .raw()
            .ok_or_else(|| AppError::Storage("Browser storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| AppError::Storage(format!("Failed to write {key}: {err:?}")))
    }

    fn delete(&self, key: &str) {
        if let Some(storage) = self.raw() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "failed to remove storage entry");
            }
        }
    }
}

pub fn session_persistence() -> SessionPersistence<BrowserStorage> {
    SessionPersistence::new(BrowserStorage::Local, BrowserStorage::Session)
}

pub fn load_theme() -> ThemeMode {
    BrowserStorage::Local
        .read(THEME_KEY)
        .map(|value| ThemeMode::parse(&value))
        .unwrap_or_default()
}

pub fn save_theme(mode: ThemeMode) {
    if let Err(err) = BrowserStorage::Local.write(THEME_KEY, mode.as_str()) {
        tracing::warn!("theme not saved: {err}");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use laundry_shared::persistence::SESSION_KEY;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_write_read_delete() {
        let storage = BrowserStorage::Session;
        storage.write("laundry-test", "value").unwrap();
        assert_eq!(storage.read("laundry-test").as_deref(), Some("value"));
        storage.delete("laundry-test");
        assert_eq!(storage.read("laundry-test"), None);
    }

    #[wasm_bindgen_test]
    fn test_session_record_round_trip() {
        let persistence = session_persistence();
        let user = serde_json::from_str(r#"{"id":"a@b.co","role":"user"}"#).unwrap();

        persistence.save(&user, "tok", false).unwrap();
        assert!(BrowserStorage::Local.read(SESSION_KEY).is_none());
        assert_eq!(persistence.restore().map(|record| record.token).as_deref(), Some("tok"));

        persistence.clear();
        assert!(persistence.restore().is_none());
    }

    #[wasm_bindgen_test]
    fn test_theme_round_trip() {
        save_theme(ThemeMode::Dark);
        assert_eq!(load_theme(), ThemeMode::Dark);
        save_theme(ThemeMode::Light);
        assert_eq!(load_theme(), ThemeMode::Light);
    }
}
