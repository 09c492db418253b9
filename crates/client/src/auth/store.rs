//! Durable credential storage.
//!
//! Exactly two things are persisted - the bearer token and the serialized
//! identity - and they are always written and cleared together, one JSON
//! document per session. Load failures are deliberately non-fatal: restore
//! happens at startup and must never block or crash the client, so anything
//! unreadable is treated as "no session" and logged.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Credential;
use crate::models::Identity;

/// Durable storage for the session credential.
pub trait CredentialStore {
    /// Read the persisted credential, if a valid one exists.
    fn load(&self) -> Option<Credential>;
    /// Persist the credential, replacing any previous one.
    fn save(&self, credential: &Credential);
    /// Remove any persisted credential.
    fn clear(&self);
}

/// On-disk serialization: both keys together or nothing.
#[derive(Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    user: Identity,
}

/// File-backed store: one JSON document at a configured path.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredCredential>(&raw) {
            Ok(stored) => Some(Credential::new(
                SecretString::from(stored.token),
                stored.user,
            )),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable credential file");
                None
            }
        }
    }

    fn save(&self, credential: &Credential) {
        let stored = StoredCredential {
            token: credential.token().expose_secret().to_owned(),
            user: credential.identity().clone(),
        };
        let Ok(raw) = serde_json::to_string(&stored) else {
            return;
        };
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!(path = %self.path.display(), error = %e, "could not create credential directory");
            return;
        }
        if let Err(e) = fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), error = %e, "could not persist credential");
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "could not clear credential file");
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<(String, Identity)>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.slot.lock().ok()?.as_ref().map(|(token, identity)| {
            Credential::new(SecretString::from(token.clone()), identity.clone())
        })
    }

    fn save(&self, credential: &Credential) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some((
                credential.token().expose_secret().to_owned(),
                credential.identity().clone(),
            ));
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use thread_saints_core::{Email, UserId};

    fn credential() -> Credential {
        Credential::new(
            SecretString::from("t1"),
            Identity {
                id: UserId::new("u1"),
                email: Email::parse("a@b.c").unwrap(),
            },
        )
    }

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("ts-credential-test-{name}-{}", std::process::id()));
        path
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let store = FileCredentialStore::new(path.clone());

        store.save(&credential());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.identity().id, UserId::new("u1"));
        assert_eq!(loaded.token().expose_secret(), "t1");

        store.clear();
        assert!(store.load().is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = FileCredentialStore::new(temp_path("missing"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file_is_none() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(path.clone());
        assert!(store.load().is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let store = FileCredentialStore::new(temp_path("idempotent"));
        store.clear();
        store.clear();
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::default();
        assert!(store.load().is_none());

        store.save(&credential());
        assert!(store.load().is_some());

        store.clear();
        assert!(store.load().is_none());
    }
}
