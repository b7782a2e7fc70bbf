//! Session token lookup. The guard only ever reads the token through
//! [`SessionTokenProvider`]; writes happen at login/logout, outside the guard,
//! through [`store_token`] and [`clear_token`]. Token values must never be
//! logged.

use crate::navigation::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};
use tracing::{debug, instrument, warn};

/// Key the frontend stores its access token under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Opaque credential presumed to prove authentication. Only its presence is
/// checked; an empty string is still a present token.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SessionToken([REDACTED])")
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Read-only access to the current session token.
pub trait SessionTokenProvider {
    fn session_token(&self) -> Option<SessionToken>;
}

/// A fixed token state, handy as a fake.
impl SessionTokenProvider for Option<SessionToken> {
    fn session_token(&self) -> Option<SessionToken> {
        self.clone()
    }
}

impl<P: SessionTokenProvider + ?Sized> SessionTokenProvider for &P {
    fn session_token(&self) -> Option<SessionToken> {
        (**self).session_token()
    }
}

impl<P: SessionTokenProvider + ?Sized> SessionTokenProvider for Box<P> {
    fn session_token(&self) -> Option<SessionToken> {
        (**self).session_token()
    }
}

/// String key-value store shaped like the browser's `localStorage`.
pub trait KeyValueStore {
    /// # Errors
    /// Returns an error if the backing storage can't be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    /// Returns an error if the backing storage can't be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the backing storage can't be written.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// In-process store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk, so values survive restarts.
/// A missing file is an empty store. Reads of a malformed file fail with
/// [`Error::Json`]; writes replace it.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(Error::Store(err)),
        }
    }

    /// Current items for a write. The flag is set when an unparseable file is
    /// being discarded and must be rewritten.
    fn read_for_write(&self) -> Result<(BTreeMap<String, String>, bool)> {
        match self.read_all() {
            Ok(items) => Ok((items, false)),
            Err(Error::Json(err)) => {
                warn!("replacing malformed store {}: {err}", self.path.display());
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(skip(value))]
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let (mut items, _) = self.read_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)?;
        debug!("stored {key}");
        Ok(())
    }

    #[instrument]
    fn remove_item(&self, key: &str) -> Result<()> {
        let (mut items, malformed) = self.read_for_write()?;
        if items.remove(key).is_some() || malformed {
            self.write_all(&items)?;
            debug!("removed {key}");
        }
        Ok(())
    }
}

/// The browser's `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| Error::Store(io::Error::other("localStorage is unavailable")))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| Error::Store(io::Error::other(format!("{err:?}"))))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| Error::Store(io::Error::other(format!("{err:?}"))))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| Error::Store(io::Error::other(format!("{err:?}"))))
    }
}

/// Reads the session token from one fixed key of a store. Never writes.
#[derive(Debug)]
pub struct StoredToken<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StoredToken<S> {
    /// Reads [`ACCESS_TOKEN_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, ACCESS_TOKEN_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> SessionTokenProvider for StoredToken<S> {
    fn session_token(&self) -> Option<SessionToken> {
        match self.store.get_item(&self.key) {
            Ok(token) => token.map(SessionToken::from),
            Err(err) => {
                // An unreadable store is indistinguishable from a logged-out user.
                warn!("failed to read session token {}: {err}", self.key);
                None
            }
        }
    }
}

/// Persists `token` under `key`, as done after a successful login.
///
/// # Errors
/// Returns an error if the store can't be written.
pub fn store_token<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    token: &SessionToken,
) -> Result<()> {
    store.set_item(key, token.expose())
}

/// Removes the token under `key`, as done at logout.
///
/// # Errors
/// Returns an error if the store can't be written.
pub fn clear_token<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<()> {
    store.remove_item(key)
}
