//! Cart Storage
//!
//! A key-value slot the cart is written through to. The payload keeps the
//! `{"state":{"items":[...]},"version":0}` shape so carts saved by earlier
//! clients still rehydrate.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

/// Fixed key the cart lives under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Version written alongside the persisted state.
pub const CART_STORAGE_VERSION: u32 = 0;

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage i/o error")]
    Io(#[from] io::Error),

    /// The payload could not be encoded or decoded.
    #[error("invalid cart payload")]
    Payload(#[from] serde_json::Error),

    /// A writer panicked while holding the slot.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Durable key-value slot for serialized carts.
pub trait CartStorage: Send + Sync {
    /// Read the raw value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Serialize)]
struct PersistedCartRef<'a> {
    state: &'a Cart,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct PersistedCart {
    state: PersistedState,
}

#[derive(Debug, Deserialize)]
struct PersistedState {
    #[serde(default)]
    items: Vec<CartLine>,
}

/// Encode a cart for storage.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, StorageError> {
    let payload = PersistedCartRef {
        state: cart,
        version: CART_STORAGE_VERSION,
    };

    Ok(serde_json::to_string(&payload)?)
}

/// Decode a stored cart.
///
/// # Errors
///
/// Returns an error if the payload is not a persisted cart.
pub fn decode(raw: &str) -> Result<Cart, StorageError> {
    let payload: PersistedCart = serde_json::from_str(raw)?;

    Ok(Cart::from_lines(payload.state.items))
}

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCartStorage {
    /// Creates a new, empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        slots.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see half a file.
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        Ok(())
    }
}
