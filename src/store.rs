//! Key-value persistence seam
//!
//! The real store (counters, small JSON blobs) lives outside this
//! crate; this trait is the narrow surface the usage counter needs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use log::debug;

/// Narrow key-value interface over the external persistence store
#[async_trait]
pub trait KeyValueStore: Send + Sync
{   /// Prepare the store for use; idempotent
    async fn ensure_ready(&self)
      -> Result<(), crate::error::Error>;

    /// Fetch a value, None when the key is absent
    async fn get(&self, key: &str)
      -> Result<Option<String>, crate::error::Error>;

    /// Write a value
    async fn set(&self, key: &str, value: String)
      -> Result<(), crate::error::Error>;
}

/// In-memory store, used in tests and as a default
pub struct MemoryStore
{   entries: Mutex<HashMap<String, String>>
}

impl MemoryStore
{   pub fn new() -> Self
    {   debug!("Creating MemoryStore");
        MemoryStore
        {   entries: Mutex::new(HashMap::new())
        }
    }
}

impl Default for MemoryStore
{   fn default() -> Self
    {   MemoryStore::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore
{   async fn ensure_ready(&self)
      -> Result<(), crate::error::Error>
    {   Ok(())
    }

    async fn get(&self, key: &str)
      -> Result<Option<String>, crate::error::Error>
    {   let entries = self.entries
          .lock()
          .map_err(|_| {
            crate::error::Error::StoreError(
              "Store lock poisoned".to_string()
            )
          })?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String)
      -> Result<(), crate::error::Error>
    {   let mut entries = self.entries
          .lock()
          .map_err(|_| {
            crate::error::Error::StoreError(
              "Store lock poisoned".to_string()
            )
          })?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
