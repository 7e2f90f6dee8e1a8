//! Hot-reload handle
//!
//! `SharedStore` publishes whole `ContentStore`s. A reload builds the new store
//! off to the side and swaps the `Arc` only once it loaded cleanly, so readers
//! always see either the old store or the new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use crate::error::LoadError;
use crate::source::ContentSource;
use crate::store::ContentStore;

#[derive(Debug)]
pub struct SharedStore {
    current: RwLock<Arc<ContentStore>>,
}

impl SharedStore {
    pub fn new(store: ContentStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// The store currently being served. Holding the returned `Arc` keeps that
    /// store alive across later reloads.
    pub fn snapshot(&self) -> Arc<ContentStore> {
        // The guarded value is a single Arc; a panicking writer cannot leave it half-written.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the served store, returning the previous one.
    pub fn publish(&self, store: ContentStore) -> Arc<ContentStore> {
        let next = Arc::new(store);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }

    /// Loads a fresh store from `source` and publishes it.
    ///
    /// On failure the current store keeps serving and the error is returned.
    pub async fn reload(&self, source: &dyn ContentSource) -> Result<Arc<ContentStore>, LoadError> {
        match ContentStore::from_source(source).await {
            Ok(store) => {
                let topics = store.len();
                self.publish(store);
                info!(topics, "Content store reloaded");
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(error = %e, "Content reload failed; keeping previous store");
                Err(e)
            }
        }
    }
}
