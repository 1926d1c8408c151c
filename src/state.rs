use std::sync::Arc;

use crate::error::Result;
use crate::store::{MemoryStore, PersistentStore};
use crate::{CartStore, Session, StorageKeys, Wishlist};

/// Everything the client keeps between reloads, over one shared store.
///
/// Build it once at start-up and pass it to the code that needs it.
#[derive(Debug)]
pub struct ClientState<S: PersistentStore = MemoryStore> {
    pub cart: CartStore<S>,
    pub session: Session<S>,
    pub wishlist: Wishlist<S>,
}

impl<S> ClientState<S>
where
    S: PersistentStore,
{
    pub fn restore(store: Arc<S>) -> Result<Self> {
        Self::restore_with_keys(store, &StorageKeys::default())
    }

    #[tracing::instrument(name = "restoring client state", skip_all)]
    pub fn restore_with_keys(store: Arc<S>, keys: &StorageKeys) -> Result<Self> {
        Ok(Self {
            cart: CartStore::restore_with_keys(store.clone(), keys)?,
            session: Session::with_keys(store.clone(), keys),
            wishlist: Wishlist::restore_with_keys(store, keys)?,
        })
    }
}
