//! Saved products, persisted next to the cart.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::StorageKeys;
use crate::cart::ProductId;
use crate::error::Result;
use crate::store::{MemoryStore, PersistentStore, read_or_default, write_value};

/// A product as it looked when it was saved.
///
/// The price is kept as the display string the catalogue sent, since a
/// wishlist entry is never totalled.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub nutrition: String,
    #[serde(default)]
    pub rating: f32,
}

/// The wishlist, with the same write-through contract as
/// [`CartStore`](crate::CartStore): one entry per product id, and the whole list
/// is rewritten after every change.
#[derive(Debug)]
pub struct Wishlist<S: PersistentStore = MemoryStore> {
    store: Arc<S>,
    key: String,
    items: RwLock<Vec<ProductSnapshot>>,
}

impl<S> Wishlist<S>
where
    S: PersistentStore,
{
    pub fn restore(store: Arc<S>) -> Result<Self> {
        Self::restore_with_keys(store, &StorageKeys::default())
    }

    #[tracing::instrument(name = "restoring wishlist from store", skip_all)]
    pub fn restore_with_keys(store: Arc<S>, keys: &StorageKeys) -> Result<Self> {
        let key = keys.wishlist_key();
        let mut items: Vec<ProductSnapshot> = read_or_default(store.as_ref(), &key)?;

        let mut seen = Vec::with_capacity(items.len());
        items.retain(|item| {
            if seen.contains(&item.id) {
                return false;
            }
            seen.push(item.id);
            true
        });

        Ok(Self {
            store,
            key,
            items: RwLock::new(items),
        })
    }

    /// Saves `product`.
    ///
    /// Returns `true` if it was added, `false` if a product with the same id
    /// is already on the list (in which case nothing is written).
    #[tracing::instrument(name = "adding product to wishlist", skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: ProductSnapshot) -> Result<bool> {
        let mut items = self.items.write();
        if items.iter().any(|item| item.id == product.id) {
            return Ok(false);
        }

        items.push(product);
        self.persist(&items)?;
        Ok(true)
    }

    /// Removes the product with `id`; a product not on the list is a no-op.
    #[tracing::instrument(name = "removing product from wishlist", skip(self))]
    pub fn remove(&self, id: ProductId) -> Result<()> {
        let mut items = self.items.write();

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(());
        }

        self.persist(&items)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.read().iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> Vec<ProductSnapshot> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn persist(&self, items: &[ProductSnapshot]) -> Result<()> {
        write_value(self.store.as_ref(), &self.key, items).map_err(|err| {
            tracing::error!(err = %err, "failed to persist wishlist");
            err.into()
        })
    }
}
