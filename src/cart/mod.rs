//! The shopping cart and its write-through persistence.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::StorageKeys;
use crate::error::Result;
use crate::store::{MemoryStore, PersistentStore, read_or_default, write_value};

mod line;
pub use line::{CartItem, CartLine, ProductId};

/// The cart, mirrored to a [`PersistentStore`] after every mutation.
///
/// Construct one per application with [`CartStore::restore`] and hand it (or an
/// `Arc` of it) to every consumer. All mutation goes through this type: lines
/// are merged by product id, and the whole cart is written back under the cart
/// key before a mutating call returns.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use dairy_session::{CartItem, CartStore};
/// use dairy_session::store::MemoryStore;
/// use rust_decimal::Decimal;
///
/// let cart = CartStore::restore(Arc::new(MemoryStore::new())).unwrap();
/// cart.add_line(CartItem::new(1, "Cow Milk 1L", Decimal::from(60))).unwrap();
/// cart.add_line(CartItem::new(1, "Cow Milk 1L", Decimal::from(60))).unwrap();
///
/// assert_eq!(cart.lines().len(), 1);
/// assert_eq!(cart.total(), Some(Decimal::from(120)));
/// ```
#[derive(Debug)]
pub struct CartStore<S: PersistentStore = MemoryStore> {
    store: Arc<S>,
    key: String,
    lines: RwLock<Vec<CartLine>>,
}

impl<S> CartStore<S>
where
    S: PersistentStore,
{
    /// Creates the cart and hydrates it from `store` under the default key.
    ///
    /// A missing or unreadable value yields an empty cart; only a failing
    /// backend is reported as an error.
    pub fn restore(store: Arc<S>) -> Result<Self> {
        Self::restore_with_keys(store, &StorageKeys::default())
    }

    /// Like [`CartStore::restore`], reading from the cart key of `keys`.
    #[tracing::instrument(name = "restoring cart from store", skip_all)]
    pub fn restore_with_keys(store: Arc<S>, keys: &StorageKeys) -> Result<Self> {
        let key = keys.cart_key();
        let lines = load(store.as_ref(), &key)?;
        tracing::debug!(lines = lines.len(), "cart restored");

        Ok(Self {
            store,
            key,
            lines: RwLock::new(lines),
        })
    }

    /// Adds one unit of `item`.
    ///
    /// An existing line for the same product has its quantity incremented;
    /// otherwise a new line with quantity 1 is appended. No stock limit is
    /// checked here.
    ///
    /// The in-memory cart is always updated. An error means only that the
    /// write-through to the backing store failed.
    #[tracing::instrument(name = "adding line to cart", skip(self, item), fields(product_id = %item.product_id))]
    pub fn add_line(&self, item: CartItem) -> Result<()> {
        let mut lines = self.lines.write();

        match lines
            .iter_mut()
            .find(|line| line.product_id() == item.product_id)
        {
            Some(line) => line.increment(),
            None => lines.push(CartLine::from_item(item)),
        }

        self.persist(&lines)
    }

    /// Removes the line for `product_id`.
    ///
    /// Removing a product that is not in the cart is a no-op and writes nothing.
    #[tracing::instrument(name = "removing line from cart", skip(self))]
    pub fn remove_line(&self, product_id: ProductId) -> Result<()> {
        let mut lines = self.lines.write();

        let before = lines.len();
        lines.retain(|line| line.product_id() != product_id);
        if lines.len() == before {
            tracing::debug!("product not in cart");
            return Ok(());
        }

        self.persist(&lines)
    }

    /// Empties the cart unconditionally.
    #[tracing::instrument(name = "clearing cart", skip(self))]
    pub fn clear(&self) -> Result<()> {
        let mut lines = self.lines.write();
        lines.clear();
        self.persist(&lines)
    }

    /// Replaces the in-memory cart with what the backing store currently holds.
    #[tracing::instrument(name = "reloading cart from store", skip(self))]
    pub fn reload(&self) -> Result<()> {
        let mut lines = self.lines.write();
        *lines = load(self.store.as_ref(), &self.key)?;
        Ok(())
    }

    /// Sum of `unit_price × quantity` over all lines.
    ///
    /// Returns `None` if the sum does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        self.lines
            .read()
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
    }

    /// Returns a snapshot of the lines, in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.read().clone()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .read()
            .iter()
            .find(|line| line.product_id() == product_id)
            .map(CartLine::quantity)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .read()
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.read().is_empty()
    }

    // Called with the write guard held, so the persisted order of writes
    // matches the in-memory order.
    fn persist(&self, lines: &[CartLine]) -> Result<()> {
        write_value(self.store.as_ref(), &self.key, lines).map_err(|err| {
            tracing::error!(err = %err, "failed to persist cart");
            err.into()
        })
    }
}

fn load<S: PersistentStore + ?Sized>(store: &S, key: &str) -> Result<Vec<CartLine>> {
    let lines: Vec<CartLine> = read_or_default(store, key).map_err(|err| {
        tracing::error!(err = %err, "failed to read cart from store");
        err
    })?;

    Ok(normalize(lines))
}

/// Re-establishes the cart invariants on data written by someone else:
/// zero-quantity lines are dropped, repeated product ids are merged into
/// the first occurrence, and lines whose subtotal cannot be represented are
/// dropped.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut normalized: Vec<CartLine> = Vec::with_capacity(lines.len());

    for line in lines {
        if line.quantity() == 0 {
            tracing::warn!(product_id = %line.product_id(), "dropping zero-quantity cart line");
            continue;
        }

        match normalized
            .iter_mut()
            .find(|existing| existing.product_id() == line.product_id())
        {
            Some(existing) => existing.absorb(&line),
            None => normalized.push(line),
        }
    }

    normalized.retain(|line| {
        if line.subtotal().is_some() {
            return true;
        }
        tracing::warn!(product_id = %line.product_id(), "dropping cart line with unrepresentable subtotal");
        false
    });

    normalized
}
