//! Cart Store

use std::{fmt, sync::Arc};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    cart::{
        Cart,
        storage::{self, CART_STORAGE_KEY, CartStorage},
    },
    prices::Price,
    products::{Product, ProductId},
};

/// Session-owned cart state container.
///
/// Every mutation that changes the cart is published to subscribers and
/// written through to storage. Clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Cart>,
    storage: Arc<dyn CartStorage>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the store, rehydrating whatever the storage slot holds.
    ///
    /// A slot that cannot be read or decoded is logged and treated as empty.
    pub fn open(storage: Arc<dyn CartStorage>) -> Self {
        let cart = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => storage::decode(&raw).unwrap_or_else(|error| {
                warn!("discarding unreadable persisted cart: {error}");

                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!("failed to load persisted cart: {error}");

                Cart::new()
            }
        };

        debug!(lines = cart.len(), "cart store opened");

        let (state, _initial) = watch::channel(cart);

        Self {
            inner: Arc::new(Inner { state, storage }),
        }
    }

    /// Add one unit of `product`, creating its line on first add.
    pub fn add_item(&self, product: &Product) {
        if self.apply(|cart| cart.add(product)) {
            debug!(product = %product.id, "added item to cart");
        }
    }

    /// Set the quantity of an existing line to `max(1, quantity)`.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        if self.apply(|cart| cart.update_quantity(product_id, quantity)) {
            debug!(product = %product_id, quantity, "updated cart quantity");
        }
    }

    /// Remove a line if present.
    pub fn remove_item(&self, product_id: ProductId) {
        if self.apply(|cart| cart.remove(product_id)) {
            debug!(product = %product_id, "removed item from cart");
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        if self.apply(Cart::clear) {
            debug!("cleared cart");
        }
    }

    /// Current subtotal.
    pub fn cart_total(&self) -> Price {
        self.inner.state.borrow().subtotal()
    }

    /// Current number of units.
    pub fn cart_item_count(&self) -> u64 {
        self.inner.state.borrow().item_count()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().is_empty()
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to changes; the receiver always sees the latest cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.state.subscribe()
    }

    /// Apply `mutate`, publishing and persisting only when it reports a change.
    fn apply(&self, mutate: impl FnOnce(&mut Cart) -> bool) -> bool {
        let changed = self.inner.state.send_if_modified(mutate);

        if changed {
            self.persist();
        }

        changed
    }

    fn persist(&self) {
        let encoded = storage::encode(&self.inner.state.borrow());

        let result = encoded.and_then(|raw| self.inner.storage.save(CART_STORAGE_KEY, &raw));

        if let Err(error) = result {
            warn!("failed to persist cart: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        cart::{MemoryCartStorage, StorageError},
        stores::StoreId,
    };

    use super::*;

    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    fn product(name: &str, price: u64) -> Product {
        Product::new(ProductId::new(), name, Price::new(price), StoreId::new())
    }

    fn memory_store() -> (CartStore, MemoryCartStorage) {
        let storage = MemoryCartStorage::new();

        (CartStore::open(Arc::new(storage.clone())), storage)
    }

    #[test]
    fn two_products_scenario_totals() {
        let (store, _storage) = memory_store();
        let a = product("A", 10_000);
        let b = product("B", 5_000);

        store.add_item(&a);
        store.add_item(&b);
        store.add_item(&b);

        assert_eq!(store.cart_item_count(), 3);
        assert_eq!(store.cart_total(), Price::new(20_000));
    }

    #[test]
    fn update_quantity_clamps_non_positive_values() {
        let (store, _storage) = memory_store();
        let a = product("A", 10_000);

        store.add_item(&a);
        store.update_quantity(a.id, 5);
        store.update_quantity(a.id, -3);

        assert_eq!(store.cart_item_count(), 1);
        assert_eq!(store.cart_total(), Price::new(10_000));
    }

    #[test]
    fn remove_excludes_the_line_from_aggregates() {
        let (store, _storage) = memory_store();
        let a = product("A", 10_000);
        let b = product("B", 5_000);

        store.add_item(&a);
        store.add_item(&b);
        store.update_quantity(b.id, 4);
        store.remove_item(b.id);

        assert_eq!(store.cart_item_count(), 1);
        assert_eq!(store.cart_total(), Price::new(10_000));
    }

    #[test]
    fn clearing_twice_leaves_an_empty_cart() {
        let (store, _storage) = memory_store();

        store.add_item(&product("A", 10_000));
        store.clear_cart();
        store.clear_cart();

        assert!(store.is_empty());
        assert_eq!(store.cart_item_count(), 0);
        assert_eq!(store.cart_total(), Price::ZERO);
    }

    #[test]
    fn mutations_are_written_through() -> TestResult {
        let (store, storage) = memory_store();
        let a = product("A", 10_000);

        store.add_item(&a);

        let reopened = CartStore::open(Arc::new(storage.clone()));
        assert_eq!(reopened.snapshot(), store.snapshot());

        store.clear_cart();

        let raw = storage.load(CART_STORAGE_KEY)?.unwrap_or_default();
        assert!(storage::decode(&raw)?.is_empty());

        Ok(())
    }

    #[test]
    fn unreadable_payload_opens_empty() -> TestResult {
        let storage = MemoryCartStorage::new();
        storage.save(CART_STORAGE_KEY, "not json")?;

        let store = CartStore::open(Arc::new(storage));

        assert!(store.is_empty());

        Ok(())
    }

    #[test]
    fn failing_storage_never_fails_cart_operations() {
        let store = CartStore::open(Arc::new(BrokenStorage));
        let a = product("A", 2_500);

        store.add_item(&a);
        store.add_item(&a);

        assert_eq!(store.cart_total(), Price::new(5_000));
    }

    #[test]
    fn subscribers_see_changes_but_not_no_ops() {
        let (store, _storage) = memory_store();
        let a = product("A", 1_000);
        let mut receiver = store.subscribe();

        store.remove_item(a.id);
        assert!(!receiver.has_changed().unwrap_or(true), "no-op must not notify");

        store.add_item(&a);
        assert!(receiver.has_changed().unwrap_or(false), "add must notify");
        assert_eq!(receiver.borrow_and_update().item_count(), 1);
    }

    #[test]
    fn adding_to_a_full_line_is_a_no_op() -> TestResult {
        let (store, storage) = memory_store();
        let a = product("A", 1);

        store.add_item(&a);
        store.update_quantity(a.id, i64::MAX);

        let persisted = storage.load(CART_STORAGE_KEY)?;
        let mut receiver = store.subscribe();
        receiver.mark_unchanged();

        storage.save(CART_STORAGE_KEY, "untouched")?;
        store.add_item(&a);

        assert!(!receiver.has_changed().unwrap_or(true), "saturated add must not notify");
        assert_eq!(storage.load(CART_STORAGE_KEY)?.as_deref(), Some("untouched"));
        assert_eq!(store.cart_item_count(), u64::from(u32::MAX));
        assert!(persisted.is_some());

        Ok(())
    }

    #[test]
    fn clones_share_the_same_cart() {
        let (store, _storage) = memory_store();
        let other = store.clone();

        other.add_item(&product("A", 1_000));

        assert_eq!(store.cart_item_count(), 1);
    }
}
