//! # dairy-session: client state for the dairy-delivery storefront
//!
//! `dairy-session` holds the state a storefront client keeps between page loads:
//! the shopping cart, the bearer-token session and the wishlist. Each is kept in
//! memory and written through to a [`PersistentStore`](store::PersistentStore)
//! after every change.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dairy_session::{CartItem, ClientState, ProductId};
//! use dairy_session::store::MemoryStore;
//! use rust_decimal::Decimal;
//!
//! let store = Arc::new(MemoryStore::new());
//! let state = ClientState::restore(store.clone()).unwrap();
//!
//! state.cart.add_line(CartItem::new(1, "Cow Milk 1L", Decimal::from(60))).unwrap();
//! state.cart.add_line(CartItem::new(2, "Curd 500g", Decimal::from(45))).unwrap();
//! state.cart.add_line(CartItem::new(1, "Cow Milk 1L", Decimal::from(60))).unwrap();
//! assert_eq!(state.cart.quantity_of(ProductId(1)), Some(2));
//! assert_eq!(state.cart.total(), Some(Decimal::from(165)));
//!
//! // A fresh start over the same store sees the same cart.
//! let reloaded = ClientState::restore(store).unwrap();
//! assert_eq!(reloaded.cart.lines(), state.cart.lines());
//! ```
//!
//! # Session
//!
//! ```rust
//! use std::sync::Arc;
//! use dairy_session::{Error, Session};
//! use dairy_session::store::MemoryStore;
//! use http::StatusCode;
//!
//! let session = Session::new(Arc::new(MemoryStore::new()));
//! session.set_token("abc").unwrap();
//!
//! // Attach to every request to the remote API.
//! let headers = session.auth_headers();
//! assert_eq!(headers["authorization"], "Bearer abc");
//!
//! // A 401 from the remote API signs the user out.
//! assert!(matches!(session.check_status(StatusCode::UNAUTHORIZED), Err(Error::Unauthorized)));
//! assert!(!session.is_authenticated());
//! ```
//!
//! # Stores
//!
//! - [`MemoryStore`](store::MemoryStore): lives as long as the process. Used in tests.
//! - [`NoopStore`](store::NoopStore): for contexts with no storage host; reads are
//!   always empty and writes are dropped.
//! - [`FileStore`](store::file::FileStore): a JSON file on disk. Requires the
//!   `file-store` feature (enabled by default).
//!
//! Persisted values are JSON under the keys `cart`, `token` and `wishlist`. The
//! names can be changed, or namespaced, with [`StorageKeys`].
//!
//! # Corrupt data
//!
//! A persisted value that fails to decode is logged and treated as absent: the
//! cart or wishlist starts empty and the next write replaces it.

mod cart;
pub use cart::*;

mod error;
pub use error::{Error, Result};

mod keys;
pub use keys::StorageKeys;

mod session;
pub use session::*;

mod state;
pub use state::ClientState;

pub mod store;

mod wishlist;
pub use wishlist::*;
