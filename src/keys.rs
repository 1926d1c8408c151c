/// Names of the persistent-store keys used by the cart, session and wishlist.
///
/// # Example
///
/// ```rust
/// use dairy_session::StorageKeys;
///
/// let keys = StorageKeys::build()
///         .prefix("dairy:")
///         .cart("basket")
///         .wishlist("favourites");
///
/// assert_eq!(keys.cart_key(), "dairy:basket");
/// assert_eq!(keys.token_key(), "dairy:token");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub prefix: Option<&'static str>,
    pub cart: &'static str,
    pub token: &'static str,
    pub wishlist: &'static str,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            prefix: None,
            cart: "cart",
            token: "token",
            wishlist: "wishlist",
        }
    }
}

impl StorageKeys {
    /// Creates a new `StorageKeys` with default values.
    pub fn build() -> Self {
        Self::default()
    }

    /// Prepends `prefix` to every key.
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn cart(mut self, name: &'static str) -> Self {
        self.cart = name;
        self
    }

    pub fn token(mut self, name: &'static str) -> Self {
        self.token = name;
        self
    }

    pub fn wishlist(mut self, name: &'static str) -> Self {
        self.wishlist = name;
        self
    }

    pub fn cart_key(&self) -> String {
        self.resolve(self.cart)
    }

    pub fn token_key(&self) -> String {
        self.resolve(self.token)
    }

    pub fn wishlist_key(&self) -> String {
        self.resolve(self.wishlist)
    }

    fn resolve(&self, name: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.cart_key(), "cart");
        assert_eq!(keys.token_key(), "token");
        assert_eq!(keys.wishlist_key(), "wishlist");
    }
}
