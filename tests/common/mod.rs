#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dairy_session::store::{Error, PersistentStore};
use dairy_session::{CartItem, ProductSnapshot};
use parking_lot::Mutex;
use rust_decimal::Decimal;

pub fn paneer() -> CartItem {
    CartItem::new(1, "Malai Paneer 200g", Decimal::from(250))
}

pub fn toned_milk() -> CartItem {
    CartItem::new(2, "Toned Milk 1L", Decimal::from(100))
}

pub fn ghee() -> CartItem {
    CartItem::new(3, "Desi Ghee 500ml", Decimal::new(64950, 2))
}

pub fn snapshot(id: i64, name: &str) -> ProductSnapshot {
    ProductSnapshot {
        id: id.into(),
        name: name.to_string(),
        image: format!("/images/{id}.png"),
        price: "₹60".to_string(),
        description: "Fresh from the farm".to_string(),
        details: String::new(),
        nutrition: String::new(),
        rating: 4.5,
    }
}

/// Builds an unsigned JWT-shaped token carrying `role`.
pub fn make_token(sub: &str, role: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({
            "sub": sub,
            "role": role,
            "iat": 1_760_000_000,
            "exp": 1_760_086_400,
        })
        .to_string(),
    );
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// A store whose writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    data: Mutex<std::collections::HashMap<String, String>>,
    failing: Mutex<bool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

impl PersistentStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        if *self.failing.lock() {
            return Err(Error::Backend("quota exceeded".to_string()));
        }
        self.data.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        if *self.failing.lock() {
            return Err(Error::Backend("storage unavailable".to_string()));
        }
        self.data.lock().remove(key);
        Ok(())
    }
}
