use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalogue product, unique within a cart.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as offered to [`CartStore::add_line`](crate::CartStore::add_line).
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub display_name: String,
    pub unit_price: Decimal,
}

impl CartItem {
    pub fn new(
        product_id: impl Into<ProductId>,
        display_name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            display_name: display_name.into(),
            unit_price,
        }
    }
}

/// One product entry in the cart with its aggregated quantity.
///
/// A line held by a [`CartStore`](crate::CartStore) always has a quantity of
/// at least 1. The persisted field names (`id`, `name`, `price`, `quantity`)
/// match the browser client writing the same key. `price` is read from either a
/// JSON number or a string but always written as a decimal string.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CartLine {
    #[serde(rename = "id")]
    product_id: ProductId,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "price")]
    unit_price: Decimal,
    quantity: u32,
}

impl CartLine {
    pub(crate) fn from_item(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            display_name: item.display_name,
            unit_price: item.unit_price,
            quantity: 1,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`, or `None` if it does not fit in a [`Decimal`].
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn absorb(&mut self, other: &CartLine) {
        self.quantity = self.quantity.saturating_add(other.quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let line = CartLine::from_item(CartItem::new(7, "Buffalo Milk 1L", Decimal::from(68)));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Buffalo Milk 1L");
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["price"], "68");
    }

    #[test]
    fn test_numeric_price_is_accepted() {
        let line: CartLine =
            serde_json::from_str(r#"{"id":3,"name":"Paneer","price":250,"quantity":2}"#).unwrap();

        assert_eq!(line.unit_price(), Decimal::from(250));
        assert_eq!(line.subtotal(), Some(Decimal::from(500)));
    }

    #[test]
    fn test_subtotal_overflow() {
        let line: CartLine = serde_json::from_str(
            r#"{"id":1,"name":"x","price":"50000000000000000000000000000","quantity":2}"#,
        )
        .unwrap();

        assert_eq!(line.subtotal(), None);
    }
}
