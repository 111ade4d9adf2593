//! Shopping cart aggregate.

use super::Document;
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

/// A line in a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CartItem {
    #[validate(custom(function = "crate::validation::rules::not_blank", message = "ProductId is required"))]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: u32,
    #[validate(custom(function = "crate::validation::rules::non_negative", message = "Price cannot be negative"))]
    pub price: Decimal,
}

impl CartItem {
    /// Creates a new cart item.
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            price,
        }
    }

    /// Returns `quantity × price`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// A user's shopping cart. `user_name` is the aggregate identity; the cart
/// is stored, cached and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct ShoppingCart {
    #[validate(custom(function = "crate::validation::rules::not_blank", message = "UserName is required"))]
    pub user_name: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CartItem>,
}

impl ShoppingCart {
    /// Creates an empty cart for a user.
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            items: Vec::new(),
        }
    }

    /// Replaces the cart contents.
    #[must_use]
    pub fn with_items(mut self, items: Vec<CartItem>) -> Self {
        self.items = items;
        self
    }

    /// Sum of `quantity × price` over all items, or `None` on overflow.
    #[must_use]
    pub fn total_price(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.line_total()?))
    }

    /// Returns true if the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// `total_price` is emitted for readers (null when out of range) and ignored
// when reading back.
impl Serialize for ShoppingCart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ShoppingCart", 3)?;
        state.serialize_field("user_name", &self.user_name)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("total_price", &self.total_price())?;
        state.end()
    }
}

impl Document for ShoppingCart {
    const COLLECTION: &'static str = "shopping_cart";

    fn identity(&self) -> &str {
        &self.user_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateExt;

    fn alice_cart() -> ShoppingCart {
        ShoppingCart::new("alice").with_items(vec![CartItem::new("p1", "", 2, Decimal::new(999, 2))])
    }

    #[test]
    fn test_total_price_sums_lines() {
        assert_eq!(alice_cart().total_price(), Some(Decimal::new(1998, 2)));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = ShoppingCart::new("bob");
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_identity_is_user_name() {
        assert_eq!(alice_cart().identity(), "alice");
        assert_eq!(ShoppingCart::COLLECTION, "shopping_cart");
    }

    #[test]
    fn test_json_includes_total_and_reads_back_equal() {
        let cart = alice_cart();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["total_price"], "19.98");
        assert_eq!(json["items"][0]["price"], "9.99");

        let back: ShoppingCart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_missing_product_name_defaults_to_empty() {
        let cart: ShoppingCart = serde_json::from_str(
            r#"{"user_name":"alice","items":[{"product_id":"p1","quantity":2,"price":"9.99"}]}"#,
        )
        .unwrap();
        assert_eq!(cart.items[0].product_name, "");
        assert_eq!(cart.total_price(), Some(Decimal::new(1998, 2)));
    }

    #[test]
    fn test_cart_rules() {
        assert!(alice_cart().violations().is_empty());

        let invalid = ShoppingCart::new(" ").with_items(vec![CartItem::new("", "x", 0, Decimal::new(-1, 0))]);
        let fields: Vec<String> = invalid.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["items[0].price", "items[0].product_id", "items[0].quantity", "user_name"]
        );
    }

    #[test]
    fn test_overflowing_total_is_none_and_serializes_as_null() {
        let line = CartItem::new("p1", "x", 2, Decimal::MAX);
        assert_eq!(line.line_total(), None);

        let single = ShoppingCart::new("alice").with_items(vec![CartItem::new("p1", "x", 1, Decimal::MAX)]);
        assert_eq!(single.total_price(), Some(Decimal::MAX));

        let summed = ShoppingCart::new("alice").with_items(vec![
            CartItem::new("p1", "x", 1, Decimal::MAX),
            CartItem::new("p2", "y", 1, Decimal::ONE),
        ]);
        assert_eq!(summed.total_price(), None);

        let json = serde_json::to_value(&summed).unwrap();
        assert!(json["total_price"].is_null());
    }
}
