//! Cart aggregate.

use chrono::{DateTime, Utc};
use common::{CartId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity must be at least 1.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// The referenced product has no line in the cart.
    #[error("Item not found in cart: {product_id}")]
    ItemNotFound { product_id: ProductId },
}

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Per-user mutable bag of product lines, created lazily on first add.
///
/// The cart holds at most one line per product; adding an existing
/// product merges quantities. Clearing empties the line list but the
/// record itself persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    items: Vec<CartItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(),
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line for a product, if present.
    pub fn find_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds a product line, merging quantities when the product is
    /// already in the cart.
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        self.touch();
        Ok(())
    }

    /// Replaces the quantity of an existing line.
    pub fn update_item(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CartError::ItemNotFound { product_id })?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Removes a product line. A missing line is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() != before {
            self.touch();
        }
    }

    /// Empties the cart. The record itself persists.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(UserId::new());
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn add_item_appends_line() {
        let mut cart = Cart::new(UserId::new());
        let product_id = ProductId::new();

        cart.add_item(product_id, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.find_item(product_id).unwrap().quantity, 2);
    }

    #[test]
    fn add_same_product_merges_quantities() {
        let mut cart = Cart::new(UserId::new());
        let product_id = ProductId::new();

        cart.add_item(product_id, 2).unwrap();
        cart.add_item(product_id, 3).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.find_item(product_id).unwrap().quantity, 5);
    }

    #[test]
    fn add_zero_quantity_fails() {
        let mut cart = Cart::new(UserId::new());
        let result = cart.add_item(ProductId::new(), 0);
        assert!(matches!(result, Err(CartError::InvalidQuantity { .. })));
    }

    #[test]
    fn update_item_replaces_quantity() {
        let mut cart = Cart::new(UserId::new());
        let product_id = ProductId::new();

        cart.add_item(product_id, 2).unwrap();
        cart.update_item(product_id, 7).unwrap();

        assert_eq!(cart.find_item(product_id).unwrap().quantity, 7);
    }

    #[test]
    fn update_missing_item_fails() {
        let mut cart = Cart::new(UserId::new());
        let result = cart.update_item(ProductId::new(), 1);
        assert!(matches!(result, Err(CartError::ItemNotFound { .. })));
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut cart = Cart::new(UserId::new());
        let product_id = ProductId::new();
        cart.add_item(product_id, 1).unwrap();

        cart.remove_item(product_id);
        assert!(cart.is_empty());

        // Second removal is a no-op, not an error.
        cart.remove_item(product_id);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_but_keeps_identity() {
        let mut cart = Cart::new(UserId::new());
        let id = cart.id();
        cart.add_item(ProductId::new(), 2).unwrap();
        cart.add_item(ProductId::new(), 1).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.id(), id);
    }
}
