//! Cart use cases.

use std::sync::Arc;

use common::{ProductId, UserId};
use domain::Cart;
use store::{CartRepository, PriceRepository, ProductRepository};

use crate::error::{CheckoutError, Result};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 100;

/// Cart management: wraps the cart aggregate with catalog checks.
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    prices: Arc<dyn PriceRepository>,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        prices: Arc<dyn PriceRepository>,
    ) -> Self {
        Self {
            carts,
            products,
            prices,
        }
    }

    /// Returns the user's cart, or a fresh empty one if none exists
    /// yet. The empty cart is not persisted until the first add.
    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart> {
        Ok(self
            .carts
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(user_id)))
    }

    /// Adds a product line, creating the cart lazily.
    ///
    /// The product must exist, be ACTIVE, and carry an active default
    /// price; the resulting line quantity must stay within
    /// 1..=[`MAX_LINE_QUANTITY`].
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart> {
        if quantity == 0 || quantity > MAX_LINE_QUANTITY {
            return Err(CheckoutError::QuantityOutOfRange {
                quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(product_id))?;
        if !product.is_active() {
            return Err(CheckoutError::ProductUnavailable(product_id));
        }
        if product.default_price_id.is_none()
            || self
                .prices
                .find_active_for_product(product_id)
                .await?
                .is_none()
        {
            return Err(CheckoutError::MissingPrice(product_id));
        }

        let mut cart = self.get_cart(user_id).await?;
        let merged = cart
            .find_item(product_id)
            .map_or(quantity, |line| line.quantity + quantity);
        if merged > MAX_LINE_QUANTITY {
            return Err(CheckoutError::QuantityOutOfRange {
                quantity: merged,
                max: MAX_LINE_QUANTITY,
            });
        }

        cart.add_item(product_id, quantity)?;
        self.carts.save(&cart).await?;

        metrics::counter!("cart_items_added_total").increment(1);
        Ok(cart)
    }

    /// Sets the quantity of an existing line. Quantity 0 removes the
    /// line entirely.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart> {
        if quantity > MAX_LINE_QUANTITY {
            return Err(CheckoutError::QuantityOutOfRange {
                quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let mut cart = self
            .carts
            .find_by_user_id(user_id)
            .await?
            .ok_or(CheckoutError::CartNotFound(user_id))?;

        if quantity == 0 {
            cart.remove_item(product_id);
        } else {
            cart.update_item(product_id, quantity)?;
        }
        self.carts.save(&cart).await?;
        Ok(cart)
    }

    /// Removes a line. A missing cart or line is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> Result<Cart> {
        let mut cart = self.get_cart(user_id).await?;
        cart.remove_item(product_id);
        self.carts.save(&cart).await?;
        Ok(cart)
    }

    /// Empties the cart. Clearing is deliberately a separate step from
    /// order creation; callers invoke it explicitly after checkout.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<Cart> {
        let mut cart = self.get_cart(user_id).await?;
        cart.clear();
        self.carts.save(&cart).await?;
        Ok(cart)
    }
}
