//! Catalog records consumed by use-case validation.
//!
//! Catalog management itself (CRUD, membership) lives outside this
//! system; these are the read-side shapes the order flow depends on.

use chrono::{DateTime, Utc};
use common::{OrganizationId, PriceId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// A product listed by an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub status: ProductStatus,
    pub default_price_id: Option<PriceId>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns true if the product can be carted and ordered.
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

/// A price attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,
    pub product_id: ProductId,
    pub unit_amount: Money,
    pub active: bool,
}

/// An organization (store) that lists products and receives orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub active: bool,
}

/// A user who builds carts and places orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub active: bool,
    pub verified: bool,
}

impl User {
    /// Returns true if the user may create orders and payment intents.
    pub fn can_checkout(&self) -> bool {
        self.active && self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_products_are_orderable() {
        let mut product = Product {
            id: ProductId::new(),
            organization_id: OrganizationId::new(),
            name: "Widget".to_string(),
            status: ProductStatus::Draft,
            default_price_id: Some(PriceId::new()),
            created_at: Utc::now(),
        };
        assert!(!product.is_active());

        product.status = ProductStatus::Active;
        assert!(product.is_active());

        product.status = ProductStatus::Archived;
        assert!(!product.is_active());
    }

    #[test]
    fn checkout_requires_active_and_verified() {
        let mut user = User {
            id: UserId::new(),
            email: "a@example.com".to_string(),
            active: true,
            verified: false,
        };
        assert!(!user.can_checkout());

        user.verified = true;
        assert!(user.can_checkout());

        user.active = false;
        assert!(!user.can_checkout());
    }
}
