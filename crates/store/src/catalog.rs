//! Read-side catalog repositories.
//!
//! Catalog writes happen outside this system; the order flow only
//! needs lookups.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrganizationId, PriceId, ProductId, UserId};
use domain::{Organization, Price, Product, User};
use tokio::sync::RwLock;

use crate::error::Result;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Returns the products found for `ids`; missing ids are absent
    /// from the result.
    async fn find_many_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Returns the active price for a product, if one exists.
    async fn find_active_for_product(&self, product_id: ProductId) -> Result<Option<Price>>;
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_many_by_ids(&self, ids: &[OrganizationId]) -> Result<Vec<Organization>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
}

/// In-memory product repository. `insert` seeds fixtures.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_many_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }
}

/// In-memory price repository. `insert` seeds fixtures.
#[derive(Clone, Default)]
pub struct InMemoryPriceRepository {
    prices: Arc<RwLock<HashMap<PriceId, Price>>>,
}

impl InMemoryPriceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, price: Price) {
        self.prices.write().await.insert(price.id, price);
    }
}

#[async_trait]
impl PriceRepository for InMemoryPriceRepository {
    async fn find_active_for_product(&self, product_id: ProductId) -> Result<Option<Price>> {
        let prices = self.prices.read().await;
        Ok(prices
            .values()
            .find(|p| p.product_id == product_id && p.active)
            .cloned())
    }
}

/// In-memory organization repository. `insert` seeds fixtures.
#[derive(Clone, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Arc<RwLock<HashMap<OrganizationId, Organization>>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, organization: Organization) {
        self.organizations
            .write()
            .await
            .insert(organization.id, organization);
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_many_by_ids(&self, ids: &[OrganizationId]) -> Result<Vec<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| organizations.get(id).cloned())
            .collect())
    }
}

/// In-memory user repository. `insert` seeds fixtures.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use domain::{Money, ProductStatus};

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(),
            organization_id: OrganizationId::new(),
            name: "Widget".to_string(),
            status: ProductStatus::Active,
            default_price_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn find_many_products_skips_missing() {
        let repo = InMemoryProductRepository::new();
        let known = product();
        repo.insert(known.clone()).await;

        let found = repo
            .find_many_by_ids(&[known.id, ProductId::new()])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, known.id);
    }

    #[tokio::test]
    async fn active_price_lookup_ignores_inactive() {
        let repo = InMemoryPriceRepository::new();
        let product_id = ProductId::new();
        repo.insert(Price {
            id: PriceId::new(),
            product_id,
            unit_amount: Money::from_cents(500),
            active: false,
        })
        .await;

        assert!(
            repo.find_active_for_product(product_id)
                .await
                .unwrap()
                .is_none()
        );

        let active = Price {
            id: PriceId::new(),
            product_id,
            unit_amount: Money::from_cents(700),
            active: true,
        };
        repo.insert(active.clone()).await;

        let found = repo
            .find_active_for_product(product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, active.id);
    }

    #[tokio::test]
    async fn organizations_resolve_by_ids() {
        let repo = InMemoryOrganizationRepository::new();
        let org = Organization {
            id: OrganizationId::new(),
            name: "Acme".to_string(),
            active: true,
        };
        repo.insert(org.clone()).await;

        let found = repo
            .find_many_by_ids(&[org.id, OrganizationId::new()])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn user_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = User {
            id: UserId::new(),
            email: "a@example.com".to_string(),
            active: true,
            verified: true,
        };
        repo.insert(user.clone()).await;

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(found.can_checkout());
    }
}
