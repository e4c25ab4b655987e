//! Shared fixtures for use-case tests.

use std::sync::Arc;

use chrono::Utc;
use common::{OrganizationId, PriceId, ProductId, UserId};
use domain::{Cart, Money, Organization, PaymentProvider, Price, Product, ProductStatus, User};
use store::{
    CartRepository, InMemoryCartRepository, InMemoryOrderRepository,
    InMemoryOrganizationRepository, InMemoryPaymentIntentRepository, InMemoryPriceRepository,
    InMemoryProductRepository, InMemoryUserRepository,
};

use crate::orders::OrderService;
use crate::payments::PaymentIntentService;
use crate::providers::{InMemoryPaymentProvider, PaymentProviderRegistry};
use crate::token::JwtTokenSigner;

/// Fully wired in-memory service graph.
pub struct Fixture {
    pub orders: Arc<InMemoryOrderRepository>,
    pub carts: Arc<InMemoryCartRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub prices: Arc<InMemoryPriceRepository>,
    pub organizations: Arc<InMemoryOrganizationRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub intents: Arc<InMemoryPaymentIntentRepository>,
    pub provider: Arc<InMemoryPaymentProvider>,
    pub order_service: Arc<OrderService>,
    pub payment_service: PaymentIntentService,
}

impl Fixture {
    pub fn new() -> Self {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let carts = Arc::new(InMemoryCartRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let prices = Arc::new(InMemoryPriceRepository::new());
        let organizations = Arc::new(InMemoryOrganizationRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let intents = Arc::new(InMemoryPaymentIntentRepository::new());
        let provider = Arc::new(InMemoryPaymentProvider::new());
        let signer = Arc::new(JwtTokenSigner::new("test-secret"));

        let mut registry = PaymentProviderRegistry::new();
        registry.register(PaymentProvider::Payrex, provider.clone());

        let order_service = Arc::new(OrderService::new(
            orders.clone(),
            carts.clone(),
            products.clone(),
            prices.clone(),
            organizations.clone(),
            users.clone(),
            intents.clone(),
        ));
        let payment_service = PaymentIntentService::new(
            orders.clone(),
            intents.clone(),
            Arc::new(registry),
            signer,
            order_service.clone(),
            "USD",
        );

        Self {
            orders,
            carts,
            products,
            prices,
            organizations,
            users,
            intents,
            provider,
            order_service,
            payment_service,
        }
    }

    pub async fn seed_organization(&self, active: bool) -> OrganizationId {
        let id = OrganizationId::new();
        self.organizations
            .insert(Organization {
                id,
                name: "Acme".to_string(),
                active,
            })
            .await;
        id
    }

    pub async fn seed_unpriced_product(&self, organization_id: OrganizationId) -> ProductId {
        let id = ProductId::new();
        self.products
            .insert(Product {
                id,
                organization_id,
                name: "Widget".to_string(),
                status: ProductStatus::Active,
                default_price_id: None,
                created_at: Utc::now(),
            })
            .await;
        id
    }

    /// Writes a cart with the given lines directly, bypassing the cart
    /// service validations.
    pub async fn put_cart(&self, user_id: UserId, lines: &[(ProductId, u32)]) {
        let mut cart = Cart::new(user_id);
        for &(product_id, quantity) in lines {
            cart.add_item(product_id, quantity).unwrap();
        }
        self.carts.save(&cart).await.unwrap();
    }
}

pub async fn seed_user(fixture: &Fixture, eligible: bool) -> UserId {
    let id = UserId::new();
    fixture
        .users
        .insert(User {
            id,
            email: "shopper@example.com".to_string(),
            active: true,
            verified: eligible,
        })
        .await;
    id
}

pub async fn seed_product(
    fixture: &Fixture,
    organization_id: OrganizationId,
    unit_cents: i64,
) -> ProductId {
    let product_id = ProductId::new();
    let price_id = PriceId::new();
    fixture
        .products
        .insert(Product {
            id: product_id,
            organization_id,
            name: "Widget".to_string(),
            status: ProductStatus::Active,
            default_price_id: Some(price_id),
            created_at: Utc::now(),
        })
        .await;
    fixture
        .prices
        .insert(Price {
            id: price_id,
            product_id,
            unit_amount: Money::from_cents(unit_cents),
            active: true,
        })
        .await;
    product_id
}
