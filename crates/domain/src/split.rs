//! Cart splitter: partitions cart lines by the organization that owns
//! each referenced product.

use std::collections::HashMap;

use common::{OrganizationId, ProductId};
use thiserror::Error;

use crate::cart::CartItem;
use crate::catalog::Product;

/// Errors that can occur while splitting a cart.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A cart line references a product missing from the resolved list.
    /// The caller must resolve every product before splitting.
    #[error("Cart references unresolved product: {0}")]
    UnknownProduct(ProductId),

    /// The resolved product list contains the same product twice.
    #[error("Duplicate product in resolved list: {0}")]
    DuplicateProduct(ProductId),
}

/// Groups cart items by the owning organization of each product.
///
/// Every input item lands in exactly one bucket. Bucket iteration
/// order is not significant; downstream order creation does not depend
/// on it.
pub fn split_by_organization(
    items: &[CartItem],
    products: &[Product],
) -> Result<HashMap<OrganizationId, Vec<CartItem>>, SplitError> {
    let mut owners: HashMap<ProductId, OrganizationId> = HashMap::with_capacity(products.len());
    for product in products {
        if owners.insert(product.id, product.organization_id).is_some() {
            return Err(SplitError::DuplicateProduct(product.id));
        }
    }

    let mut groups: HashMap<OrganizationId, Vec<CartItem>> = HashMap::new();
    for item in items {
        let organization_id = owners
            .get(&item.product_id)
            .copied()
            .ok_or(SplitError::UnknownProduct(item.product_id))?;
        groups.entry(organization_id).or_default().push(item.clone());
    }

    Ok(groups)
}
