//! # Inventory Repository
//!
//! Explicit product management: create, update, delete, list, search.
//!
//! ## Lookup Rules
//! - `get_by_id` / `update` / `delete` use the stable UUID
//! - `search` is a case-insensitive substring match on the name
//! - exact-name matching (the persisted layout's natural key) lives in
//!   `kairo_core::stock`; duplicate names match the first entry in
//!   insertion order

use tracing::{debug, info};
use uuid::Uuid;

use kairo_core::{dates, validation, Money, Product};

use crate::error::{StoreError, StoreResult};
use crate::store::{keys, Database};

/// Repository for product collection operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: Database,
}

/// Field patch for [`InventoryRepository::update`]. Unset fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Money>,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(db: Database) -> Self {
        InventoryRepository { db }
    }

    /// Lists all products in insertion order.
    pub async fn list_all(&self) -> StoreResult<Vec<Product>> {
        self.db.read(keys::PRODUCTS).await
    }

    /// Creates a product with a fresh id and today's date.
    ///
    /// ## Errors
    /// Blank name, negative quantity or negative price.
    pub async fn create(&self, name: &str, quantity: i64, price: Money) -> StoreResult<Product> {
        let name = validation::require_product_name(name)?;
        validation::validate_stock_level(quantity)?;
        validation::validate_price(price)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            quantity,
            price,
            date: dates::today_string(),
        };

        let mut products = self.list_all().await?;
        products.push(product.clone());
        self.db.write(keys::PRODUCTS, &products).await?;

        info!(id = %product.id, name = %product.name, quantity = product.quantity, "product created");
        Ok(product)
    }

    /// Patches an existing product.
    ///
    /// ## Errors
    /// Unknown id, or a patched field failing validation.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        if let Some(name) = &update.name {
            validation::require_product_name(name)?;
        }
        if let Some(quantity) = update.quantity {
            validation::validate_stock_level(quantity)?;
        }
        if let Some(price) = update.price {
            validation::validate_price(price)?;
        }

        let mut products = self.list_all().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))?;

        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        let updated = product.clone();

        self.db.write(keys::PRODUCTS, &products).await?;
        debug!(id = %id, "product updated");
        Ok(updated)
    }

    /// Deletes a product. Unknown ids are a no-op (idempotent).
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut products = self.list_all().await?;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() != before {
            self.db.write(keys::PRODUCTS, &products).await?;
            info!(id = %id, "product deleted");
        }
        Ok(())
    }

    /// Fetches a product by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.list_all().await?.into_iter().find(|p| p.id == id))
    }

    /// First product with an exactly matching name, in insertion order.
    ///
    /// The compatibility shim behind name-keyed line items; prefer
    /// [`Self::get_by_id`] where an id is available.
    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        Ok(self.list_all().await?.into_iter().find(|p| p.name == name))
    }

    /// Case-insensitive substring search on the product name.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<Product>> {
        let term = validation::normalize_search_query(term)?;
        let products = self.list_all().await?;
        if term.is_empty() {
            return Ok(products);
        }
        Ok(products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::open_database;

    async fn repo() -> (tempfile::TempDir, InventoryRepository) {
        let (dir, db) = open_database().await;
        (dir, InventoryRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_date() {
        let (_dir, repo) = repo().await;
        let product = repo
            .create("Pipe 2in", 10, Money::from_piasters(500))
            .await
            .unwrap();

        assert!(!product.id.is_empty());
        assert_eq!(product.date, dates::today_string());

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Pipe 2in");
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let (_dir, repo) = repo().await;
        assert!(repo.create("", 10, Money::zero()).await.is_err());
        assert!(repo.create("Pipe", -1, Money::zero()).await.is_err());
        assert!(repo
            .create("Pipe", 1, Money::from_piasters(-5))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let (_dir, repo) = repo().await;
        let product = repo
            .create("Pipe 2in", 10, Money::from_piasters(500))
            .await
            .unwrap();

        let updated = repo
            .update(
                &product.id,
                ProductUpdate {
                    quantity: Some(25),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.quantity, 25);
        assert_eq!(updated.name, "Pipe 2in");
        assert_eq!(updated.price, Money::from_piasters(500));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let (_dir, repo) = repo().await;
        let err = repo.update("missing", ProductUpdate::default()).await;
        assert!(matches!(err, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, repo) = repo().await;
        let a = repo.create("Pipe", 1, Money::zero()).await.unwrap();
        let b = repo.create("Elbow", 2, Money::zero()).await.unwrap();

        repo.delete(&a.id).await.unwrap();
        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b.id);

        // Deleting a missing id is a no-op.
        repo.delete(&a.id).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (_dir, repo) = repo().await;
        repo.create("Pipe 2in", 1, Money::zero()).await.unwrap();
        repo.create("Copper Pipe", 1, Money::zero()).await.unwrap();
        repo.create("Ball Valve", 1, Money::zero()).await.unwrap();

        let hits = repo.search("PIPE").await.unwrap();
        assert_eq!(hits.len(), 2);

        let all = repo.search("").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_name_first_match_wins() {
        let (_dir, repo) = repo().await;
        let first = repo.create("Pipe", 3, Money::zero()).await.unwrap();
        repo.create("Pipe", 9, Money::zero()).await.unwrap();

        let found = repo.find_by_name("Pipe").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.quantity, 3);
    }
}
