//! Catalog repository contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{AssetId, CategoryId, ProductId};
use domain::{Category, ImageAsset, Product};
use specification::Specification;

use crate::error::RepositoryError;

/// Query and persistence operations over the catalog store.
///
/// Writes are staged into the ambient unit of work; nothing is durable
/// until [`UnitOfWork::commit`](crate::services::UnitOfWork::commit).
/// The unused-asset grace-window policy is owned here, not by the
/// reconciliation job.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Finds the single category satisfying the specification, if any.
    async fn find_category(
        &self,
        spec: &dyn Specification<Category>,
    ) -> Result<Option<Category>, RepositoryError>;

    /// Stages an asset record for insertion.
    async fn create_asset(&self, asset: &ImageAsset) -> Result<(), RepositoryError>;

    /// Stages a product aggregate for insertion.
    async fn create_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Returns the asset records considered unused: no longer referenced
    /// by any live aggregate, or explicitly marked for deletion and past
    /// the repository's grace window.
    async fn list_unreferenced_assets(&self) -> Result<Vec<ImageAsset>, RepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryRepositoryState {
    categories: HashMap<CategoryId, Category>,
    assets: HashMap<AssetId, ImageAsset>,
    products: HashMap<ProductId, Product>,
    fail_on_find_category: bool,
    fail_on_create_asset: bool,
    fail_on_create_product: bool,
    fail_on_list: bool,
}

/// In-memory catalog repository for testing.
///
/// `find_category` evaluates the specification's compiled filter form,
/// the way a store-side translator would, rather than calling
/// `is_satisfied_by`, so the saga tests exercise both representations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<InMemoryRepositoryState>>,
}

impl InMemoryCatalogRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a category.
    pub fn add_category(&self, category: Category) {
        self.state
            .write()
            .unwrap()
            .categories
            .insert(category.id(), category);
    }

    /// Seeds an asset record directly (bypassing the saga), for
    /// reconciliation tests.
    pub fn add_asset(&self, asset: ImageAsset) {
        self.state.write().unwrap().assets.insert(asset.id(), asset);
    }

    /// Configures the next find_category call to fail.
    pub fn set_fail_on_find_category(&self, fail: bool) {
        self.state.write().unwrap().fail_on_find_category = fail;
    }

    /// Configures create_asset calls to fail.
    pub fn set_fail_on_create_asset(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_asset = fail;
    }

    /// Configures create_product calls to fail.
    pub fn set_fail_on_create_product(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_product = fail;
    }

    /// Configures list_unreferenced_assets calls to fail.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }

    /// Returns the number of staged asset records.
    pub fn asset_count(&self) -> usize {
        self.state.read().unwrap().assets.len()
    }

    /// Returns the number of staged product aggregates.
    pub fn product_count(&self) -> usize {
        self.state.read().unwrap().products.len()
    }

    /// Returns a staged product by id.
    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.state.read().unwrap().products.get(&id).cloned()
    }

    /// Returns a staged asset by id.
    pub fn get_asset(&self, id: AssetId) -> Option<ImageAsset> {
        self.state.read().unwrap().assets.get(&id).cloned()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn find_category(
        &self,
        spec: &dyn Specification<Category>,
    ) -> Result<Option<Category>, RepositoryError> {
        let state = self.state.read().unwrap();
        if state.fail_on_find_category {
            return Err(RepositoryError::Backend("category lookup failed".to_string()));
        }

        let filter = spec.to_filter();
        Ok(state
            .categories
            .values()
            .find(|category| filter.evaluate(*category))
            .cloned())
    }

    async fn create_asset(&self, asset: &ImageAsset) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_create_asset {
            return Err(RepositoryError::Backend("asset insert failed".to_string()));
        }
        state.assets.insert(asset.id(), asset.clone());
        Ok(())
    }

    async fn create_product(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_create_product {
            return Err(RepositoryError::Backend("product insert failed".to_string()));
        }
        state.products.insert(product.id(), product.clone());
        Ok(())
    }

    async fn list_unreferenced_assets(&self) -> Result<Vec<ImageAsset>, RepositoryError> {
        let state = self.state.read().unwrap();
        if state.fail_on_list {
            return Err(RepositoryError::Backend("asset listing failed".to_string()));
        }

        let mut unused: Vec<ImageAsset> = state
            .assets
            .values()
            .filter(|asset| {
                asset.is_marked_for_deletion()
                    || !state
                        .products
                        .values()
                        .any(|product| product.asset_id() == Some(asset.id()))
            })
            .cloned()
            .collect();
        unused.sort_by_key(|asset| asset.id().as_uuid());
        Ok(unused)
    }
}
