use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, NewProduct, Product, ProductFilter, ProductSort, Supplier};

/// Data access for the `productos` table.
///
/// Each call is a single store round trip, plus the category and supplier
/// lookups when `with_relations` is set. Nothing here retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert and return the store-assigned id
    async fn insert(&self, product: NewProduct) -> ProductResult<i32>;

    /// Overwrite every column of row `id`; returns the affected row count
    async fn replace_by_id(&self, id: i32, product: NewProduct) -> ProductResult<u64>;

    /// Remove row `id`, returning what was removed
    async fn delete_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    async fn find_by_id(&self, id: i32, with_relations: bool) -> ProductResult<Option<Product>>;

    async fn find_all(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        with_relations: bool,
    ) -> ProductResult<Vec<Product>>;
}

#[derive(Debug, Default)]
struct Rows {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

#[derive(Debug, Default)]
struct ReferenceData {
    categories: BTreeMap<i32, Category>,
    suppliers: BTreeMap<i32, Supplier>,
}

/// In-memory store for development and tests.
///
/// Ids come from a counter and are never reused. Blank names are rejected like
/// the table's CHECK constraint. Foreign keys are only enforced, and relations
/// only loaded, when reference data was supplied.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    rows: Arc<RwLock<Rows>>,
    references: Option<Arc<ReferenceData>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_data(categories: Vec<Category>, suppliers: Vec<Supplier>) -> Self {
        let references = ReferenceData {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            suppliers: suppliers.into_iter().map(|s| (s.id, s)).collect(),
        };

        Self {
            rows: Arc::default(),
            references: Some(Arc::new(references)),
        }
    }

    fn check_constraints(&self, product: &NewProduct) -> ProductResult<()> {
        if product.name.is_empty() {
            return Err(ProductError::Validation("nombre must not be empty".to_string()));
        }

        if let Some(refs) = &self.references {
            if !refs.categories.contains_key(&product.category_id) {
                return Err(ProductError::Validation(format!(
                    "categoria {} does not exist",
                    product.category_id
                )));
            }
            if !refs.suppliers.contains_key(&product.supplier_id) {
                return Err(ProductError::Validation(format!(
                    "proveedor {} does not exist",
                    product.supplier_id
                )));
            }
        }

        Ok(())
    }

    fn attach_relations(&self, mut product: Product) -> Product {
        if let Some(refs) = &self.references {
            product.category = refs.categories.get(&product.category_id).cloned();
            product.supplier = refs.suppliers.get(&product.supplier_id).cloned();
        }
        product
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> ProductResult<i32> {
        self.check_constraints(&product)?;

        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.products.insert(id, Product::from_new(id, product));

        tracing::info!(producto_id = id, "Inserted producto");
        Ok(id)
    }

    async fn replace_by_id(&self, id: i32, product: NewProduct) -> ProductResult<u64> {
        let mut rows = self.rows.write().await;
        // An UPDATE matching no row never reaches the constraints
        let Some(existing) = rows.products.get_mut(&id) else {
            return Ok(0);
        };

        self.check_constraints(&product)?;
        *existing = Product::from_new(id, product);
        tracing::info!(producto_id = id, "Replaced producto");
        Ok(1)
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let removed = self.rows.write().await.products.remove(&id);
        if removed.is_some() {
            tracing::info!(producto_id = id, "Deleted producto");
        }
        Ok(removed)
    }

    async fn find_by_id(&self, id: i32, with_relations: bool) -> ProductResult<Option<Product>> {
        let rows = self.rows.read().await;
        Ok(rows.products.get(&id).cloned().map(|p| {
            if with_relations {
                self.attach_relations(p)
            } else {
                p
            }
        }))
    }

    async fn find_all(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        with_relations: bool,
    ) -> ProductResult<Vec<Product>> {
        let rows = self.rows.read().await;

        // BTreeMap iteration is already in id order
        let mut result: Vec<Product> = rows
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        if sort == ProductSort::PriceAsc {
            result.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));
        }

        if with_relations {
            result = result
                .into_iter()
                .map(|p| self.attach_relations(p))
                .collect();
        }

        Ok(result)
    }
}
