//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput, ProductSort};
use crate::repository::ProductRepository;

/// Product operations over a [`ProductRepository`].
///
/// Request validation happens in the HTTP extractor and the store enforces its
/// own constraints, so the service only checks id consistency and existence.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every product in id order, with category and supplier
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ProductResult<Vec<Product>> {
        self.repository
            .find_all(ProductFilter::default(), ProductSort::Id, true)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id, true)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Insert `input` under a store-assigned id and return it as [`Self::get_by_id`] sees it
    #[instrument(skip(self, input), fields(nombre = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let id = self.repository.insert(input.into_new()).await?;
        self.get_by_id(id).await
    }

    /// Full replacement of row `id`.
    ///
    /// A missing row is not an error: nothing is written and a warning is logged.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: ProductInput) -> ProductResult<()> {
        if input.id != id {
            return Err(ProductError::IdMismatch {
                path: id,
                body: input.id,
            });
        }

        let affected = self.repository.replace_by_id(id, input.into_new()).await?;
        if affected == 0 {
            tracing::warn!(producto_id = id, "Update matched no producto");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<()> {
        if self.repository.find_by_id(id, false).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository
            .delete_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_sorted_by_price(&self) -> ProductResult<Vec<Product>> {
        self.repository
            .find_all(ProductFilter::default(), ProductSort::PriceAsc, false)
            .await
    }

    /// Case-sensitive substring match on the name; empty or absent matches everything
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, fragment: Option<&str>) -> ProductResult<Vec<Product>> {
        let filter = match fragment {
            Some(f) if !f.is_empty() => ProductFilter::name_contains(f),
            _ => ProductFilter::default(),
        };

        self.repository
            .find_all(filter, ProductSort::Id, false)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        self.repository
            .find_all(ProductFilter::category(category_id), ProductSort::Id, false)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_supplier(&self, supplier_id: i32) -> ProductResult<Vec<Product>> {
        self.repository
            .find_all(ProductFilter::supplier(supplier_id), ProductSort::Id, false)
            .await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
