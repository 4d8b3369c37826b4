use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use std::collections::{BTreeSet, HashMap};

use crate::{
    entity::{categoria, producto, proveedor},
    error::ProductResult,
    models::{Category, NewProduct, Product, ProductFilter, ProductSort, Supplier},
    repository::ProductRepository,
};

/// PostgreSQL store backed by the `productos` table.
///
/// Relations are resolved with one `IN (...)` lookup per reference table
/// instead of a join.
pub struct PgProductRepository {
    base: BaseRepository<producto::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn load_relations(&self, mut products: Vec<Product>) -> ProductResult<Vec<Product>> {
        if products.is_empty() {
            return Ok(products);
        }

        let category_ids: BTreeSet<i32> = products.iter().map(|p| p.category_id).collect();
        let supplier_ids: BTreeSet<i32> = products.iter().map(|p| p.supplier_id).collect();

        let categories: HashMap<i32, Category> = categoria::Entity::find()
            .filter(categoria::Column::Id.is_in(category_ids))
            .all(self.base.db())
            .await?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let suppliers: HashMap<i32, Supplier> = proveedor::Entity::find()
            .filter(proveedor::Column::Id.is_in(supplier_ids))
            .all(self.base.db())
            .await?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        for product in &mut products {
            product.category = categories.get(&product.category_id).cloned();
            product.supplier = suppliers.get(&product.supplier_id).cloned();
        }

        Ok(products)
    }
}

/// `SELECT` for a filtered, ordered listing
fn listing_query(filter: &ProductFilter, sort: ProductSort) -> Select<producto::Entity> {
    let mut query = producto::Entity::find();

    if let Some(fragment) = filter.name_contains.as_deref().filter(|f| !f.is_empty()) {
        let pattern = format!("%{}%", escape_like(fragment));
        query = query.filter(producto::Column::Nombre.like(LikeExpr::new(pattern).escape('\\')));
    }

    if let Some(category_id) = filter.category_id {
        query = query.filter(producto::Column::CategoriaId.eq(category_id));
    }

    if let Some(supplier_id) = filter.supplier_id {
        query = query.filter(producto::Column::ProveedorId.eq(supplier_id));
    }

    match sort {
        ProductSort::Id => query.order_by_asc(producto::Column::Id),
        ProductSort::PriceAsc => query
            .order_by_asc(producto::Column::Precio)
            .order_by_asc(producto::Column::Id),
    }
}

// LIKE wildcards in user input match literally
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: NewProduct) -> ProductResult<i32> {
        let model = self.base.insert(product.into()).await?;

        tracing::info!(producto_id = model.id, "Inserted producto");
        Ok(model.id)
    }

    async fn replace_by_id(&self, id: i32, product: NewProduct) -> ProductResult<u64> {
        let values: producto::ActiveModel = product.into();

        let result = producto::Entity::update_many()
            .set(values)
            .filter(producto::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(producto_id = id, "Replaced producto");
        }
        Ok(result.rows_affected)
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let rows_affected = self.base.delete_by_id(id).await?;
        if rows_affected == 0 {
            return Ok(None);
        }

        tracing::info!(producto_id = id, "Deleted producto");
        Ok(Some(model.into()))
    }

    async fn find_by_id(&self, id: i32, with_relations: bool) -> ProductResult<Option<Product>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let product: Product = model.into();
        if !with_relations {
            return Ok(Some(product));
        }

        Ok(self.load_relations(vec![product]).await?.pop())
    }

    async fn find_all(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        with_relations: bool,
    ) -> ProductResult<Vec<Product>> {
        let products: Vec<Product> = listing_query(&filter, sort)
            .all(self.base.db())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        if with_relations {
            self.load_relations(products).await
        } else {
            Ok(products)
        }
    }
}
