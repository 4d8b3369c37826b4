use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product category, owned by the categories resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Product supplier, owned by the suppliers resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A stored product.
///
/// `category` and `supplier` are only filled by the operations that load
/// relations and serialize as `null` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    #[schema(value_type = f64, example = 10.5)]
    pub price: Decimal,
    #[serde(rename = "categoriaId")]
    pub category_id: i32,
    #[serde(rename = "categoria")]
    pub category: Option<Category>,
    #[serde(rename = "proveedorId")]
    pub supplier_id: i32,
    #[serde(rename = "proveedor")]
    pub supplier: Option<Supplier>,
}

impl Product {
    pub fn from_new(id: i32, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category_id: input.category_id,
            category: None,
            supplier_id: input.supplier_id,
            supplier: None,
        }
    }

    /// Same record without the loaded relations
    pub fn without_relations(mut self) -> Self {
        self.category = None;
        self.supplier = None;
        self
    }
}

/// Request body for create and update.
///
/// Create ignores `id`; update requires it to equal the path id. A missing id
/// reads as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "nombre is required"))]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    #[schema(value_type = f64, example = 10.5)]
    pub price: Decimal,
    #[serde(rename = "categoriaId")]
    pub category_id: i32,
    #[serde(rename = "proveedorId")]
    pub supplier_id: i32,
}

impl ProductInput {
    /// Drop the client supplied id
    pub fn into_new(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
        }
    }
}

/// Column values written by insert and replace; the store owns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub supplier_id: i32,
}

/// Conjunctive listing filter; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-sensitive substring of the name
    pub name_contains: Option<String>,
    pub category_id: Option<i32>,
    pub supplier_id: Option<i32>,
}

impl ProductFilter {
    pub fn name_contains(fragment: impl Into<String>) -> Self {
        Self {
            name_contains: Some(fragment.into()),
            ..Self::default()
        }
    }

    pub fn category(category_id: i32) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn supplier(supplier_id: i32) -> Self {
        Self {
            supplier_id: Some(supplier_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.name_contains
            .as_deref()
            .is_none_or(|fragment| product.name.contains(fragment))
            && self.category_id.is_none_or(|id| product.category_id == id)
            && self.supplier_id.is_none_or(|id| product.supplier_id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Id,
    /// Ascending price, ties by id
    PriceAsc,
}

/// Query string of `GET /buscar`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in the product name; empty or absent returns every product
    pub nombre: Option<String>,
}
