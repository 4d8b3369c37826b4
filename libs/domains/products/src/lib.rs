//! Productos domain
//!
//! ```text
//! handlers   HTTP endpoints under /api/productos
//!    │
//! service    id consistency and existence checks
//!    │
//! repository ProductRepository trait, in-memory store
//!    │
//! postgres   sea-orm store over the productos table
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{PgProductRepository, ProductService, handlers};
//!
//! let repository = PgProductRepository::new(db.clone());
//! let router = handlers::router(ProductService::new(repository));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, NewProduct, Product, ProductFilter, ProductInput, ProductSort, SearchQuery,
    Supplier,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
