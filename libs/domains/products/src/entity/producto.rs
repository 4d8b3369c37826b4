use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descripcion: Option<String>,
    #[sea_orm(column_type = "Decimal(None)")]
    pub precio: Decimal,
    pub categoria_id: i32,
    pub proveedor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categoria::Entity",
        from = "Column::CategoriaId",
        to = "super::categoria::Column::Id"
    )]
    Categoria,
    #[sea_orm(
        belongs_to = "super::proveedor::Entity",
        from = "Column::ProveedorId",
        to = "super::proveedor::Column::Id"
    )]
    Proveedor,
}

impl Related<super::categoria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::proveedor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proveedor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.nombre,
            description: model.descripcion,
            price: model.precio,
            category_id: model.categoria_id,
            category: None,
            supplier_id: model.proveedor_id,
            supplier: None,
        }
    }
}

/// Insert form: the id column stays `NotSet` so the sequence assigns it
impl From<NewProduct> for ActiveModel {
    fn from(input: NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            nombre: Set(input.name),
            descripcion: Set(input.description),
            precio: Set(input.price),
            categoria_id: Set(input.category_id),
            proveedor_id: Set(input.supplier_id),
        }
    }
}
