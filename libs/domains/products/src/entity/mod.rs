//! SeaORM entities for the `productos` table and the two reference tables it points at.

pub mod categoria;
pub mod producto;
pub mod proveedor;
