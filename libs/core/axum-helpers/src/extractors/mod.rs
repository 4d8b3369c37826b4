//! Extractors that turn bad input into an [`crate::AppError`] response.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
