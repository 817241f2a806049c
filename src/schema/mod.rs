pub mod store;
pub mod types;

pub use store::{load_schema, template_header, DEFAULT_SCHEMA};
pub use types::UploadSchema;
