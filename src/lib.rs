pub mod form;
pub mod parse;
pub mod preview;
pub mod schema;
pub mod session;
pub mod validate;

pub use parse::{parse_text, ParsedTable};
pub use preview::{Preview, PREVIEW_ROW_CAP};
pub use schema::{load_schema, UploadSchema, DEFAULT_SCHEMA};
pub use session::{Phase, ReadError, Session, MAX_UPLOAD_BYTES};
pub use validate::{validate, Stats, ValidationResult};
