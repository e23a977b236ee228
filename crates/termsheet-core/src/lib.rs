pub mod confidence;
pub mod parser;
pub mod record;
pub mod validate;

pub use confidence::confidence;
pub use parser::extract_fields;
pub use record::{Severity, StorePayload, TermSheetRecord, ValidationIssue};
pub use validate::validate;
