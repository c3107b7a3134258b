pub mod adapter;
pub mod format;
pub mod schema;
pub mod types;

pub use adapter::{to_property_summary, AdapterError};
pub use schema::{validate, PropertyCandidate, ValidationError};
