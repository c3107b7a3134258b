mod fetch_error;
mod service;

pub use fetch_error::FetchError;
pub use service::{FetchParams, PagedResult, PropertyClient};
