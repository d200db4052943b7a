//! Builder utilities for item operation requests and responses
//!
//! - [`request`] - Constructors for request events
//! - [`response`] - JSON responses with the fixed header set

pub mod request;
pub mod response;

pub use response::response_headers;
