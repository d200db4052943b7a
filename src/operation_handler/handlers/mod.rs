//! Item operation handlers
//!
//! One module per operation. Each handler validates its input, performs at
//! most two table calls and returns a response or an [`ItemError`](crate::ItemError).

pub mod create;
pub mod delete;
pub mod read;
pub mod update;
