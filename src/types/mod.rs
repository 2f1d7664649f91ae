//! Shared response types.

mod response;

pub use response::{ApiResponse, LoginResponse, NoContent};
