pub mod auth;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod policies;

pub use client::{ApiClient, ApiResponse, RequestOptions};
pub use endpoints::Resource;
