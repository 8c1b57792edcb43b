//! HTTP REST API interfaces
//!
//! - `common`: Response envelope, error mapping, extractors, wire helpers
//! - `modules`: Handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
