//! compliance-gateway
//!
//! axum HTTP surface over `compliance_rag::Copilot`: `POST /ask` and
//! `GET /health`.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, serve, AppState};
