//! Uniicon HTTP API
//!
//! Exposes the icon generation pipeline, NFT publishing and health reporting
//! over axum. The binary in `main.rs` is a thin wrapper around
//! [`setup::initialize_app`] and [`setup::server::start_server`].

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;
