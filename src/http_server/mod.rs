//! # vidmeta HTTP Server Module
//!
//! Axum server exposing the video API.
//!
//! # Endpoints
//!
//! - `/` - Plain-text banner
//! - `/health` - Health check
//! - `/videos` - List and create
//! - `/videos/:id` - Get, update, delete
//! - `/testing/all-data` - Clear the store (test support)

pub mod config;
pub mod observability_routes;
pub mod server;
pub mod video_routes;

pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
pub use video_routes::VideoState;
