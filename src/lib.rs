//! vidmeta - a small video metadata service
//!
//! Records are validated field by field, stored in memory and served over
//! an HTTP JSON API.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod videos;
