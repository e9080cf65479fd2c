//! REST API module
//!
//! This module provides the HTTP server and REST API endpoints including:
//! - API routing and request handling
//! - Authentication middleware wiring
//! - Error handling and response formatting

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
