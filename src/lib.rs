//! # Etikett Backend Library
//!
//! Etikett is a small tag registration service: it creates tag records keyed
//! by a MAC address, assigns each a UUID at creation, and allows a single JPG
//! image to be attached to a tag afterwards via a REST API.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: Modern web framework for HTTP server and routing
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Layered application configuration (defaults, file, env)
//! - [`db`]: Connection setup with bounded startup retry and schema init
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`metrics`]: Operational counters exposed via the API
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: Shared application state passed to handlers
//! - [`types`]: Request/response data transfer objects
//! - [`uploads`]: Image upload validation and filesystem storage

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod types;
pub mod uploads;

#[cfg(test)]
mod tests;
