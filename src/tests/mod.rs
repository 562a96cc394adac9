//! Integration and unit tests for the Etikett application.
//!
//! - **config_tests**: Configuration loading and validation
//! - **db_tests**: Schema init and table constraints
//! - **error_tests**: Error-to-response mapping
//! - **health_api_tests**: Health, readiness, metrics and version endpoints
//! - **tags_api_tests**: Tag registration and image attachment end to end
//! - **uploads_tests**: Upload validation and filesystem storage

pub mod db_tests;
pub mod health_api_tests;
