//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the
//! application, including error handling, configuration, the database
//! connection, and HTTP server assembly.

pub mod config;
pub mod database;
pub mod error;
pub mod server;

pub use config::Config;
pub use database::Database;
pub use error::{Error, Result};
pub use server::{AppState, build_router, serve};
