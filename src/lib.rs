//! Tool Inventory Library
//!
//! This crate provides a small multi-tenant tool-inventory web application:
//! authenticated users create, list, search, update, and delete tool records
//! scoped to their own account, via a JSON API and server-rendered HTML
//! forms.
//!
//! # Architecture
//!
//! The application is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the database connection, and HTTP server assembly
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the record store - owner-scoped CRUD and fuzzy search
//!   - **users**: accounts and database-backed session tokens
//!   - **web**: the server-rendered HTML surface
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_inventory::{AppState, Config, Database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let db = Database::connect(&config.database.url).await?;
//!     let state = AppState::new(&db, config);
//!     tool_inventory::core::serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AppState, Config, Database, Error, Result};
