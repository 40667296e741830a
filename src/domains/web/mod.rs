//! Web domain module.
//!
//! The server-rendered HTML surface: inventory list and search, tool forms,
//! quantity controls, and the login/register session flows. Rendering lives
//! in `pages.rs`; the axum handlers in `routes.rs`.

pub mod pages;
pub mod routes;
