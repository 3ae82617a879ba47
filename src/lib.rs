//! logsift: a small structured-log service with a key/value search page.
//!
//! Logs arrive as newline-delimited JSON on `POST /api/logs`, are appended
//! to a journal file and held in memory, and are queried through
//! `POST /api/search`. The page at `/` drives searches with a form whose
//! filter and search rows live in a per-browser session.

pub mod api;
pub mod config;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;
pub mod utils;

pub use routes::build_app;
