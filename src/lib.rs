// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod fallback;
pub mod history;
pub mod metrics;
pub mod news;
pub mod pricing;
pub mod report;
pub mod tariffs;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::dashboard::Dashboard;
