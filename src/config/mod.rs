// src/config/mod.rs
pub mod credentials;
pub mod tracker;

pub use credentials::{Credentials, Endpoints, KeyStatus};
pub use tracker::TrackerConfig;
