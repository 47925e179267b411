// src/news/providers/mod.rs
pub mod news_api;

pub use news_api::NewsApiProvider;
