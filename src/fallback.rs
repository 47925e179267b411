// src/fallback.rs
//! Ordered fallback chains: try candidates in sequence, stop at the first hit.

use std::future::Future;

/// Run `attempt` over `candidates` strictly in order, awaiting each before the
/// next starts. Returns the first `Some`, or `None` when every candidate missed.
pub async fn first_success<I, F, Fut, T>(candidates: I, mut attempt: F) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for candidate in candidates {
        if let Some(hit) = attempt(candidate).await {
            return Some(hit);
        }
    }
    None
}
