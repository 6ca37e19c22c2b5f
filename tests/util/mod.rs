//! Helpers for inspecting handler responses.

use axum::{body::to_bytes, response::Response};
use serde::de::DeserializeOwned;

/// Reads a JSON response body.
///
/// # Panics
/// Panics if the body cannot be read or is not valid JSON for `T`
pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Reads a raw response body.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable")
        .to_vec()
}
