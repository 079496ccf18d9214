//! Time-boxed response cache keyed by request URI, using moka

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use moka::future::Cache;
use std::time::Duration;

use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

/// Finished responses, replayed verbatim until their TTL runs out
#[derive(Clone)]
pub struct ResponseCache {
    entries: Cache<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        self.entries.get(key).await
    }

    pub async fn insert(&self, key: String, response: CachedResponse) {
        self.entries.insert(key, response).await;
    }
}

/// Middleware answering repeated GETs from the cache.
///
/// The key is the request URI including its query string. Server errors are
/// passed through without being stored.
pub async fn cache_responses(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request.uri().to_string();
    if let Some(hit) = cache.get(&key).await {
        tracing::debug!("Cache hit for {}", key);
        return hit.into_response();
    }

    let response = next.run(request).await;
    if response.status().is_server_error() {
        return response;
    }

    // Only a broken body stream fails here; the response is already lost then.
    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(e) => {
            return ApiError::Internal(format!("Failed to buffer response: {}", e)).into_response()
        }
    };

    cache
        .insert(
            key,
            CachedResponse {
                status: parts.status,
                content_type: parts.headers.get(CONTENT_TYPE).cloned(),
                body: body.clone(),
            },
        )
        .await;

    Response::from_parts(parts, Body::from(body))
}
