//! Health Routes
//!
//! - GET / - Liveness check used by the datasource "Test connection" button

use axum::http::header;
use axum::response::IntoResponse;
use chrono::{SecondsFormat, Utc};

/// GET /
///
/// Returns `200` with `"<now>: OK"` as plain text.
pub async fn liveness() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{}: OK", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_liveness() {
        let response = liveness().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.ends_with(": OK"));
    }
}
