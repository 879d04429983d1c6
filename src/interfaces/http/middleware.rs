//! Request identity middleware for Axum
//!
//! Upstream terminates authentication and forwards the caller id in
//! the `X-User-Id` header. This middleware extracts it into an
//! `Identity` request extension for handlers; requests without the
//! header are rejected with 401.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Header carrying the authenticated caller id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Caller identity attached to every authenticated request
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: String,
}

/// Identity extraction middleware
pub async fn identity_middleware(mut request: Request<Body>, next: Next) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);

    let Some(user_id) = user_id else {
        let body = Json(json!({
            "success": false,
            "error": "Missing X-User-Id header"
        }));
        return (StatusCode::UNAUTHORIZED, body).into_response();
    };

    request.extensions_mut().insert(Identity { user_id });
    next.run(request).await
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};

    async fn whoami(Extension(identity): Extension<Identity>) -> String {
        identity.user_id
    }

    fn app() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(identity_middleware))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let req = Request::builder().uri("/whoami").body(Body::empty()).unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_header_is_unauthorized() {
        let req = Request::builder()
            .uri("/whoami")
            .header(USER_ID_HEADER, "   ")
            .body(Body::empty())
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn header_value_reaches_the_handler() {
        let req = Request::builder()
            .uri("/whoami")
            .header(USER_ID_HEADER, "user-7")
            .body(Body::empty())
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"user-7");
    }
}
