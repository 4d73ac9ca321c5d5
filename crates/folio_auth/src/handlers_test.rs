#[cfg(test)]
mod tests {
    use crate::middleware::AuthState;
    use crate::routes::routes;
    use crate::session::{issue_id_token, JwtIdentityProvider};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::Duration;
    use folio_config::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ID_SECRET: &str = "id-token-secret";

    fn app() -> Router {
        let config = AppConfig::local("session-secret", ID_SECRET);
        let identity = Arc::new(JwtIdentityProvider::from_config(&config.session));
        routes(Arc::new(AuthState::from_config(&config.session, identity)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn sign_in_sets_http_only_cookie() {
        let id_token =
            issue_id_token(ID_SECRET, "owner", None, true, Duration::minutes(5)).unwrap();
        let body = serde_json::json!({ "idToken": id_token }).to_string();

        let response = app()
            .oneshot(post_json("/auth/session", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("__session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Max-Age=432000"));
    }

    #[tokio::test]
    async fn bad_id_token_is_unauthorized() {
        let body = serde_json::json!({ "idToken": "nope" }).to_string();
        let response = app()
            .oneshot(post_json("/auth/session", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = app()
            .oneshot(post_json("/auth/session", "{\"token\": 1}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn logout_expires_cookie() {
        let response = app()
            .oneshot(post_json("/auth/logout", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("__session=;") || set_cookie.starts_with("__session=\"\""));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
