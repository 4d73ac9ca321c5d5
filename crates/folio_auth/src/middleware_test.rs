#[cfg(test)]
mod tests {
    use crate::middleware::{require_admin_api, require_admin_page, AuthState};
    use crate::session::{issue_id_token, Claims, IdentityProvider, JwtIdentityProvider};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use chrono::Duration;
    use folio_config::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SESSION_SECRET: &str = "session-secret";
    const ID_SECRET: &str = "id-token-secret";

    fn state() -> Arc<AuthState> {
        let config = AppConfig::local(SESSION_SECRET, ID_SECRET);
        let identity = Arc::new(JwtIdentityProvider::from_config(&config.session));
        Arc::new(AuthState::from_config(&config.session, identity))
    }

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.sub
    }

    fn app() -> Router {
        let state = state();
        let pages = Router::new()
            .route("/admin", get(whoami))
            .layer(middleware::from_fn_with_state(state.clone(), require_admin_page));
        let api = Router::new()
            .route("/api/admin/ping", get(whoami))
            .layer(middleware::from_fn_with_state(state, require_admin_api));
        pages.merge(api)
    }

    async fn session_cookie(admin: bool) -> String {
        let provider = JwtIdentityProvider::new(SESSION_SECRET, ID_SECRET, 600);
        let id_token =
            issue_id_token(ID_SECRET, "owner", None, admin, Duration::minutes(5)).unwrap();
        let value = provider.create_session_cookie(&id_token).await.unwrap();
        format!("__session={}", value)
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn page_without_cookie_redirects_to_login() {
        let response = app()
            .oneshot(get_with_cookie("/admin", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }

    #[tokio::test]
    async fn api_without_cookie_is_unauthorized_json() {
        let response = app()
            .oneshot(get_with_cookie("/api/admin/ping", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn non_admin_session_is_rejected() {
        let cookie = session_cookie(false).await;

        let page = app()
            .oneshot(get_with_cookie("/admin", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::SEE_OTHER);

        let api = app()
            .oneshot(get_with_cookie("/api/admin/ping", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn tampered_cookie_is_rejected() {
        let mut cookie = session_cookie(true).await;
        cookie.push('x');

        let response = app()
            .oneshot(get_with_cookie("/api/admin/ping", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_session_passes_claims_through() {
        let cookie = session_cookie(true).await;

        let page = app()
            .oneshot(get_with_cookie("/admin", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::OK);
        assert_eq!(body_string(page).await, "owner");

        let api = app()
            .oneshot(get_with_cookie("/api/admin/ping", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(api.status(), StatusCode::OK);
    }
}
