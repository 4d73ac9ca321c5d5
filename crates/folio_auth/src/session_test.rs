#[cfg(test)]
mod tests {
    use crate::error::AuthError;
    use crate::session::{issue_id_token, IdentityProvider, JwtIdentityProvider};
    use chrono::Duration;

    const SESSION_SECRET: &str = "session-secret";
    const ID_SECRET: &str = "id-token-secret";

    fn provider() -> JwtIdentityProvider {
        JwtIdentityProvider::new(SESSION_SECRET, ID_SECRET, 3600)
    }

    #[tokio::test]
    async fn id_token_becomes_verifiable_session() {
        let id_token =
            issue_id_token(ID_SECRET, "owner", Some("owner@example.com"), true, Duration::minutes(5))
                .unwrap();

        let cookie = provider().create_session_cookie(&id_token).await.unwrap();
        let claims = provider().verify_session_cookie(&cookie).await.unwrap();

        assert_eq!(claims.sub, "owner");
        assert_eq!(claims.email.as_deref(), Some("owner@example.com"));
        assert!(claims.admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn id_token_signed_with_other_secret_is_rejected() {
        let id_token = issue_id_token("not-the-secret", "owner", None, true, Duration::minutes(5))
            .unwrap();
        let result = provider().create_session_cookie(&id_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn id_token_is_not_a_session_cookie() {
        // ID tokens use a different key, so they cannot be replayed as sessions
        let id_token =
            issue_id_token(ID_SECRET, "owner", None, true, Duration::minutes(5)).unwrap();
        assert!(provider().verify_session_cookie(&id_token).await.is_err());
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let short_lived = JwtIdentityProvider::new(SESSION_SECRET, ID_SECRET, -120);
        let id_token =
            issue_id_token(ID_SECRET, "owner", None, true, Duration::minutes(5)).unwrap();
        let cookie = short_lived.create_session_cookie(&id_token).await.unwrap();

        let result = provider().verify_session_cookie(&cookie).await;
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let result = provider().verify_session_cookie("not.a.jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
