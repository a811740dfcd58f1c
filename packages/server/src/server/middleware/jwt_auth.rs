use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::domains::accounts::AccountError;

/// Raw bearer token taken from the `Authorization` header.
///
/// Extraction only checks that a token is present; verification happens in
/// `AccountService`, which rejects anything it cannot verify.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match extract_bearer_token(&parts.headers) {
            Some(token) => Ok(BearerToken(token)),
            None => {
                tracing::debug!("No authentication token");
                Err(AccountError::Unauthorized)
            }
        }
    }
}

/// Extract the token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let headers = headers_with("abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_no_auth_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_empty_bearer() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with("")), None);
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_header() {
        let request = axum::http::Request::builder()
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = BearerToken::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AccountError::Unauthorized)));
    }
}
