//! Cookie-based JWT authentication.
//!
//! `POST /jwt` signs whatever identity payload the caller supplies and
//! places it in an HTTP-only cookie; there is no password exchange. Every
//! protected handler pulls the verified identity back out through the
//! [`AuthUser`] extractor and then runs the ownership guard against the
//! request's owner descriptor.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Cookie name for the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Claims carried by a session token.
///
/// `email` is the only claim the backend acts on; the rest of the
/// caller-supplied identity payload rides along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Claims {
    /// Build claims for an identity, expiring `ttl_secs` from now.
    pub fn new(email: impl Into<String>, extra: HashMap<String, Value>, ttl_secs: u64) -> Self {
        let now = Utc::now().timestamp() as u64;
        Self {
            email: email.into(),
            iat: now,
            exp: now + ttl_secs,
            extra,
        }
    }
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            ttl_secs,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    /// Token lifetime in seconds, shared with the cookie's Max-Age.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Sign claims into a token.
    pub fn issue(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Verify a token's signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Build the Set-Cookie value for a freshly issued token.
///
/// Production deployments serve the frontend from another origin over
/// HTTPS, so the cookie must be Secure with SameSite=None; everywhere else
/// a strict same-site, non-secure cookie is used.
pub fn session_cookie(token: &str, config: &ApiConfig) -> String {
    if config.is_production() {
        format!(
            "{}={}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={}",
            TOKEN_COOKIE, token, config.token_ttl_secs
        )
    } else {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
            TOKEN_COOKIE, token, config.token_ttl_secs
        )
    }
}

/// Build the Set-Cookie value that clears the session cookie.
/// Attributes must match the issuing cookie or browsers keep the old one.
pub fn clear_session_cookie(config: &ApiConfig) -> String {
    if config.is_production() {
        format!(
            "{}=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0",
            TOKEN_COOKIE
        )
    } else {
        format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", TOKEN_COOKIE)
    }
}

/// Verified identity of the calling user.
///
/// Extraction fails with 401 when the token cookie is missing or does not
/// verify; handlers that take an `AuthUser` are auth-required by
/// construction.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("not authorized"))?;

        let claims = app.tokens.verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::unauthorized("unauthorized")
        })?;

        Ok(Self {
            email: claims.email.clone(),
            claims,
        })
    }
}

/// Ownership guard shared by every identity-scoped handler.
///
/// Compares the verified identity against the request's owner descriptor
/// (path email or `?email=` query). Runs after authentication and before
/// any store call; a mismatch rejects regardless of database state.
pub fn ensure_owner(user: &AuthUser, owner: &str) -> Result<(), ApiError> {
    if user.email != owner {
        return Err(ApiError::forbidden("forbidden"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_config() -> ApiConfig {
        ApiConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        }
    }

    fn prod_config() -> ApiConfig {
        ApiConfig {
            jwt_secret: "test-secret".to_string(),
            environment: "production".to_string(),
            ..Default::default()
        }
    }

    fn user(email: &str) -> AuthUser {
        let claims = Claims::new(email, HashMap::new(), 3600);
        AuthUser {
            email: email.to_string(),
            claims,
        }
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let tokens = TokenService::new("test-secret", 3600);
        let claims = Claims::new("a@x.com", HashMap::new(), 3600);

        let token = tokens.issue(&claims).unwrap();
        let verified = tokens.verify(&token).unwrap();

        assert_eq!(verified.email, "a@x.com");
        assert_eq!(verified.exp, claims.exp);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenService::new("secret-a", 3600);
        let verifier = TokenService::new("secret-b", 3600);

        let token = issuer
            .issue(&Claims::new("a@x.com", HashMap::new(), 3600))
            .unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let tokens = TokenService::new("test-secret", 3600);
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            extra: HashMap::new(),
        };

        let token = tokens.issue(&claims).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_extra_claims_survive_round_trip() {
        let tokens = TokenService::new("test-secret", 3600);
        let mut extra = HashMap::new();
        extra.insert("displayName".to_string(), serde_json::json!("Alice"));

        let token = tokens.issue(&Claims::new("a@x.com", extra, 3600)).unwrap();
        let verified = tokens.verify(&token).unwrap();
        assert_eq!(verified.extra.get("displayName"), Some(&serde_json::json!("Alice")));
    }

    #[test]
    fn test_development_cookie_attributes() {
        let cookie = session_cookie("tok", &dev_config());
        assert!(cookie.starts_with("token=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_production_cookie_attributes() {
        let cookie = session_cookie("tok", &prod_config());
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
    }

    #[test]
    fn test_clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie(&dev_config());
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn test_ensure_owner() {
        let caller = user("a@x.com");
        assert!(ensure_owner(&caller, "a@x.com").is_ok());
        assert!(matches!(
            ensure_owner(&caller, "b@x.com"),
            Err(ApiError::Forbidden(_))
        ));
        // An absent owner descriptor never matches a real identity.
        assert!(ensure_owner(&caller, "").is_err());
    }
}
