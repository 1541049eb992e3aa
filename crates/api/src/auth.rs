//! Admin authentication: a single argon2-verified login that issues HS256
//! bearer tokens, and the extractors that read them back.

use std::convert::Infallible;

use advisory_site_core::editor::Capability;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin email address.
    pub sub: String,
    #[serde(default)]
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// An explicit admin claim, or an address in the admin domain.
    pub fn is_admin(&self, admin_domain: &str) -> bool {
        self.admin || email_in_domain(&self.sub, admin_domain)
    }
}

fn email_in_domain(email: &str, domain: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, host)) => !local.is_empty() && !domain.is_empty() && host.eq_ignore_ascii_case(domain),
        None => false,
    }
}

fn signing_secret(config: &AppConfig) -> ApiResult<&[u8]> {
    config
        .jwt_secret
        .as_deref()
        .map(str::as_bytes)
        .ok_or_else(|| ApiError::Unavailable("Admin login not configured".to_string()))
}

pub fn issue_token(config: &AppConfig, email: &str, admin: bool) -> ApiResult<String> {
    let secret = signing_secret(config)?;
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        admin,
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.token_ttl_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

pub fn verify_token(config: &AppConfig, token: &str) -> ApiResult<Claims> {
    let secret = signing_secret(config)?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ApiError::Unauthorized
    })
}

/// Check a login attempt against the configured admin credentials.
pub fn check_credentials(config: &AppConfig, email: &str, password: &str) -> ApiResult<String> {
    let (Some(admin_email), Some(hash)) = (&config.admin_email, &config.admin_password_hash) else {
        return Err(ApiError::Unavailable("Admin login not configured".to_string()));
    };
    let email = email.trim().to_lowercase();
    if email != *admin_email {
        return Err(ApiError::Unauthorized);
    }
    let parsed = PasswordHash::new(hash).map_err(|e| ApiError::Internal(format!("invalid ADMIN_PASSWORD_HASH: {e}")))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApiError::Unauthorized)?;
    Ok(email)
}

/// A request carrying a valid admin bearer token.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

impl AdminUser {
    fn from_claims(state: &AppState, claims: Claims) -> ApiResult<Self> {
        if claims.is_admin(&state.config().admin_email_domain) {
            Ok(Self { email: claims.sub })
        } else {
            Err(ApiError::Forbidden("Admin access required".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;
        let claims = verify_token(state.config(), bearer.token())?;
        Self::from_claims(state, claims)
    }
}

/// How a page should render for this request. Anything short of a valid
/// admin token renders read-only.
#[derive(Debug, Clone, Copy)]
pub struct RenderCapability(pub Capability);

impl FromRequestParts<AppState> for RenderCapability {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let capability = match AdminUser::from_request_parts(parts, state).await {
            Ok(_) => Capability::Editor,
            Err(_) => Capability::Viewer,
        };
        Ok(Self(capability))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use argon2::password_hash::{PasswordHasher, SaltString};

    use super::*;

    pub(crate) fn hash_password(password: &str) -> String {
        let salt = SaltString::encode_b64(b"fixed-test-salt").unwrap();
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    /// Defaults plus a signing secret.
    pub(crate) fn token_config() -> AppConfig {
        AppConfig {
            jwt_secret: Some("test-signing-secret".to_string()),
            ..AppConfig::default()
        }
    }

    pub(crate) fn admin_config() -> AppConfig {
        AppConfig {
            admin_email: Some("owner@skyadvisers.com".to_string()),
            admin_password_hash: Some(hash_password("correct horse")),
            ..token_config()
        }
    }

    #[test]
    fn token_round_trip() {
        let config = token_config();
        let token = issue_token(&config, "editor@example.com", true).unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "editor@example.com");
        assert!(claims.is_admin("skyadvisers.com"));
    }

    #[test]
    fn tampered_or_foreign_tokens_are_rejected() {
        let config = token_config();
        let other = AppConfig {
            jwt_secret: Some("another-secret".to_string()),
            ..AppConfig::default()
        };
        let token = issue_token(&other, "owner@skyadvisers.com", true).unwrap();
        assert!(matches!(verify_token(&config, &token), Err(ApiError::Unauthorized)));
        assert!(matches!(verify_token(&config, "not.a.token"), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn no_secret_means_no_tokens() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert!(matches!(
            issue_token(&config, "owner@skyadvisers.com", true),
            Err(ApiError::Unavailable(_))
        ));
        for secret in ["", "secret", "dev-secret-change-me-in-production"] {
            let forged = encode(
                &Header::default(),
                &Claims {
                    sub: "someone@skyadvisers.com".to_string(),
                    admin: true,
                    iat: Utc::now().timestamp(),
                    exp: (Utc::now() + Duration::hours(1)).timestamp(),
                },
                &EncodingKey::from_secret(secret.as_bytes()),
            )
            .unwrap();
            assert!(matches!(verify_token(&config, &forged), Err(ApiError::Unavailable(_))));
        }
    }

    #[test]
    fn admin_by_domain() {
        let claims = |sub: &str| Claims {
            sub: sub.to_string(),
            admin: false,
            iat: 0,
            exp: 0,
        };
        assert!(claims("someone@SkyAdvisers.com").is_admin("skyadvisers.com"));
        assert!(!claims("someone@skyadvisers.com.evil.io").is_admin("skyadvisers.com"));
        assert!(!claims("@skyadvisers.com").is_admin("skyadvisers.com"));
    }

    #[test]
    fn credentials() {
        let config = admin_config();
        assert_eq!(
            check_credentials(&config, " Owner@SkyAdvisers.com ", "correct horse").unwrap(),
            "owner@skyadvisers.com"
        );
        assert!(matches!(
            check_credentials(&config, "owner@skyadvisers.com", "wrong"),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            check_credentials(&config, "intruder@skyadvisers.com", "correct horse"),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            check_credentials(&AppConfig::default(), "owner@skyadvisers.com", "x"),
            Err(ApiError::Unavailable(_))
        ));
    }
}
