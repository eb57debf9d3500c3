//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! issuer and audience are fixed per deployment and checked on every request.

use ajfses_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Display name of the user.
    pub name: String,
    pub username: String,
    /// The user's role name (e.g. `"Admin"`).
    pub role: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime in minutes (default: 1440).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes (one day).
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 1440;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default        |
    /// |-------------------|----------|----------------|
    /// | `JWT_SECRET`      | **yes**  | --             |
    /// | `JWT_ISSUER`      | no       | `ajfses`       |
    /// | `JWT_AUDIENCE`    | no       | `ajfses-admin` |
    /// | `JWT_EXPIRY_MINS` | no       | `1440`         |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ajfses".into());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "ajfses-admin".into());

        let access_token_expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            issuer,
            audience,
            access_token_expiry_mins,
        }
    }
}

/// Identity fields copied into a new token.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: DbId,
    pub name: &'a str,
    pub username: &'a str,
    pub role: &'a str,
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    subject: TokenSubject<'_>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject.user_id,
        name: subject.name.to_string(),
        username: subject.username.to_string(),
        role: subject.role.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now + config.access_token_expiry_mins * 60,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry, issuer and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: "ajfses".to_string(),
            audience: "ajfses-admin".to_string(),
            access_token_expiry_mins: 15,
        }
    }

    fn subject() -> TokenSubject<'static> {
        TokenSubject {
            user_id: 42,
            name: "Site Admin",
            username: "admin",
            role: "Admin",
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token(subject(), &config).expect("token generation");

        let claims = validate_token(&token, &config).expect("token validation");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.name, "Site Admin");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.iss, "ajfses");
        assert_eq!(claims.aud, "ajfses-admin");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = generate_access_token(subject(), &config).unwrap();
        let mut claims = validate_token(&token, &config).unwrap();
        // Well past the default 60-second leeway.
        claims.exp = now - 300;
        claims.iat = now - 600;

        assert!(validate_token(&sign(&claims, &config), &config).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let config = test_config();
        let token = generate_access_token(subject(), &config).unwrap();

        let other = JwtConfig {
            audience: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn test_wrong_issuer_fails() {
        let config = test_config();
        let token = generate_access_token(subject(), &config).unwrap();

        let other = JwtConfig {
            issuer: "elsewhere".to_string(),
            ..test_config()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = generate_access_token(subject(), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };
        assert!(
            validate_token(&token, &other).is_err(),
            "token signed with a different secret must fail"
        );
    }
}
