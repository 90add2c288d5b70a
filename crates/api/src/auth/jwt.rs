//! JWT access-token validation.
//!
//! Tokens are issued by the external identity provider and signed with a
//! shared HS256 secret. The subject is the user's UUID; the `role` claim
//! distinguishes operators from buyers.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lovelock_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Role granted to operators.
pub const ROLE_ADMIN: &str = "admin";

/// Role carried by backend service tokens; treated as an operator.
pub const ROLE_SERVICE: &str = "service_role";

/// Role carried by regular signed-in buyers.
pub const ROLE_AUTHENTICATED: &str = "authenticated";

/// JWT claims read from every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: UserId,
    /// The user's role name (e.g. `"authenticated"`, `"admin"`).
    #[serde(default = "default_role")]
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

fn default_role() -> String {
    ROLE_AUTHENTICATED.to_string()
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Mint an HS256 access token valid for `ttl_mins` minutes.
pub fn generate_access_token(
    user_id: UserId,
    role: &str,
    ttl_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + ttl_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry. The audience claim is not checked.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.validate_aud = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
