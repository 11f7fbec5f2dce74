use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime in hours
pub const SESSION_HOURS: i64 = 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,    // Subject (admin id as string)
    pub admin_id: Uuid, // Admin account UUID
    pub email: String,  // Login email (for logging)
    pub exp: i64,       // Expiration timestamp
    pub iat: i64,       // Issued at timestamp
    pub iss: String,    // Issuer
    pub jti: String,    // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies admin session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a session token for an admin
    ///
    /// Token expires after 24 hours
    pub fn create_token(&self, admin_id: Uuid, email: String) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(SESSION_HOURS);

        let claims = Claims {
            sub: admin_id.to_string(),
            admin_id,
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
