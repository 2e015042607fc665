use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Signs and verifies the access/refresh token pair. Both token kinds share
/// the secret; `token_type` in the claims tells them apart, and bearer
/// authentication only accepts access tokens.
#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

impl JwtKeys {
    pub fn new(secret: String, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    fn issue(&self, user_id: Uuid, token_type: &str, ttl_secs: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + chrono::Duration::seconds(ttl_secs)).timestamp() as usize,
            iat: now.timestamp() as usize,
            token_type: token_type.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn generate_access(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(user_id, TOKEN_TYPE_ACCESS, self.access_ttl_secs)
    }

    pub fn generate_pair(&self, user_id: Uuid) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            refresh: self.issue(user_id, TOKEN_TYPE_REFRESH, self.refresh_ttl_secs)?,
            access: self.generate_access(user_id)?,
        })
    }

    /// Checks signature and expiry; callers enforce `token_type` where a
    /// specific kind is required.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}
