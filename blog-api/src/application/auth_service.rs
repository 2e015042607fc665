use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, user::User};
use crate::infrastructure::security::{
    JwtKeys, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH, TokenPair, verify_password,
};

const NO_ACTIVE_ACCOUNT: &str = "No active account found with the given credentials";
const INVALID_TOKEN: &str = "Token is invalid or expired";
const INVALID_BEARER: &str = "Given token not valid for any token type";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    /// Issues an access/refresh pair for valid credentials. Unknown users
    /// and bad passwords are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::unauthorized(NO_ACTIVE_ACCOUNT))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::unauthorized(NO_ACTIVE_ACCOUNT))?;
        if !valid {
            return Err(DomainError::unauthorized(NO_ACTIVE_ACCOUNT));
        }

        self.keys
            .generate_pair(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    /// Exchanges a refresh token for a fresh access token.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self
            .keys
            .verify_token(refresh_token)
            .map_err(|_| DomainError::unauthorized(INVALID_TOKEN))?;
        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(DomainError::unauthorized(INVALID_TOKEN));
        }

        let user = self.user_from_claims_sub(&claims.sub, INVALID_TOKEN).await?;
        self.keys
            .generate_access(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    /// Validates signature and expiry of either token kind.
    pub fn verify(&self, token: &str) -> Result<(), DomainError> {
        self.keys
            .verify_token(token)
            .map(|_| ())
            .map_err(|_| DomainError::unauthorized(INVALID_TOKEN))
    }

    /// Resolves a bearer access token to its user, for request
    /// authentication. Refresh tokens are not accepted here.
    pub async fn resolve_access_token(&self, token: &str) -> Result<User, DomainError> {
        let claims = self
            .keys
            .verify_token(token)
            .map_err(|_| DomainError::unauthorized(INVALID_BEARER))?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(DomainError::unauthorized(INVALID_BEARER));
        }
        self.user_from_claims_sub(&claims.sub, INVALID_BEARER).await
    }

    async fn user_from_claims_sub(&self, sub: &str, message: &str) -> Result<User, DomainError> {
        let user_id =
            Uuid::parse_str(sub).map_err(|_| DomainError::unauthorized(message))?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::unauthorized("User not found"))
    }
}
