use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

/// The principal resolved from a bearer token by the auth middleware.
/// Extracting it in a handler makes that handler require authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::unauthorized(NOT_AUTHENTICATED).into())),
        }
    }
}

/// Write access is reserved for the resource's author. Resolution failures
/// (404) are the caller's business and take precedence over this check.
pub fn ensure_author(author_id: &Uuid, user: &AuthenticatedUser) -> Result<(), DomainError> {
    if *author_id != user.id {
        return Err(DomainError::Forbidden);
    }
    Ok(())
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
