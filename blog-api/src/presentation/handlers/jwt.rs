use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    AccessTokenResponse, TokenObtainRequest, TokenRefreshRequest, TokenVerifyRequest,
};
use actix_web::{HttpResponse, Responder, Scope, post, web};
use serde_json::json;
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/jwt")
        .service(create)
        .service(refresh)
        .service(verify)
}

#[post("/create/")]
async fn create(
    service: web::Data<AuthService>,
    payload: web::Json<TokenObtainRequest>,
) -> Result<impl Responder, DomainError> {
    let pair = service.login(&payload.username, &payload.password).await?;

    info!(username = %payload.username, "token pair issued");

    Ok(HttpResponse::Ok().json(pair))
}

#[post("/refresh/")]
async fn refresh(
    service: web::Data<AuthService>,
    payload: web::Json<TokenRefreshRequest>,
) -> Result<impl Responder, DomainError> {
    let access = service.refresh(&payload.refresh).await?;
    Ok(HttpResponse::Ok().json(AccessTokenResponse { access }))
}

#[post("/verify/")]
async fn verify(
    service: web::Data<AuthService>,
    payload: web::Json<TokenVerifyRequest>,
) -> Result<impl Responder, DomainError> {
    service.verify(&payload.token)?;
    Ok(HttpResponse::Ok().json(json!({})))
}
