use crate::application::follow_service::FollowService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{FollowCreateRequest, FollowQuery, FollowResponse};
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[get("/follow/")]
pub async fn list_follows(
    user: AuthenticatedUser,
    service: web::Data<FollowService>,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse, DomainError> {
    let follows = service.list(user.id, query.search.as_deref()).await?;
    let results: Vec<FollowResponse> = follows.iter().map(FollowResponse::from).collect();
    Ok(HttpResponse::Ok().json(results))
}

/// The subscriber is always the caller; only `following` is read from the
/// body.
#[post("/follow/")]
pub async fn create_follow(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<FollowService>,
    payload: web::Json<FollowCreateRequest>,
) -> Result<HttpResponse, DomainError> {
    let follow = service.create(user.id, &payload.following).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        following = %follow.following_username,
        "follow created"
    );

    Ok(HttpResponse::Created().json(FollowResponse::from(&follow)))
}
