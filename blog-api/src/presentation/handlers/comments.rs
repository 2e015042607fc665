use crate::application::comment_service::CommentService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CommentPatchRequest, CommentResponse, CommentWriteRequest};
use crate::presentation::utils::{AuthenticatedUser, ensure_author, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tracing::info;

#[get("/posts/{post_id}/comments/")]
pub async fn list_comments(
    service: web::Data<CommentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let comments = service.list(path.into_inner()).await?;
    let results: Vec<CommentResponse> = comments.iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(results))
}

#[get("/posts/{post_id}/comments/{id}/")]
pub async fn retrieve_comment(
    service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, id) = path.into_inner();
    let comment = service.get(post_id, id).await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(&comment)))
}

/// Both the author and the parent post come from the request context, never
/// from the body.
#[post("/posts/{post_id}/comments/")]
pub async fn create_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<CommentService>,
    path: web::Path<i64>,
    payload: web::Json<CommentWriteRequest>,
) -> Result<HttpResponse, DomainError> {
    let comment = service
        .create(path.into_inner(), user.id, payload.into_inner().text)
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment.id,
        post_id = %comment.post_id,
        "comment created"
    );

    Ok(HttpResponse::Created().json(CommentResponse::from(&comment)))
}

#[put("/posts/{post_id}/comments/{id}/")]
pub async fn replace_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
    payload: web::Json<CommentWriteRequest>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, id) = path.into_inner();
    let mut comment = service.get(post_id, id).await?;
    ensure_author(&comment.author_id, &user)?;

    comment.text = payload.into_inner().text;
    let comment = service.update(comment).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment.id,
        "comment updated"
    );

    Ok(HttpResponse::Ok().json(CommentResponse::from(&comment)))
}

#[patch("/posts/{post_id}/comments/{id}/")]
pub async fn patch_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
    payload: web::Json<CommentPatchRequest>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, id) = path.into_inner();
    let mut comment = service.get(post_id, id).await?;
    ensure_author(&comment.author_id, &user)?;

    if let Some(text) = payload.into_inner().text {
        comment.text = text;
    }
    let comment = service.update(comment).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment.id,
        "comment updated"
    );

    Ok(HttpResponse::Ok().json(CommentResponse::from(&comment)))
}

#[delete("/posts/{post_id}/comments/{id}/")]
pub async fn delete_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, id) = path.into_inner();
    let comment = service.get(post_id, id).await?;
    ensure_author(&comment.author_id, &user)?;

    service.delete(comment.id).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment.id,
        "comment deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}
