use crate::application::post_service::PostService;
use crate::data::post_repository::NewPost;
use crate::domain::error::DomainError;
use crate::presentation::dto::{PostPatchRequest, PostResponse, PostWriteRequest};
use crate::presentation::pagination::{PageQuery, paginate};
use crate::presentation::utils::{AuthenticatedUser, ensure_author, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tracing::info;

/// Open listing. Plain array by default; the paginated envelope only when
/// the client asked for it via `limit`/`offset`.
#[get("/posts/")]
pub async fn list_posts(
    req: HttpRequest,
    service: web::Data<PostService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    if query.requested() {
        let params = query.params();
        let (posts, count) = service.page(params.limit, params.offset).await?;
        let results: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
        let base = {
            let conn = req.connection_info();
            format!("{}://{}{}", conn.scheme(), conn.host(), req.path())
        };
        Ok(HttpResponse::Ok().json(paginate(&base, params, count, results)))
    } else {
        let posts = service.list_all().await?;
        let results: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
        Ok(HttpResponse::Ok().json(results))
    }
}

#[get("/posts/{id}/")]
pub async fn retrieve_post(
    service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

/// The author is always the caller; a client-supplied value is never read.
#[post("/posts/")]
pub async fn create_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<PostService>,
    payload: web::Json<PostWriteRequest>,
) -> Result<HttpResponse, DomainError> {
    let body = payload.into_inner();
    let post = service
        .create(NewPost {
            author_id: user.id,
            text: body.text,
            image: body.image,
            group_id: body.group,
        })
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostResponse::from(&post)))
}

#[put("/posts/{id}/")]
pub async fn replace_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<PostService>,
    path: web::Path<i64>,
    payload: web::Json<PostWriteRequest>,
) -> Result<HttpResponse, DomainError> {
    let mut post = service.get(path.into_inner()).await?;
    ensure_author(&post.author_id, &user)?;

    let body = payload.into_inner();
    post.text = body.text;
    post.image = body.image;
    post.group_id = body.group;
    let post = service.update(post).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post.id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

#[patch("/posts/{id}/")]
pub async fn patch_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<PostService>,
    path: web::Path<i64>,
    payload: web::Json<PostPatchRequest>,
) -> Result<HttpResponse, DomainError> {
    let mut post = service.get(path.into_inner()).await?;
    ensure_author(&post.author_id, &user)?;

    let body = payload.into_inner();
    if let Some(text) = body.text {
        post.text = text;
    }
    if let Some(image) = body.image {
        post.image = Some(image);
    }
    if let Some(group) = body.group {
        post.group_id = Some(group);
    }
    let post = service.update(post).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post.id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

#[delete("/posts/{id}/")]
pub async fn delete_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get(path.into_inner()).await?;
    ensure_author(&post.author_id, &user)?;

    service.delete(post.id).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post.id,
        "post deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}
