use crate::application::group_service::GroupService;
use crate::domain::error::DomainError;
use actix_web::{HttpResponse, get, web};

#[get("/groups/")]
pub async fn list_groups(service: web::Data<GroupService>) -> Result<HttpResponse, DomainError> {
    let groups = service.list().await?;
    Ok(HttpResponse::Ok().json(groups))
}

#[get("/groups/{id}/")]
pub async fn retrieve_group(
    service: web::Data<GroupService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let group = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(group))
}
