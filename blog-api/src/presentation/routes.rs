use actix_web::dev::HttpServiceFactory;
use actix_web::web;

use crate::domain::error::DomainError;
use crate::presentation::handlers;
use crate::presentation::middleware::JwtAuth;

/// The whole versioned API surface. Bearer resolution wraps the scope, so
/// an invalid token is rejected everywhere while anonymous reads pass
/// through; individual handlers decide whether authentication is mandatory.
pub fn api_scope() -> impl HttpServiceFactory {
    web::scope("/v1")
        .wrap(JwtAuth)
        .service(handlers::jwt::scope())
        .service(handlers::posts::list_posts)
        .service(handlers::posts::create_post)
        .service(handlers::posts::retrieve_post)
        .service(handlers::posts::replace_post)
        .service(handlers::posts::patch_post)
        .service(handlers::posts::delete_post)
        .service(handlers::comments::list_comments)
        .service(handlers::comments::create_comment)
        .service(handlers::comments::retrieve_comment)
        .service(handlers::comments::replace_comment)
        .service(handlers::comments::patch_comment)
        .service(handlers::comments::delete_comment)
        .service(handlers::groups::list_groups)
        .service(handlers::groups::retrieve_group)
        .service(handlers::follows::list_follows)
        .service(handlers::follows::create_follow)
}

/// Malformed request bodies become the same field-keyed error shape the
/// rest of the API speaks.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| DomainError::validation("detail", err.to_string()).into())
}
