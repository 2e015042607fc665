use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};

use blog_api::application::auth_service::AuthService;
use blog_api::application::comment_service::CommentService;
use blog_api::application::follow_service::FollowService;
use blog_api::application::group_service::GroupService;
use blog_api::application::post_service::PostService;
use blog_api::data::comment_repository::{CommentRepository, PostgresCommentRepository};
use blog_api::data::follow_repository::{FollowRepository, PostgresFollowRepository};
use blog_api::data::group_repository::{GroupRepository, PostgresGroupRepository};
use blog_api::data::post_repository::{PostRepository, PostgresPostRepository};
use blog_api::data::user_repository::{PostgresUserRepository, UserRepository};
use blog_api::infrastructure::config::AppConfig;
use blog_api::infrastructure::database::{create_pool, run_migrations};
use blog_api::infrastructure::logging::init_logging;
use blog_api::infrastructure::security::JwtKeys;
use blog_api::presentation::middleware::RequestTrace;
use blog_api::presentation::routes::{api_scope, json_config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let groups: Arc<dyn GroupRepository> = Arc::new(PostgresGroupRepository::new(pool.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let comments: Arc<dyn CommentRepository> =
        Arc::new(PostgresCommentRepository::new(pool.clone()));
    let follows: Arc<dyn FollowRepository> = Arc::new(PostgresFollowRepository::new(pool.clone()));

    let keys = JwtKeys::new(
        config.jwt_secret.clone(),
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    );
    let auth_service = AuthService::new(Arc::clone(&users), keys);
    let post_service = PostService::new(Arc::clone(&posts), Arc::clone(&groups));
    let comment_service = CommentService::new(Arc::clone(&comments), Arc::clone(&posts));
    let group_service = GroupService::new(Arc::clone(&groups));
    let follow_service = FollowService::new(Arc::clone(&follows), Arc::clone(&users));

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestTrace)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(json_config())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(group_service.clone()))
            .app_data(web::Data::new(follow_service.clone()))
            .service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    // A wildcard origin cannot be combined with credentials.
    if config.cors_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        cors = cors.supports_credentials();
        for origin in &config.cors_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
