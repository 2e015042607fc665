use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, web};
use futures_util::future::LocalBoxFuture;
use tracing::info;
use uuid::Uuid;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::utils::AuthenticatedUser;

#[derive(Clone)]
pub struct RequestId(pub String);

/// Tags every request with an id (honouring an inbound `x-request-id`) and
/// emits one structured completion line with method, path, status and
/// duration.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceService { service }))
    }
}

pub struct RequestTraceService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_owned())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(RequestId(request_id.clone()));

        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static("x-request-id"), value);
            }
            info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = res.status().as_u16(),
                duration_ms = start.elapsed().as_millis() as u64,
                "request completed"
            );
            Ok(res)
        })
    }
}

/// Resolves an optional bearer token. A request without an Authorization
/// header passes through anonymously, so read-only handlers stay open; a
/// present but invalid header is rejected outright. Handlers opt into
/// mandatory authentication by extracting [`AuthenticatedUser`].
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let auth_service = req.app_data::<web::Data<AuthService>>().cloned();

        let auth_header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Box::pin(async move {
            if let Some(header) = auth_header {
                let auth_service = auth_service.ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("AuthService missing")
                })?;

                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    Error::from(DomainError::unauthorized(
                        "Authorization header must contain two space-delimited values",
                    ))
                })?;

                let user = auth_service.resolve_access_token(token).await?;
                req.extensions_mut().insert(AuthenticatedUser {
                    id: user.id,
                    username: user.username,
                });
            }

            service.call(req).await
        })
    }
}
