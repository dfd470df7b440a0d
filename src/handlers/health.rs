use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

/// Identifies which service is answering `/` and `/health`.
#[derive(Debug, Clone, Copy)]
pub struct ServiceInfo {
    pub id: &'static str,
    pub title: &'static str,
}

impl ServiceInfo {
    pub const CUSTOMER: ServiceInfo = ServiceInfo {
        id: "customer-service",
        title: "Customer Service",
    };
    pub const ORDER: ServiceInfo = ServiceInfo {
        id: "order-service",
        title: "Order Service",
    };
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse)),
    tag = "meta"
)]
pub async fn root(info: web::Data<ServiceInfo>) -> HttpResponse {
    HttpResponse::Ok().json(WelcomeResponse {
        message: format!("Welcome to the {}!", info.title),
    })
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "meta"
)]
pub async fn health(info: web::Data<ServiceInfo>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: info.id.to_string(),
    })
}
