pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::{CustomerService, OrderService};
pub use db::{create_pool, DbPool};
use handlers::health::ServiceInfo;
use handlers::{customers, health, orders, CustomerApiDoc, OrderApiDoc};

pub const CUSTOMER_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("migrations/customer_service");
pub const ORDER_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/order_service");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(
    pool: &DbPool,
    migrations: EmbeddedMigrations,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(migrations)?;
    Ok(())
}

fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler));
}

/// Routes of the customer service. Expects a `web::Data<CustomerService>` in
/// the app data.
pub fn customer_routes(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);
    cfg.app_data(web::Data::new(ServiceInfo::CUSTOMER))
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/customers")
                .route("", web::post().to(customers::create_customer))
                .route("/", web::post().to(customers::create_customer))
                .route("", web::get().to(customers::list_customers))
                .route("/", web::get().to(customers::list_customers))
                .route("/{id}", web::get().to(customers::get_customer))
                .route("/{id}", web::put().to(customers::update_customer))
                .route("/{id}", web::delete().to(customers::delete_customer)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", CustomerApiDoc::openapi()),
        );
}

/// Routes of the order service. Expects a `web::Data<OrderService>` in the
/// app data.
pub fn order_routes(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);
    cfg.app_data(web::Data::new(ServiceInfo::ORDER))
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/orders")
                .route("", web::post().to(orders::create_order))
                .route("/", web::post().to(orders::create_order))
                .route("", web::get().to(orders::list_orders))
                .route("/", web::get().to(orders::list_orders))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}", web::delete().to(orders::delete_order))
                .route("/{id}/status", web::patch().to(orders::update_order_status)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", OrderApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` for the customer service accepting
/// connections on `listener`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_customer_server(
    service: CustomerService,
    listener: std::net::TcpListener,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .wrap(Logger::default())
            .configure(customer_routes)
    })
    .listen(listener)?
    .run())
}

/// Build and return an actix-web `Server` for the order service.
pub fn build_order_server(
    service: OrderService,
    listener: std::net::TcpListener,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .wrap(Logger::default())
            .configure(order_routes)
    })
    .listen(listener)?
    .run())
}
