use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use commerce_services::config::{ProductServiceSettings, ServiceDefaults, Settings};
use commerce_services::infrastructure::{DieselOrderRepository, HttpProductCatalog};
use commerce_services::{
    build_order_server, create_pool, run_migrations, OrderService, ORDER_MIGRATIONS,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env(ServiceDefaults::ORDER)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let products = ProductServiceSettings::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = create_pool(&settings.database_url).map_err(io::Error::other)?;
    run_migrations(&pool, ORDER_MIGRATIONS).map_err(io::Error::other)?;

    let catalog =
        HttpProductCatalog::new(&products.base_url, products.timeout).map_err(io::Error::other)?;
    let service = OrderService::new(
        Arc::new(DieselOrderRepository::new(pool)),
        Arc::new(catalog),
    );
    let listener = TcpListener::bind((settings.host.as_str(), settings.port))?;

    log::info!(
        "Starting order service at http://{}:{}, validating products against {}",
        settings.host,
        settings.port,
        products.base_url
    );

    build_order_server(service, listener)?.await
}
