use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use commerce_services::config::{ServiceDefaults, Settings};
use commerce_services::infrastructure::DieselCustomerRepository;
use commerce_services::{
    build_customer_server, create_pool, run_migrations, CustomerService, CUSTOMER_MIGRATIONS,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env(ServiceDefaults::CUSTOMER)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = create_pool(&settings.database_url).map_err(io::Error::other)?;
    run_migrations(&pool, CUSTOMER_MIGRATIONS).map_err(io::Error::other)?;

    let service = CustomerService::new(Arc::new(DieselCustomerRepository::new(pool)));
    let listener = TcpListener::bind((settings.host.as_str(), settings.port))?;

    log::info!(
        "Starting customer service at http://{}:{}",
        settings.host,
        settings.port
    );

    build_customer_server(service, listener)?.await
}
