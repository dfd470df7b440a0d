pub mod customer_service;
pub mod order_service;

pub use customer_service::CustomerService;
pub use order_service::OrderService;

use actix_web::web;

use crate::domain::errors::DomainError;

/// Runs a synchronous repository call on the blocking pool. The pooled
/// connection it checks out is returned when the closure finishes, on every
/// exit path.
async fn run_blocking<F, T>(f: F) -> Result<T, DomainError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
}
