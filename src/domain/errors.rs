use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Customer not found")]
    CustomerNotFound,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Product {0} not found")]
    ProductNotFound(i32),
    #[error("Product service unavailable: {0}")]
    ProductServiceUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
