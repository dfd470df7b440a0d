use async_trait::async_trait;

use super::customer::{Customer, CustomerChanges, NewCustomerRecord};
use super::errors::DomainError;
use super::order::{NewOrderRecord, OrderStatus, OrderView};

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, customer: NewCustomerRecord) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
    fn list(&self, skip: i64, limit: i64) -> Result<Vec<Customer>, DomainError>;
    /// Returns `None` when no customer has this id.
    fn update(&self, id: i32, changes: CustomerChanges) -> Result<Option<Customer>, DomainError>;
    /// Returns `false` when no customer has this id.
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Writes the order and all of its items atomically.
    fn create(&self, order: NewOrderRecord) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError>;
    fn list(
        &self,
        skip: i64,
        limit: i64,
        customer_id: Option<i32>,
    ) -> Result<Vec<OrderView>, DomainError>;
    fn update_status(&self, id: i32, status: OrderStatus)
        -> Result<Option<OrderView>, DomainError>;
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// The remote product service, as seen by order creation.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    /// Fails with `ProductNotFound` for an unknown id and
    /// `ProductServiceUnavailable` when the service cannot give an answer.
    async fn ensure_exists(&self, product_id: i32) -> Result<(), DomainError>;
}
