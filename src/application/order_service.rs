use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderStatus, OrderView};
use crate::domain::ports::{OrderRepository, ProductCatalog};

use super::run_blocking;

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { repo, catalog }
    }

    /// Validates the order, confirms every referenced product with the
    /// product service, and only then writes the order and its items.
    ///
    /// Nothing is written unless every product lookup succeeds. The lookups
    /// are not retried.
    pub async fn create_order(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let record = order.into_record()?;

        for product_id in record.product_ids() {
            if let Err(e) = self.catalog.ensure_exists(product_id).await {
                log::warn!(
                    "Rejecting order for customer {}: {}",
                    record.customer_id,
                    e
                );
                return Err(e);
            }
        }

        let repo = Arc::clone(&self.repo);
        let created = run_blocking(move || repo.create(record)).await?;
        log::info!(
            "Created order {} for customer {} with {} item(s)",
            created.order_id,
            created.customer_id,
            created.items.len()
        );
        Ok(created)
    }

    pub async fn get_order(&self, id: i32) -> Result<OrderView, DomainError> {
        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.find_by_id(id))
            .await?
            .ok_or(DomainError::OrderNotFound)
    }

    pub async fn list_orders(
        &self,
        skip: i64,
        limit: i64,
        customer_id: Option<i32>,
    ) -> Result<Vec<OrderView>, DomainError> {
        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.list(skip, limit, customer_id)).await
    }

    pub async fn update_status(&self, id: i32, status: &str) -> Result<OrderView, DomainError> {
        let status: OrderStatus = status.parse()?;
        let repo = Arc::clone(&self.repo);
        let updated = run_blocking(move || repo.update_status(id, status))
            .await?
            .ok_or(DomainError::OrderNotFound)?;
        log::info!("Order {} is now {}", id, status);
        Ok(updated)
    }

    pub async fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        let repo = Arc::clone(&self.repo);
        if run_blocking(move || repo.delete(id)).await? {
            log::info!("Deleted order {}", id);
            Ok(())
        } else {
            Err(DomainError::OrderNotFound)
        }
    }
}
