pub mod customer_repo;
pub mod models;
pub mod order_repo;
pub mod product_client;

pub use customer_repo::DieselCustomerRepository;
pub use order_repo::DieselOrderRepository;
pub use product_client::HttpProductCatalog;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            // customers.email is the only unique column besides primary keys
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DomainError::EmailTaken
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
