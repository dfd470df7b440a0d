use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};

use crate::domain::customer::{
    check_password, Customer, CustomerChanges, CustomerDraft, CustomerEmail, CustomerPatch,
    NewCustomerRecord, PersonName, PhoneNumber,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;

use super::run_blocking;

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn register(&self, draft: CustomerDraft) -> Result<Customer, DomainError> {
        check_password(&draft.password)?;
        let record = NewCustomerRecord {
            email: CustomerEmail::parse(draft.email)?.into_inner(),
            first_name: PersonName::parse("first_name", draft.first_name)?.into_inner(),
            last_name: PersonName::parse("last_name", draft.last_name)?.into_inner(),
            phone_number: PhoneNumber::parse_optional(draft.phone_number)?,
            shipping_address: draft.shipping_address,
            password_hash: hash_password(draft.password).await?,
        };

        let repo = Arc::clone(&self.repo);
        let customer = run_blocking(move || repo.create(record)).await?;
        log::info!(
            "Registered customer {} <{}>",
            customer.customer_id,
            customer.email
        );
        Ok(customer)
    }

    pub async fn get(&self, id: i32) -> Result<Customer, DomainError> {
        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.find_by_id(id))
            .await?
            .ok_or(DomainError::CustomerNotFound)
    }

    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.list(skip, limit)).await
    }

    /// Applies only the fields present in `patch`.
    pub async fn update(&self, id: i32, patch: CustomerPatch) -> Result<Customer, DomainError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let password_hash = match patch.password {
            Some(password) => {
                check_password(&password)?;
                Some(hash_password(password).await?)
            }
            None => None,
        };
        let changes = CustomerChanges {
            email: patch
                .email
                .map(|e| CustomerEmail::parse(e).map(CustomerEmail::into_inner))
                .transpose()?,
            first_name: patch
                .first_name
                .map(|n| PersonName::parse("first_name", n).map(PersonName::into_inner))
                .transpose()?,
            last_name: patch
                .last_name
                .map(|n| PersonName::parse("last_name", n).map(PersonName::into_inner))
                .transpose()?,
            phone_number: patch
                .phone_number
                .map(PhoneNumber::parse_optional)
                .transpose()?,
            shipping_address: patch.shipping_address,
            password_hash,
        };

        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.update(id, changes))
            .await?
            .ok_or(DomainError::CustomerNotFound)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let repo = Arc::clone(&self.repo);
        if run_blocking(move || repo.delete(id)).await? {
            log::info!("Deleted customer {}", id);
            Ok(())
        } else {
            Err(DomainError::CustomerNotFound)
        }
    }
}

async fn hash_password(password: String) -> Result<String, DomainError> {
    run_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
    })
    .await
}
