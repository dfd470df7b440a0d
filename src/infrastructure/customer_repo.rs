use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::customer::{Customer, CustomerChanges, NewCustomerRecord};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerChangeset, CustomerRow, NewCustomerRow};

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            customer_id: row.customer_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            shipping_address: row.shipping_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn create(&self, customer: NewCustomerRecord) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                email: customer.email,
                password_hash: customer.password_hash,
                first_name: customer.first_name,
                last_name: customer.last_name,
                phone_number: customer.phone_number,
                shipping_address: customer.shipping_address,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn list(&self, skip: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = customers::table
            .select(CustomerRow::as_select())
            .order(customers::customer_id.asc())
            .limit(limit)
            .offset(skip)
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    fn update(&self, id: i32, changes: CustomerChanges) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(customers::table.find(id))
            .set(&CustomerChangeset {
                email: changes.email,
                password_hash: changes.password_hash,
                first_name: changes.first_name,
                last_name: changes.last_name,
                phone_number: changes.phone_number,
                shipping_address: changes.shipping_address,
                updated_at: Utc::now(),
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(customers::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
