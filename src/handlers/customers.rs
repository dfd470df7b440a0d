use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::CustomerService;
use crate::domain::customer::{Customer, CustomerDraft, CustomerPatch};
use crate::errors::AppError;

use super::{default_limit, MAX_PAGE_SIZE};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    /// Stored trimmed and lowercased; at most 255 characters.
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// At most 50 characters.
    pub phone_number: Option<String>,
    pub shipping_address: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an omitted field
/// (`None`, via `#[serde(default)]`).
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Every field is optional; omitted fields keep their current value.
/// `phone_number` and `shipping_address` are cleared by sending `null`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub shipping_address: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub customer_id: i32,
    /// Normalised to lowercase.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            customer_id: c.customer_id,
            email: c.email,
            first_name: c.first_name,
            last_name: c.last_name,
            phone_number: c.phone_number,
            shipping_address: c.shipping_address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCustomersParams {
    /// Number of customers to skip. Defaults to 0.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of customers to return. Defaults to 100, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid customer data"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    service: web::Data<CustomerService>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = service
        .register(CustomerDraft {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            phone_number: body.phone_number,
            shipping_address: body.shipping_address,
        })
        .await?;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// GET /customers
#[utoipa::path(
    get,
    path = "/customers",
    params(ListCustomersParams),
    responses((status = 200, description = "Customers", body = [CustomerResponse])),
    tag = "customers"
)]
pub async fn list_customers(
    service: web::Data<CustomerService>,
    query: web::Query<ListCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let skip = params.skip.max(0);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);

    let customers: Vec<CustomerResponse> = service
        .list(skip, limit)
        .await?
        .into_iter()
        .map(CustomerResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(customers))
}

/// GET /customers/{id}
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    service: web::Data<CustomerService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let customer = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// PUT /customers/{id}
///
/// Partial update: only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid customer data"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    service: web::Data<CustomerService>,
    path: web::Path<i32>,
    body: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = service
        .update(
            path.into_inner(),
            CustomerPatch {
                email: body.email,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                phone_number: body.phone_number,
                shipping_address: body.shipping_address,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// DELETE /customers/{id}
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    service: web::Data<CustomerService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
