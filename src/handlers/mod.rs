pub mod customers;
pub mod health;
pub mod orders;

use utoipa::OpenApi;

pub(crate) const MAX_PAGE_SIZE: i64 = 100;

pub(crate) fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Customer Service"),
    paths(
        health::root,
        health::health,
        customers::create_customer,
        customers::list_customers,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
    ),
    components(schemas(
        health::WelcomeResponse,
        health::HealthResponse,
        customers::CreateCustomerRequest,
        customers::UpdateCustomerRequest,
        customers::CustomerResponse,
    )),
    tags((name = "customers", description = "Customer management"))
)]
pub struct CustomerApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "Order Service"),
    paths(
        health::root,
        health::health,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::delete_order,
    ),
    components(schemas(
        health::WelcomeResponse,
        health::HealthResponse,
        orders::CreateOrderRequest,
        orders::CreateOrderItemRequest,
        orders::UpdateOrderStatusRequest,
        orders::OrderResponse,
        orders::OrderItemResponse,
    )),
    tags((name = "orders", description = "Order management"))
)]
pub struct OrderApiDoc;
