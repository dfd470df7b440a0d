use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::application::OrderService;
use crate::domain::order::{NewOrder, OrderItemInput, OrderView};
use crate::errors::AppError;

use super::{default_limit, MAX_PAGE_SIZE};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub shipping_address: Option<String>,
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of pending, confirmed, shipped, delivered, cancelled.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub order_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_purchase: String,
    pub item_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: String,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            order_id: o.order_id,
            customer_id: o.customer_id,
            order_date: o.order_date,
            status: o.status.to_string(),
            total_amount: o.total_amount.to_string(),
            shipping_address: o.shipping_address,
            created_at: o.created_at,
            updated_at: o.updated_at,
            items: o
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    order_item_id: i.order_item_id,
                    product_id: i.product_id,
                    quantity: i.quantity,
                    price_at_purchase: i.price_at_purchase.to_string(),
                    item_total: i.item_total.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersParams {
    /// Number of orders to skip. Defaults to 0.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of orders to return. Defaults to 100, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Only return orders placed by this customer.
    pub customer_id: Option<i32>,
}

fn parse_items(items: Vec<CreateOrderItemRequest>) -> Result<Vec<OrderItemInput>, AppError> {
    items
        .into_iter()
        .map(|i| {
            let unit_price = BigDecimal::from_str(i.unit_price.trim()).map_err(|e| {
                AppError::Unprocessable(format!("Invalid unit_price '{}': {}", i.unit_price, e))
            })?;
            Ok(OrderItemInput {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price,
            })
        })
        .collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Every referenced product is confirmed with the product service before the
/// order and its items are written in a single transaction. If any product is
/// unknown, or the product service cannot be reached, nothing is stored.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "A referenced product does not exist"),
        (status = 422, description = "Invalid order data"),
        (status = 503, description = "Product service unavailable"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order = NewOrder {
        customer_id: body.customer_id,
        shipping_address: body.shipping_address,
        items: parse_items(body.items)?,
    };

    let created = service.create_order(order).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(created)))
}

/// GET /orders
///
/// Newest orders first, each with its items.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses((status = 200, description = "Orders", body = [OrderResponse])),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<OrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let skip = params.skip.max(0);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);

    let orders: Vec<OrderResponse> = service
        .list_orders(skip, limit, params.customer_id)
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /orders/{id}/status
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Unknown status"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .update_status(path.into_inner(), &body.status)
        .await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order and its items deleted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
