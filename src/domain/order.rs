use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;

const PRICE_SCALE: i64 = 2;
/// Whole digits that fit a `NUMERIC(10, 2)` column.
const MAX_WHOLE_DIGITS: i64 = 8;

/// Largest amount a price or total column can hold, 99999999.99.
fn max_amount() -> BigDecimal {
    BigDecimal::new(9_999_999_999i64.into(), PRICE_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// An order as proposed by the caller, before any checks.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub shipping_address: Option<String>,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItemRecord {
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_purchase: BigDecimal,
    pub item_total: BigDecimal,
}

/// A checked order with its totals computed, ready to be written in one
/// transaction.
#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub customer_id: i32,
    pub status: OrderStatus,
    pub total_amount: BigDecimal,
    pub shipping_address: Option<String>,
    pub items: Vec<NewOrderItemRecord>,
}

impl NewOrder {
    /// Validates the line items and computes per-item and order totals.
    pub fn into_record(self) -> Result<NewOrderRecord, DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order must contain at least one item".to_string(),
            ));
        }

        let zero = BigDecimal::from(0);
        let mut total_amount = zero.with_scale(PRICE_SCALE);
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            if item.quantity <= 0 {
                return Err(DomainError::InvalidInput(format!(
                    "quantity for product {} must be positive",
                    item.product_id
                )));
            }
            // Digit checks run on the normalized form so that exponent
            // notation such as "1e2000000" is rejected before any rescaling.
            let normalized = item.unit_price.normalized();
            let (_, scale) = normalized.as_bigint_and_exponent();
            if scale > PRICE_SCALE {
                return Err(DomainError::InvalidInput(format!(
                    "unit_price for product {} has more than {PRICE_SCALE} decimal places",
                    item.product_id
                )));
            }
            if normalized.digits() as i64 - scale > MAX_WHOLE_DIGITS {
                return Err(DomainError::InvalidInput(format!(
                    "unit_price for product {} must be at most {}",
                    item.product_id,
                    max_amount()
                )));
            }
            if normalized < zero {
                return Err(DomainError::InvalidInput(format!(
                    "unit_price for product {} must not be negative",
                    item.product_id
                )));
            }

            let price_at_purchase = item.unit_price.with_scale(PRICE_SCALE);
            let item_total = price_at_purchase.clone() * BigDecimal::from(item.quantity);
            if item_total > max_amount() {
                return Err(DomainError::InvalidInput(format!(
                    "item total for product {} must be at most {}",
                    item.product_id,
                    max_amount()
                )));
            }
            total_amount += item_total.clone();
            items.push(NewOrderItemRecord {
                product_id: item.product_id,
                quantity: item.quantity,
                price_at_purchase,
                item_total,
            });
        }

        if total_amount > max_amount() {
            return Err(DomainError::InvalidInput(format!(
                "order total must be at most {}",
                max_amount()
            )));
        }

        Ok(NewOrderRecord {
            customer_id: self.customer_id,
            status: OrderStatus::Pending,
            total_amount,
            shipping_address: self.shipping_address,
            items,
        })
    }
}

impl NewOrderRecord {
    /// Distinct product ids in first-seen order.
    pub fn product_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !ids.contains(&item.product_id) {
                ids.push(item.product_id);
            }
        }
        ids
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemView {
    pub order_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_purchase: BigDecimal,
    pub item_total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: BigDecimal,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}
