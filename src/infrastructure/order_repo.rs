use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderRecord, OrderItemView, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

fn to_view(order: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    let status: OrderStatus = order.status.parse().map_err(|_| {
        DomainError::Internal(format!(
            "order {} has unrecognised status '{}'",
            order.order_id, order.status
        ))
    })?;

    Ok(OrderView {
        order_id: order.order_id,
        customer_id: order.customer_id,
        order_date: order.order_date,
        status,
        total_amount: order.total_amount,
        shipping_address: order.shipping_address,
        created_at: order.created_at,
        updated_at: order.updated_at,
        items: items
            .into_iter()
            .map(|i| OrderItemView {
                order_item_id: i.order_item_id,
                product_id: i.product_id,
                quantity: i.quantity,
                price_at_purchase: i.price_at_purchase,
                item_total: i.item_total,
            })
            .collect(),
    })
}

fn load_items(conn: &mut PgConnection, order: &OrderRow) -> QueryResult<Vec<OrderItemRow>> {
    OrderItemRow::belonging_to(order)
        .select(OrderItemRow::as_select())
        .order(order_items::order_item_id.asc())
        .load(conn)
}

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrderRecord) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let row = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_id: order.customer_id,
                    status: order.status.as_str().to_string(),
                    total_amount: order.total_amount.clone(),
                    shipping_address: order.shipping_address.clone(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert its items
            let new_items: Vec<NewOrderItemRow> = order
                .items
                .iter()
                .map(|i| NewOrderItemRow {
                    order_id: row.order_id,
                    product_id: i.product_id,
                    quantity: i.quantity,
                    price_at_purchase: i.price_at_purchase.clone(),
                    item_total: i.item_total.clone(),
                })
                .collect();
            let items = diesel::insert_into(order_items::table)
                .values(&new_items)
                .returning(OrderItemRow::as_returning())
                .get_results(conn)?;

            to_view(row, items)
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, &order)?;
        to_view(order, items).map(Some)
    }

    fn list(
        &self,
        skip: i64,
        limit: i64,
        customer_id: Option<i32>,
    ) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut query = orders::table
                .select(OrderRow::as_select())
                .order(orders::order_id.desc())
                .limit(limit)
                .offset(skip)
                .into_boxed();
            if let Some(customer_id) = customer_id {
                query = query.filter(orders::customer_id.eq(customer_id));
            }
            let rows: Vec<OrderRow> = query.load(conn)?;

            let items = OrderItemRow::belonging_to(&rows)
                .select(OrderItemRow::as_select())
                .order(order_items::order_item_id.asc())
                .load::<OrderItemRow>(conn)?
                .grouped_by(&rows);

            rows.into_iter()
                .zip(items)
                .map(|(order, items)| to_view(order, items))
                .collect()
        })
    }

    fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order = diesel::update(orders::table.find(id))
                .set((
                    orders::status.eq(status.as_str()),
                    orders::updated_at.eq(Utc::now()),
                ))
                .returning(OrderRow::as_returning())
                .get_result(conn)
                .optional()?;

            let Some(order) = order else {
                return Ok(None);
            };

            let items = load_items(conn, &order)?;
            to_view(order, items).map(Some)
        })
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        // order_items rows go with it through ON DELETE CASCADE
        let deleted = diesel::delete(orders::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
