use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Cents, NewOrder, Order, OrderLineDetail, OrderStatusType},
};

const ORDER_COLUMNS: &str = "id, customer_id, restaurant_id, fulfillment, status, created_at";

/// Inserts the order header with a `pending` status and returns the new id. This is not atomic on its own. Embed the
/// call in a transaction together with the line inserts, passing `&mut *tx` as the connection argument.
pub async fn insert_order_header(order: &NewOrder, conn: &mut SqliteConnection) -> Result<i64, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO orders (customer_id, restaurant_id, fulfillment, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(order.customer_id)
    .bind(order.restaurant_id)
    .bind(order.fulfillment)
    .bind(OrderStatusType::Pending)
    .fetch_one(conn)
    .await?;
    trace!("🗃️ Order header #{id} inserted for customer #{}", order.customer_id);
    Ok(id)
}

/// Inserts a single order line with an already-computed subtotal.
pub async fn insert_order_line(
    order_id: i64,
    product_id: i64,
    quantity: i64,
    subtotal: Cents,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO order_lines (order_id, product_id, quantity, subtotal)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(subtotal)
    .fetch_one(conn)
    .await?;
    trace!("🗃️ Line #{id} (product #{product_id} × {quantity} = {subtotal}) added to order #{order_id}");
    Ok(id)
}

pub async fn fetch_order(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Fetches the lines of an order, joined with the product names, in insertion order.
pub async fn fetch_order_lines(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderLineDetail>, SqliteDatabaseError> {
    let lines = sqlx::query_as::<_, OrderLineDetail>(
        r#"
            SELECT order_lines.product_id, products.name, order_lines.quantity, order_lines.subtotal
            FROM order_lines
            JOIN products ON products.id = order_lines.product_id
            WHERE order_lines.order_id = $1
            ORDER BY order_lines.id
        "#,
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(lines)
}

/// Returns all the orders for the given customer, ordered by `created_at` in ascending order
pub async fn fetch_orders_for_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at, id"
    ))
    .bind(customer_id)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}
