use crate::{
    db_types::{NewOrder, Order, OrderWithLines},
    rms_api::OrderFlowError,
};

/// The order ledger.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Writes the order header and every one of its lines in a single transaction, pricing each line from the current
    /// catalog price. Either the whole order is persisted and its id returned, or nothing is.
    ///
    /// A line referencing a product that does not exist fails with [`OrderFlowError::ProductNotFound`].
    async fn insert_order(&self, order: NewOrder) -> Result<i64, OrderFlowError>;

    async fn fetch_order_with_lines(&self, id: i64) -> Result<Option<OrderWithLines>, OrderFlowError>;

    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, OrderFlowError>;
}
