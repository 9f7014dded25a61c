use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::OrderManagement,
    db_types::{Order, OrderWithLines},
    rms_api::{OrderFlowError, OrderRequest},
};

/// `OrderFlowApi` places orders against the live catalog and reads them back.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({:?})", self.db)
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Places an order for `customer`.
    ///
    /// The request is validated before anything is written (see [`OrderRequest::validate`]). The header and all the
    /// lines are then written in a single transaction, each line priced at the product's current price. If any
    /// product does not exist, nothing is persisted and [`OrderFlowError::ProductNotFound`] is returned.
    pub async fn place_order(&self, customer: Option<i64>, request: OrderRequest) -> Result<i64, OrderFlowError> {
        let order = request.validate(customer)?;
        let customer_id = order.customer_id;
        let line_count = order.lines.len();
        let order_id = self.db.insert_order(order).await.map_err(|e| {
            warn!("📦️ Order for customer #{customer_id} was not placed. {e}");
            e
        })?;
        info!("📦️ Order #{order_id} placed for customer #{customer_id} with {line_count} lines");
        Ok(order_id)
    }

    /// Fetches an order together with its lines. If no order exists, `None` is returned.
    pub async fn order_by_id(&self, id: i64) -> Result<Option<OrderWithLines>, OrderFlowError> {
        self.db.fetch_order_with_lines(id).await
    }

    pub async fn orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders_for_customer(customer_id).await?;
        trace!("📦️ {} orders found for customer #{customer_id}", orders.len());
        Ok(orders)
    }
}
