use serde::{Deserialize, Serialize};

use crate::{
    db_types::{FulfillmentType, NewOrder, NewOrderLine},
    rms_api::OrderFlowError,
};

/// A cart as submitted by a client. Fields are optional so that the order placement checks can report exactly what
/// is wrong with a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default, alias = "id_restaurante")]
    pub restaurant_id: Option<i64>,
    #[serde(default, rename = "type", alias = "tipo")]
    pub fulfillment: Option<String>,
    #[serde(default, alias = "productos")]
    pub products: Option<Vec<CartLine>>,
    /// Only honoured when the service trusts unauthenticated callers to name the customer.
    #[serde(default, alias = "id_usuario")]
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default, alias = "id_producto")]
    pub id: Option<i64>,
    #[serde(default, alias = "cantidad")]
    pub quantity: Option<i64>,
}

impl CartLine {
    pub fn new(id: i64, quantity: i64) -> Self {
        Self { id: Some(id), quantity: Some(quantity) }
    }
}

impl OrderRequest {
    pub fn new(restaurant_id: i64, fulfillment: FulfillmentType, products: Vec<CartLine>) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
            fulfillment: Some(fulfillment.to_string()),
            products: Some(products),
            customer_id: None,
        }
    }

    /// Turns the cart into a [`NewOrder`] for `customer`.
    ///
    /// The checks run in a fixed order and the first failure wins:
    /// 1. a customer is known, else [`OrderFlowError::Unauthenticated`];
    /// 2. restaurant, type and a non-empty product list are present, and every line has an id and a quantity of at
    ///    least 1, else [`OrderFlowError::InvalidInput`];
    /// 3. the type is a known fulfillment type, else [`OrderFlowError::InvalidInput`].
    ///
    /// Whether the products exist is only known once the order is written.
    pub fn validate(self, customer: Option<i64>) -> Result<NewOrder, OrderFlowError> {
        let customer_id = customer.ok_or(OrderFlowError::Unauthenticated)?;
        let (Some(restaurant_id), Some(fulfillment), Some(products)) =
            (self.restaurant_id, self.fulfillment, self.products)
        else {
            return Err(OrderFlowError::InvalidInput("restaurant_id, type and products are required".into()));
        };
        if products.is_empty() {
            return Err(OrderFlowError::InvalidInput("An order must contain at least one product".into()));
        }
        let lines = products
            .into_iter()
            .map(|line| match (line.id, line.quantity) {
                (Some(product_id), Some(quantity)) if quantity >= 1 => Ok(NewOrderLine { product_id, quantity }),
                (Some(product_id), Some(quantity)) => Err(OrderFlowError::InvalidInput(format!(
                    "The quantity for product #{product_id} must be at least 1, not {quantity}"
                ))),
                _ => Err(OrderFlowError::InvalidInput("Every product needs an id and a quantity".into())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fulfillment =
            fulfillment.parse::<FulfillmentType>().map_err(|e| OrderFlowError::InvalidInput(e.to_string()))?;
        Ok(NewOrder { customer_id, restaurant_id, fulfillment, lines })
    }
}
