//! Order management endpoints.

use crate::client::KiteClient;
use crate::error::{KiteError, Result};
use crate::types::enums::Variety;
use crate::types::orders::*;

impl KiteClient {
    /// Retrieve all orders for the day.
    ///
    /// **Endpoint:** `GET /orders`
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.get("/orders").await
    }

    /// Place a new order.
    ///
    /// Only the optional fields that are set are sent. POST is not retried
    /// on transient statuses by the default retry policy.
    ///
    /// **Endpoint:** `POST /orders/{variety}`
    pub async fn place_order(&self, req: &PlaceOrderRequest) -> Result<OrderId> {
        let resp: OrderResponse = self
            .post_form(&format!("/orders/{}", req.variety), req)
            .await?;
        expect_order_id(resp)
    }

    /// Modify a pending order.
    ///
    /// **Endpoint:** `PUT /orders/{variety}/{order_id}`
    pub async fn modify_order(&self, req: &ModifyOrderRequest) -> Result<OrderId> {
        let resp: OrderResponse = self
            .put_form(&format!("/orders/{}/{}", req.variety, req.order_id), req)
            .await?;
        expect_order_id(resp)
    }

    /// Cancel a pending order. `parent_order_id` is sent only when given.
    ///
    /// **Endpoint:** `DELETE /orders/{variety}/{order_id}`
    pub async fn cancel_order(
        &self,
        variety: Variety,
        order_id: &str,
        parent_order_id: Option<&str>,
    ) -> Result<OrderId> {
        let body = CancelOrderRequest { parent_order_id };
        let resp: OrderResponse = self
            .delete_form(&format!("/orders/{variety}/{order_id}"), &body)
            .await?;
        expect_order_id(resp)
    }
}

fn expect_order_id(resp: OrderResponse) -> Result<OrderId> {
    resp.order_id
        .ok_or_else(|| KiteError::Shape("order response has no `order_id`".into()))
}
