//! Order types: place, modify, cancel request bodies, order book rows.
//!
//! Request bodies are sent form-encoded. Optional fields that are `None` are
//! left out of the body entirely; Kite treats a missing field differently
//! from an empty one.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::enums::*;

// ---------------------------------------------------------------------------
// Order Id
// ---------------------------------------------------------------------------

/// Opaque order identifier assigned by the exchange gateway.
///
/// Deserialises from either a JSON string or a JSON integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "order_id must be a string or number, got {other}"
            ))),
        }
    }
}

/// `data` payload of place / modify / cancel responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderResponse {
    pub order_id: Option<OrderId>,
}

// ---------------------------------------------------------------------------
// Place Order
// ---------------------------------------------------------------------------

/// Request body for `POST /orders/{variety}`.
///
/// # Example
///
/// ```
/// use kite_rs::types::enums::*;
/// use kite_rs::types::orders::PlaceOrderRequest;
///
/// let req = PlaceOrderRequest::new(
///     Variety::REGULAR,
///     Exchange::NSE,
///     "INFY",
///     TransactionType::BUY,
///     1,
///     Product::CNC,
///     OrderType::LIMIT,
/// )
/// .with_price(1500.0)
/// .with_tag("swing");
/// assert_eq!(req.price, Some(1500.0));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest {
    /// Also used as the endpoint path segment.
    pub variety: Variety,
    pub exchange: Exchange,
    pub tradingsymbol: String,
    pub transaction_type: TransactionType,
    pub quantity: u64,
    pub product: Product,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<Validity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squareoff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoploss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stoploss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl PlaceOrderRequest {
    /// Build a request from the required fields; every optional field is unset.
    pub fn new(
        variety: Variety,
        exchange: Exchange,
        tradingsymbol: impl Into<String>,
        transaction_type: TransactionType,
        quantity: u64,
        product: Product,
        order_type: OrderType,
    ) -> Self {
        Self {
            variety,
            exchange,
            tradingsymbol: tradingsymbol.into(),
            transaction_type,
            quantity,
            product,
            order_type,
            price: None,
            validity: None,
            disclosed_quantity: None,
            trigger_price: None,
            squareoff: None,
            stoploss: None,
            trailing_stoploss: None,
            tag: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_validity(mut self, validity: Validity) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn with_disclosed_quantity(mut self, quantity: u64) -> Self {
        self.disclosed_quantity = Some(quantity);
        self
    }

    pub fn with_trigger_price(mut self, price: f64) -> Self {
        self.trigger_price = Some(price);
        self
    }

    pub fn with_squareoff(mut self, squareoff: f64) -> Self {
        self.squareoff = Some(squareoff);
        self
    }

    pub fn with_stoploss(mut self, stoploss: f64) -> Self {
        self.stoploss = Some(stoploss);
        self
    }

    pub fn with_trailing_stoploss(mut self, trailing: f64) -> Self {
        self.trailing_stoploss = Some(trailing);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Modify Order
// ---------------------------------------------------------------------------

/// Request body for `PUT /orders/{variety}/{order_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ModifyOrderRequest {
    pub variety: Variety,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<Validity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u64>,
}

impl ModifyOrderRequest {
    pub fn new(variety: Variety, order_id: impl Into<String>) -> Self {
        Self {
            variety,
            order_id: order_id.into(),
            parent_order_id: None,
            quantity: None,
            price: None,
            order_type: None,
            trigger_price: None,
            validity: None,
            disclosed_quantity: None,
        }
    }

    pub fn with_parent_order_id(mut self, id: impl Into<String>) -> Self {
        self.parent_order_id = Some(id.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn with_trigger_price(mut self, price: f64) -> Self {
        self.trigger_price = Some(price);
        self
    }

    pub fn with_validity(mut self, validity: Validity) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn with_disclosed_quantity(mut self, quantity: u64) -> Self {
        self.disclosed_quantity = Some(quantity);
        self
    }
}

// ---------------------------------------------------------------------------
// Cancel Order
// ---------------------------------------------------------------------------

/// Body of `DELETE /orders/{variety}/{order_id}`; empty unless a parent is given.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CancelOrderRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_order_id: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Order Book
// ---------------------------------------------------------------------------

/// A row of the day's order book.
///
/// Returned by `GET /orders`. Enumerated fields are kept as strings since the
/// book also reports values this crate does not model (e.g. `iceberg`
/// variety, `TRIGGER PENDING` status).
#[derive(Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct Order {
    pub order_id: OrderId,
    pub parent_order_id: Option<OrderId>,
    pub exchange_order_id: Option<String>,
    pub placed_by: Option<String>,
    pub variety: Option<String>,
    pub status: Option<String>,
    pub status_message: Option<String>,
    pub tradingsymbol: Option<String>,
    pub exchange: Option<String>,
    #[serde(default)]
    pub instrument_token: Option<u64>,
    pub transaction_type: Option<String>,
    pub order_type: Option<String>,
    pub product: Option<String>,
    pub validity: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub trigger_price: Option<f64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub disclosed_quantity: Option<u64>,
    #[serde(default)]
    pub filled_quantity: Option<u64>,
    #[serde(default)]
    pub pending_quantity: Option<u64>,
    #[serde(default)]
    pub cancelled_quantity: Option<u64>,
    pub order_timestamp: Option<String>,
    pub exchange_timestamp: Option<String>,
    pub tag: Option<String>,
    pub guid: Option<String>,
}
