use chrono::NaiveDateTime;
use common::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartDto;

/// Order as exchanged over HTTP, embedding its cart.
///
/// `orderDate` travels in the `dd-MM-yyyy__HH:mm:ss:SSSSSS` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default, with = "common::date_time")]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub order_desc: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub order_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartDto>,
}
