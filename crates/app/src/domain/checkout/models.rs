//! Checkout models

use jiff::Timestamp;
use kindhope::{forms::ShippingDetails, lines::LineId};
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

pub type OrderUuid = TypedUuid<OrderConfirmation>;

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub uuid: OrderUuid,
    pub subtotal: Decimal,
    pub lines: Vec<LineId>,
    pub shipping: ShippingDetails,
    pub placed_at: Timestamp,
}
