//! Checkout service.

use std::sync::Arc;

use jiff::Timestamp;
use kindhope::{cart::CheckoutTicket, forms::PaymentForm};
use tracing::info;

use crate::{
    domain::checkout::{
        errors::CheckoutServiceError,
        models::{OrderConfirmation, OrderUuid},
    },
    storage::{ObjectStorage, file_name},
};

const SLIP_PREFIX: &str = "paymentSlips";

pub struct CheckoutService {
    storage: Arc<dyn ObjectStorage>,
}

impl CheckoutService {
    #[must_use]
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Upload a payment slip and return its download URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[tracing::instrument(name = "checkout.upload_slip", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_slip(
        &self,
        source_uri: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CheckoutServiceError> {
        let path = format!("{SLIP_PREFIX}/{}", file_name(source_uri));

        Ok(self.storage.put(&path, bytes).await?)
    }

    /// Confirm an order for the checked-out lines.
    ///
    /// The cart itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment form is incomplete or the phone number
    /// is invalid.
    #[tracing::instrument(
        name = "checkout.place_order",
        skip(self, ticket, form),
        fields(subtotal = %ticket.subtotal, lines = ticket.lines.len())
    )]
    pub fn place_order(
        &self,
        ticket: &CheckoutTicket,
        form: &PaymentForm,
    ) -> Result<OrderConfirmation, CheckoutServiceError> {
        let shipping = form.validate()?;

        let order = OrderConfirmation {
            uuid: OrderUuid::now(),
            subtotal: ticket.subtotal,
            lines: ticket.lines.clone(),
            shipping,
            placed_at: Timestamp::now(),
        };

        info!(order_uuid = %order.uuid, "order placed");

        Ok(order)
    }
}
