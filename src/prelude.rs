//! KindHope prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartPhase, CartSummary, CheckoutBlock, CheckoutGate, CheckoutTicket,
        RemovalOutcome,
    },
    fixtures::{CartFixture, FixtureError},
    forms::{
        DonationError, DonationForm, PaymentError, PaymentForm, ShippingDetails, SignUpError,
        SignUpForm, embedding_text, is_valid_phone_number,
    },
    lines::{CartLine, ImageUrls, LineId},
    listings::{Category, Condition, LabelError, Listing, ListingId, NewListing, in_category, search},
    pricing::{compute_subtotal, format_amount, parse_price, price_value, to_money},
    profiles::{ProfileUpdate, UserProfile},
    report::{CartReport, ReportError},
    selection::SelectionState,
};
