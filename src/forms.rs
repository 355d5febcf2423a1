//! Forms
//!
//! Validation for the donation, payment and sign-up forms. Fields arrive as
//! raw text.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{
    lines::ImageUrls,
    listings::{Category, Condition, LabelError, NewListing},
    profiles::UserProfile,
};

/// Number of photos a donation needs.
pub const DONATION_IMAGE_COUNT: usize = 2;

/// Whether `phone` is exactly ten ASCII digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Errors validating a donation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DonationError {
    /// A required field is blank or a photo is missing.
    #[error("please fill all fields and upload 2 images")]
    MissingFields,

    /// The contact number is not ten digits.
    #[error("please enter a 10-digit phone number")]
    InvalidPhoneNumber,

    /// Category or condition is not one of the accepted labels.
    #[error(transparent)]
    Label(#[from] LabelError),
}

/// Raw donation form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonationForm {
    /// Optional item name.
    pub name: Option<String>,

    /// Description.
    pub description: String,

    /// Category label.
    pub category: String,

    /// Condition label.
    pub condition: String,

    /// Price as typed.
    pub price: String,

    /// Donor phone number.
    pub contact_number: String,

    /// Donor email.
    pub email: String,

    /// Uploaded photo URLs by slot. Empty slots are `None`.
    pub images: [Option<String>; DONATION_IMAGE_COUNT],
}

impl DonationForm {
    /// Validates the form into a listing without an embedding.
    ///
    /// # Errors
    ///
    /// - [`DonationError::MissingFields`]: a field is blank or a photo slot is empty.
    /// - [`DonationError::InvalidPhoneNumber`]: the contact number is not ten digits.
    /// - [`DonationError::Label`]: unknown category or condition.
    pub fn validate(&self) -> Result<NewListing, DonationError> {
        let required = [
            &self.description,
            &self.category,
            &self.condition,
            &self.price,
            &self.contact_number,
            &self.email,
        ];

        let images: ImageUrls = self
            .images
            .iter()
            .filter_map(|image| image.as_deref().filter(|url| present(url)))
            .map(ToString::to_string)
            .collect();

        if !required.iter().all(|value| present(value)) || images.len() != DONATION_IMAGE_COUNT {
            return Err(DonationError::MissingFields);
        }

        if !is_valid_phone_number(self.contact_number.trim()) {
            return Err(DonationError::InvalidPhoneNumber);
        }

        let category = self.category.parse::<Category>()?;
        let condition = self.condition.parse::<Condition>()?;

        Ok(NewListing {
            name: self.name.clone().filter(|name| present(name)),
            description: self.description.trim().to_string(),
            category,
            condition,
            price: self.price.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            email: self.email.trim().to_string(),
            images,
            embedding: None,
        })
    }
}

/// Text sent to the embedding provider for a listing.
pub fn embedding_text(listing: &NewListing) -> String {
    format!(
        "{} {} {}",
        listing.description, listing.category, listing.condition
    )
}

/// Errors validating the payment form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// A field is blank or no payment slip was uploaded.
    #[error("please fill all fields and upload a payment slip")]
    MissingInformation,

    /// The phone number is not ten digits.
    #[error("please enter a valid 10-digit phone number")]
    InvalidPhoneNumber,
}

/// Raw payment form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentForm {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Shipping address.
    pub address: String,

    /// URL of the uploaded payment slip.
    pub slip_url: Option<String>,
}

/// Validated contact and shipping details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShippingDetails {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Shipping address.
    pub address: String,

    /// URL of the uploaded payment slip.
    pub slip_url: String,
}

impl PaymentForm {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::MissingInformation`]: a field is blank or no slip was uploaded.
    /// - [`PaymentError::InvalidPhoneNumber`]: the phone number is not ten digits.
    pub fn validate(&self) -> Result<ShippingDetails, PaymentError> {
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
        ];

        let slip_url = self
            .slip_url
            .as_deref()
            .filter(|url| present(url))
            .ok_or(PaymentError::MissingInformation)?;

        if !fields.iter().all(|value| present(value)) {
            return Err(PaymentError::MissingInformation);
        }

        if !is_valid_phone_number(self.phone.trim()) {
            return Err(PaymentError::InvalidPhoneNumber);
        }

        Ok(ShippingDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            slip_url: slip_url.to_string(),
        })
    }
}

/// Errors validating the sign-up form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignUpError {
    /// A field is blank.
    #[error("please fill in all fields")]
    MissingFields,

    /// The phone number is not ten digits.
    #[error("please enter a valid 10-digit phone number")]
    InvalidPhoneNumber,
}

/// Raw sign-up form input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email.
    pub email: String,

    /// Password, handed to the auth provider and never stored in the profile.
    pub password: String,

    /// Phone number.
    pub phone: String,

    /// Shipping address.
    pub address: String,
}

impl Debug for SignUpForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SignUpForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl SignUpForm {
    /// Validates the form and builds the profile to store.
    ///
    /// # Errors
    ///
    /// - [`SignUpError::MissingFields`]: a field, the password included, is blank.
    /// - [`SignUpError::InvalidPhoneNumber`]: the phone number is not ten digits.
    pub fn validate(&self) -> Result<UserProfile, SignUpError> {
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.address,
            &self.email,
            &self.password,
        ];

        if !fields.iter().all(|value| present(value)) {
            return Err(SignUpError::MissingFields);
        }

        if !is_valid_phone_number(self.phone.trim()) {
            return Err(SignUpError::InvalidPhoneNumber);
        }

        Ok(UserProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}
