//! Customer details collected by the checkout form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Name, email and shipping address for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CheckoutDetails {
    /// Customer's full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Shipping address, free-form.
    pub address: String,
}

impl CheckoutDetails {
    /// Create details, trimming surrounding whitespace from every field.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            address: address.into().trim().to_string(),
        }
    }

    /// Fields that are blank or malformed, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if !is_valid_email(self.email.trim()) {
            missing.push("email");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Check if every field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fail with [`CommerceError::CheckoutIncomplete`] naming the bad fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }
}

/// Something before and after a single `@`, with no whitespace.
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
