//! Payment-option rules for event records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A purchasable option on an event: checkout link plus price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub link: String,
    pub price: f64,
}

/// The `payment_link` column payload: option title -> option.
pub type PaymentOptions = BTreeMap<String, PaymentOption>;

/// Validate payment options: every entry needs a non-empty title and a
/// non-empty checkout link.
pub fn validate_payment_options(options: &PaymentOptions) -> Result<(), CoreError> {
    for (title, option) in options {
        if title.trim().is_empty() || option.link.trim().is_empty() {
            return Err(CoreError::Validation(
                "Both payment title and link must be provided".into(),
            ));
        }
    }
    Ok(())
}
