//! Date-slot availability rules.
//!
//! Events carry one or more date slots keyed by a `DD/MM/YYYY` string, each
//! holding a start time and an availability status. Status values are stored
//! verbatim and rendered as-is by the frontend, so the constants here must
//! match what existing rows contain.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Slot with open availability.
pub const STATUS_AVAILABLE: &str = "disponibles";

/// Slot that is nearly full but still bookable.
pub const STATUS_LIMITED: &str = "pocas unidades";

/// Sold-out slot.
pub const STATUS_SOLD_OUT: &str = "agotado";

/// Slot keys are day-first dates, e.g. `14/09/2025`.
pub const SLOT_DATE_FORMAT: &str = "%d/%m/%Y";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single date slot: start time plus availability status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSlot {
    /// Start time of the slot, e.g. `"20:00"`.
    pub time: String,
    /// One of the `STATUS_*` constants.
    pub status: String,
}

/// The `date_times` column payload: slot key -> slot.
pub type DateSlots = BTreeMap<String, DateSlot>;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Whether a slot status still accepts registrations.
pub fn is_bookable(status: &str) -> bool {
    status == STATUS_AVAILABLE || status == STATUS_LIMITED
}

/// Parse a `DD/MM/YYYY` slot key into a calendar date.
pub fn parse_slot_date(key: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(key, SLOT_DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("Invalid date '{key}', expected DD/MM/YYYY"))
    })
}

/// Validate the slot map for create/update: at least one slot is required
/// and every key must be a parseable `DD/MM/YYYY` date.
pub fn validate_date_slots(slots: &DateSlots) -> Result<(), CoreError> {
    if slots.is_empty() {
        return Err(CoreError::Validation(
            "At least one start date and time is required".into(),
        ));
    }
    for key in slots.keys() {
        parse_slot_date(key)?;
    }
    Ok(())
}

/// The earliest slot (by calendar date) that still accepts registrations.
///
/// Returns the slot key. Unparseable keys are skipped rather than treated as
/// errors so one malformed key cannot hide the rest of the schedule.
pub fn first_bookable_date(slots: &DateSlots) -> Option<&str> {
    slots
        .iter()
        .filter(|(_, slot)| is_bookable(&slot.status))
        .filter_map(|(key, _)| parse_slot_date(key).ok().map(|date| (date, key.as_str())))
        .min_by_key(|(date, _)| *date)
        .map(|(_, key)| key)
}

/// Signed number of whole days from `today` until `date`.
///
/// Negative when the date is in the past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}
