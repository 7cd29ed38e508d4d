//! Rental booking models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{parse_body, FieldError, FieldKind, FieldSpec};

/// A booking of a tool for a date range. Status is free-form text; by
/// convention one of "pending", "confirmed", "active", "completed" or
/// "cancelled".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: String,
    pub tool_id: String,
    pub renter_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a booking. Bookings are append-only; there is no
/// update path once one is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRental {
    pub tool_id: String,
    pub renter_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Decimal,
    pub status: String,
}

impl NewRental {
    pub const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::required("toolId", FieldKind::Text),
        FieldSpec::required("renterId", FieldKind::Text),
        FieldSpec::required("startDate", FieldKind::Timestamp),
        FieldSpec::required("endDate", FieldKind::Timestamp),
        FieldSpec::required("totalCost", FieldKind::Decimal),
        FieldSpec::required("status", FieldKind::Text),
    ];

    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        parse_body(body, Self::SCHEMA)
    }
}
