//! Equipment listing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{parse_body, FieldError, FieldKind, FieldSpec};

use super::Patch;

/// A piece of equipment listed for daily rental.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub daily_rate: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub owner_id: String,
    pub location: Option<String>,
    pub is_available: bool,
    pub rating: Decimal,
    pub review_count: i32,
    /// Set when the tool is booked out; earliest date it frees up again.
    pub next_available_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a new listing. Tools start available unless the owner
/// says otherwise; ratings start at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    pub name: String,
    pub description: Option<String>,
    pub daily_rate: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub owner_id: String,
    pub location: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub next_available_date: Option<DateTime<Utc>>,
}

fn default_available() -> bool {
    true
}

impl NewTool {
    pub const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::required("dailyRate", FieldKind::Decimal),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::optional("imageUrl", FieldKind::Text),
        FieldSpec::required("ownerId", FieldKind::Text),
        FieldSpec::optional("location", FieldKind::Text),
        FieldSpec::optional("isAvailable", FieldKind::Boolean),
        FieldSpec::optional("nextAvailableDate", FieldKind::Timestamp),
    ];

    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        parse_body(body, Self::SCHEMA)
    }
}

/// Field-by-field update for a tool.
#[derive(Debug, Clone, Default)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Option<String>,
    pub location: Option<String>,
    pub is_available: Option<bool>,
    pub next_available_date: Option<DateTime<Utc>>,
}

impl Patch<Tool> for ToolPatch {
    fn apply_to(self, tool: &mut Tool) {
        if let Some(name) = self.name {
            tool.name = name;
        }
        if let Some(description) = self.description {
            tool.description = Some(description);
        }
        if let Some(daily_rate) = self.daily_rate {
            tool.daily_rate = daily_rate;
        }
        if let Some(category) = self.category {
            tool.category = category;
        }
        if let Some(image_url) = self.image_url {
            tool.image_url = Some(image_url);
        }
        if let Some(owner_id) = self.owner_id {
            tool.owner_id = owner_id;
        }
        if let Some(location) = self.location {
            tool.location = Some(location);
        }
        if let Some(is_available) = self.is_available {
            tool.is_available = is_available;
        }
        if let Some(next_available_date) = self.next_available_date {
            tool.next_available_date = Some(next_available_date);
        }
    }
}
