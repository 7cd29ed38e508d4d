//! Produce listing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{parse_body, FieldError, FieldKind, FieldSpec};

use super::Patch;

/// A produce listing put up for sale by a farmer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Sale unit the price refers to ("kg", "dozen", "bunch").
    pub unit: String,
    pub category: String,
    pub image_url: Option<String>,
    pub is_organic: bool,
    pub farmer_id: String,
    pub stock: i32,
    pub location: Option<String>,
    pub rating: Decimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a new listing. Ratings start at zero and are not
/// client-settable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub unit: String,
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_organic: bool,
    pub farmer_id: String,
    #[serde(default)]
    pub stock: i32,
    pub location: Option<String>,
}

impl NewProduct {
    pub const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::required("price", FieldKind::Decimal),
        FieldSpec::required("unit", FieldKind::Text),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::optional("imageUrl", FieldKind::Text),
        FieldSpec::optional("isOrganic", FieldKind::Boolean),
        FieldSpec::required("farmerId", FieldKind::Text),
        FieldSpec::optional("stock", FieldKind::Integer),
        FieldSpec::optional("location", FieldKind::Text),
    ];

    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        parse_body(body, Self::SCHEMA)
    }
}

/// Field-by-field update for a product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_organic: Option<bool>,
    pub farmer_id: Option<String>,
    pub stock: Option<i32>,
    pub location: Option<String>,
}

impl Patch<Product> for ProductPatch {
    fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(is_organic) = self.is_organic {
            product.is_organic = is_organic;
        }
        if let Some(farmer_id) = self.farmer_id {
            product.farmer_id = farmer_id;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(location) = self.location {
            product.location = Some(location);
        }
    }
}
