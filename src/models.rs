use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Service id → display name, used to resolve services that only carry an id.
pub type ServiceNames = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A transaction record as the app stores it. Field presence and types vary
/// between app versions, so scalars stay as JSON values until normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransaction {
    #[serde(deserialize_with = "lenient_items")]
    pub products: Option<Vec<RawItem>>,
    #[serde(deserialize_with = "lenient_items")]
    pub services: Option<Vec<RawItem>>,
    /// Legacy singular array from older app builds.
    #[serde(deserialize_with = "lenient_items")]
    pub service: Option<Vec<RawItem>>,
    pub amount: Option<Value>,
    pub gst_percentage: Option<Value>,
    pub description: Option<Value>,
    pub total_amount: Option<Value>,
    pub line_tax: Option<Value>,
    pub date: Option<Value>,
    pub due_date: Option<Value>,
    pub invoice_number: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub notes: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    pub name: Option<Value>,
    pub product_name: Option<Value>,
    /// Either an embedded product object or a bare product id.
    pub product: Option<Value>,
    pub service_name: Option<Value>,
    /// Either an embedded service object or a service id.
    pub service: Option<Value>,
    pub description: Option<Value>,
    pub quantity: Option<Value>,
    pub amount: Option<Value>,
    pub price_per_unit: Option<Value>,
    pub unit_type: Option<Value>,
    pub other_unit: Option<Value>,
    pub unit: Option<Value>,
    pub unit_name: Option<Value>,
    pub gst_percentage: Option<Value>,
    pub line_tax: Option<Value>,
    pub line_total: Option<Value>,
    pub hsn: Option<Value>,
    pub sac: Option<Value>,
}

/// Accept any JSON for an item array. Non-arrays count as absent and
/// non-object elements are dropped.
fn lenient_items<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<RawItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(elements)) = value else {
        return Ok(None);
    };
    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            tracing::warn!(index, "skipping non-object entry in item array");
            continue;
        }
        match serde_json::from_value::<RawItem>(element) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable item"),
        }
    }
    Ok(Some(items))
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

/// The seller issuing the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub name: Option<String>,
    pub gstin: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Company {
    pub fn has_gstin(&self) -> bool {
        self.gstin.as_deref().is_some_and(|g| !g.trim().is_empty())
    }

    /// True when nothing identifies the seller, so a configured default may stand in.
    pub fn is_unset(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty()) && !self.has_gstin()
    }
}

/// The buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: Option<String>,
    pub gstin: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Ship-to address when it differs from the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub name: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalized lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Product,
    Service,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedLineItem {
    pub item_type: ItemType,
    pub name: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub price_per_unit: f64,
    pub amount: f64,
    /// `None` when the rate is zero so renderers can drop the column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<f64>,
    pub line_tax: f64,
    pub line_total: f64,
    /// HSN for products, SAC for services.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
