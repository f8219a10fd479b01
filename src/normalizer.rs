//! Raw transaction → unified line items.
//!
//! Products, services and the legacy `service` array are flattened into one
//! ordered list. Output order is products, then services, then legacy
//! services, each in input order; serial numbers on printed invoices rely on it.

use crate::fields::{self, Accessor};
use crate::models::{ItemType, RawItem, RawTransaction, ServiceNames, UnifiedLineItem};

pub const DEFAULT_NAME: &str = "Item";
pub const DEFAULT_UNIT: &str = "piece";
const OTHER_UNIT_TYPE: &str = "Other";

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

fn item_name(item: &RawItem) -> Option<String> {
    fields::text(item.name.as_ref())
}

fn item_product_name(item: &RawItem) -> Option<String> {
    fields::text(item.product_name.as_ref())
}

fn embedded_product_name(item: &RawItem) -> Option<String> {
    fields::nested_text(item.product.as_ref(), "name")
}

fn item_service_name(item: &RawItem) -> Option<String> {
    fields::text(item.service_name.as_ref())
}

fn embedded_service_name(item: &RawItem) -> Option<String> {
    fields::nested_text(item.service.as_ref(), "serviceName")
}

const PRODUCT_NAME_CHAIN: &[Accessor<RawItem>] =
    &[item_name, item_product_name, embedded_product_name];

const SERVICE_NAME_CHAIN: &[Accessor<RawItem>] = &[
    item_name,
    item_product_name,
    embedded_product_name,
    item_service_name,
    embedded_service_name,
];

fn resolve_name(item: &RawItem, item_type: ItemType, service_names: &ServiceNames) -> String {
    let resolved = match item_type {
        ItemType::Product => fields::first_text(item, PRODUCT_NAME_CHAIN),
        ItemType::Service => fields::first_text(item, SERVICE_NAME_CHAIN).or_else(|| {
            fields::id_key(item.service.as_ref())
                .and_then(|id| service_names.get(&id))
                .filter(|name| !name.trim().is_empty())
                .cloned()
        }),
    };
    resolved.unwrap_or_else(|| DEFAULT_NAME.to_string())
}

// ---------------------------------------------------------------------------
// Unit resolution
// ---------------------------------------------------------------------------

fn custom_unit(item: &RawItem) -> Option<String> {
    match fields::text(item.unit_type.as_ref()) {
        Some(t) if t == OTHER_UNIT_TYPE => fields::text(item.other_unit.as_ref()),
        _ => None,
    }
}

fn declared_unit_type(item: &RawItem) -> Option<String> {
    fields::text(item.unit_type.as_ref()).filter(|t| t != OTHER_UNIT_TYPE)
}

fn plain_unit(item: &RawItem) -> Option<String> {
    fields::text(item.unit.as_ref())
}

fn unit_name(item: &RawItem) -> Option<String> {
    fields::text(item.unit_name.as_ref())
}

const UNIT_CHAIN: &[Accessor<RawItem>] = &[custom_unit, declared_unit_type, plain_unit, unit_name];

fn resolve_unit(item: &RawItem) -> String {
    fields::first_text(item, UNIT_CHAIN).unwrap_or_else(|| DEFAULT_UNIT.to_string())
}

// ---------------------------------------------------------------------------
// Line construction
// ---------------------------------------------------------------------------

/// Zero and unreadable rates collapse to `None`.
fn gst_rate(value: Option<&serde_json::Value>) -> Option<f64> {
    fields::number(value).filter(|r| *r != 0.0)
}

fn unify_item(item: &RawItem, item_type: ItemType, service_names: &ServiceNames) -> UnifiedLineItem {
    let quantity = match item_type {
        ItemType::Service => 1.0,
        ItemType::Product => fields::number(item.quantity.as_ref())
            .filter(|q| *q > 0.0)
            .unwrap_or(1.0),
    };

    let given_amount = fields::number(item.amount.as_ref());
    let price_per_unit = match fields::number(item.price_per_unit.as_ref()) {
        Some(p) => p,
        None => match given_amount {
            Some(a) if quantity > 0.0 => fields::finite_or(a / quantity, 0.0),
            _ => 0.0,
        },
    }
    .max(0.0);
    let amount = given_amount.unwrap_or_else(|| fields::finite_or(price_per_unit * quantity, 0.0));

    let gst_percentage = gst_rate(item.gst_percentage.as_ref());
    let line_tax = fields::number(item.line_tax.as_ref())
        .unwrap_or_else(|| fields::finite_or(amount * gst_percentage.unwrap_or(0.0) / 100.0, 0.0));
    let line_total = fields::number(item.line_total.as_ref())
        .unwrap_or_else(|| fields::finite_or(amount + line_tax, 0.0));

    let code = match item_type {
        ItemType::Product => fields::text(item.hsn.as_ref()),
        ItemType::Service => fields::text(item.sac.as_ref()),
    };

    UnifiedLineItem {
        item_type,
        name: resolve_name(item, item_type, service_names),
        description: fields::text(item.description.as_ref()).unwrap_or_default(),
        quantity,
        unit: resolve_unit(item),
        price_per_unit,
        amount,
        gst_percentage,
        line_tax,
        line_total,
        code,
    }
}

/// One service line built from the transaction's own amount fields.
fn synthesize_line(tx: &RawTransaction) -> UnifiedLineItem {
    let amount = fields::number_or(tx.amount.as_ref(), 0.0);
    let gst_percentage = gst_rate(tx.gst_percentage.as_ref());
    let line_tax = fields::number(tx.line_tax.as_ref())
        .unwrap_or_else(|| fields::finite_or(amount * gst_percentage.unwrap_or(0.0) / 100.0, 0.0));
    let line_total = fields::number(tx.total_amount.as_ref())
        .unwrap_or_else(|| fields::finite_or(amount + line_tax, 0.0));

    UnifiedLineItem {
        item_type: ItemType::Service,
        name: DEFAULT_NAME.to_string(),
        description: fields::text(tx.description.as_ref()).unwrap_or_default(),
        quantity: 1.0,
        unit: DEFAULT_UNIT.to_string(),
        price_per_unit: amount.max(0.0),
        amount,
        gst_percentage,
        line_tax,
        line_total,
        code: None,
    }
}

/// Flatten a transaction into unified lines.
///
/// `None` yields an empty list. Any present transaction yields at least one
/// line: with no items at all, one service line is synthesized from the
/// transaction's scalar fields.
pub fn normalize(tx: Option<&RawTransaction>, service_names: &ServiceNames) -> Vec<UnifiedLineItem> {
    let Some(tx) = tx else {
        tracing::warn!("normalize called without a transaction; no lines produced");
        return Vec::new();
    };

    let groups = [
        (tx.products.as_deref(), ItemType::Product),
        (tx.services.as_deref(), ItemType::Service),
        (tx.service.as_deref(), ItemType::Service),
    ];

    let lines: Vec<UnifiedLineItem> = groups
        .into_iter()
        .flat_map(|(items, item_type)| {
            items
                .unwrap_or_default()
                .iter()
                .map(move |item| unify_item(item, item_type, service_names))
        })
        .collect();

    if lines.is_empty() {
        tracing::debug!("transaction has no items; synthesizing a single service line");
        return vec![synthesize_line(tx)];
    }
    lines
}
