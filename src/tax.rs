//! GST mode selection and per-line tax computation.
//!
//! The mode is decided once per invoice. Amounts keep full precision here;
//! rounding happens only when values are formatted for display.

use serde::{Deserialize, Serialize};

use crate::fields;
use crate::models::{Company, Party, ShippingAddress, UnifiedLineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxMode {
    NoTax,
    /// CGST + SGST, each half the rate.
    IntraState,
    /// IGST at the full rate.
    InterState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxedLineItem {
    #[serde(flatten)]
    pub line: UnifiedLineItem,
    pub taxable_value: f64,
    pub gst_rate: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    pub total_taxable: f64,
    #[serde(rename = "totalCGST")]
    pub total_cgst: f64,
    #[serde(rename = "totalSGST")]
    pub total_sgst: f64,
    #[serde(rename = "totalIGST")]
    pub total_igst: f64,
    pub total_amount: f64,
    pub total_items: usize,
    pub total_qty: f64,
    #[serde(rename = "isGSTApplicable")]
    pub is_gst_applicable: bool,
    pub is_interstate: bool,
    #[serde(rename = "showIGST")]
    pub show_igst: bool,
    #[serde(rename = "showCGSTSGST")]
    pub show_cgst_sgst: bool,
    pub show_no_tax: bool,
}

impl TotalsSummary {
    pub fn total_tax(&self) -> f64 {
        self.total_cgst + self.total_sgst + self.total_igst
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComputation {
    pub mode: TaxMode,
    pub taxed_lines: Vec<TaxedLineItem>,
    pub totals: TotalsSummary,
}

// ---------------------------------------------------------------------------
// Mode selection
// ---------------------------------------------------------------------------

fn normalized_state(state: Option<&str>) -> Option<String> {
    state
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Place-of-supply state: the consignee's when it has one, else the buyer's.
pub fn supply_state<'a>(buyer: &'a Party, consignee: Option<&'a ShippingAddress>) -> Option<&'a str> {
    consignee
        .and_then(|c| c.state.as_deref())
        .filter(|s| !s.trim().is_empty())
        .or(buyer.state.as_deref())
        .filter(|s| !s.trim().is_empty())
}

/// Whether the supply crosses a state border.
///
/// When either side's state is unknown this answers `true`: incomplete
/// address data shows IGST instead of silently dropping tax.
pub fn is_interstate(seller: &Company, buyer: &Party, consignee: Option<&ShippingAddress>) -> bool {
    let seller_state = normalized_state(seller.state.as_deref());
    let buyer_state = normalized_state(supply_state(buyer, consignee));
    match (seller_state, buyer_state) {
        (Some(s), Some(b)) => s != b,
        _ => true,
    }
}

/// GST applies when the lines carry tax and the seller is registered.
/// A seller without a GSTIN never charges GST, whatever the lines say.
pub fn is_gst_applicable(lines: &[UnifiedLineItem], seller: &Company) -> bool {
    if !seller.has_gstin() {
        return false;
    }
    let total_tax: f64 = lines.iter().map(|l| l.line_tax).sum();
    total_tax > 0.0 || lines.iter().any(|l| l.gst_percentage.is_some_and(|r| r > 0.0))
}

pub fn select_mode(
    lines: &[UnifiedLineItem],
    seller: &Company,
    buyer: &Party,
    consignee: Option<&ShippingAddress>,
) -> TaxMode {
    if !is_gst_applicable(lines, seller) {
        TaxMode::NoTax
    } else if is_interstate(seller, buyer, consignee) {
        TaxMode::InterState
    } else {
        TaxMode::IntraState
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

fn tax_line(line: &UnifiedLineItem, mode: TaxMode) -> TaxedLineItem {
    let taxable_value = line.amount;
    let gst_rate = match mode {
        TaxMode::NoTax => 0.0,
        _ => line.gst_percentage.unwrap_or(0.0),
    };
    let (cgst, sgst, igst) = match mode {
        TaxMode::NoTax => (0.0, 0.0, 0.0),
        TaxMode::IntraState => {
            let half = fields::finite_or(taxable_value * (gst_rate / 2.0) / 100.0, 0.0);
            (half, half, 0.0)
        }
        TaxMode::InterState => (0.0, 0.0, fields::finite_or(taxable_value * gst_rate / 100.0, 0.0)),
    };
    TaxedLineItem {
        line: line.clone(),
        taxable_value,
        gst_rate,
        cgst,
        sgst,
        igst,
        total: taxable_value + cgst + sgst + igst,
    }
}

/// Tax every line under one invoice-wide mode and total the result.
pub fn compute_taxes(
    lines: &[UnifiedLineItem],
    seller: &Company,
    buyer: &Party,
    consignee: Option<&ShippingAddress>,
) -> TaxComputation {
    let mode = select_mode(lines, seller, buyer, consignee);
    let taxed_lines: Vec<TaxedLineItem> = lines.iter().map(|l| tax_line(l, mode)).collect();

    let totals = TotalsSummary {
        total_taxable: taxed_lines.iter().map(|l| l.taxable_value).sum(),
        total_cgst: taxed_lines.iter().map(|l| l.cgst).sum(),
        total_sgst: taxed_lines.iter().map(|l| l.sgst).sum(),
        total_igst: taxed_lines.iter().map(|l| l.igst).sum(),
        total_amount: taxed_lines.iter().map(|l| l.total).sum(),
        total_items: taxed_lines.len(),
        total_qty: taxed_lines.iter().map(|l| l.line.quantity).sum(),
        is_gst_applicable: mode != TaxMode::NoTax,
        is_interstate: is_interstate(seller, buyer, consignee),
        show_igst: mode == TaxMode::InterState,
        show_cgst_sgst: mode == TaxMode::IntraState,
        show_no_tax: mode == TaxMode::NoTax,
    };

    tracing::debug!(
        ?mode,
        lines = totals.total_items,
        tax = totals.total_tax(),
        total = totals.total_amount,
        "computed invoice taxes"
    );

    TaxComputation {
        mode,
        taxed_lines,
        totals,
    }
}
