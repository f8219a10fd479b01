//! One invoice request in, everything a template needs out.
//!
//! Templates used to re-derive tax mode, titles and totals on their own; they
//! should read them from [`InvoiceDocument`] instead.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fields;
use crate::fmt;
use crate::hsn::{self, HsnSummaryRow};
use crate::models::{
    Company, ItemType, Party, RawTransaction, ServiceNames, ShippingAddress, UnifiedLineItem,
};
use crate::normalizer::{self, DEFAULT_NAME, DEFAULT_UNIT};
use crate::paginate::{self, Page};
use crate::states;
use crate::tax::{self, TaxMode, TaxedLineItem, TotalsSummary};

/// Everything needed to compute one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceRequest {
    pub transaction: Option<RawTransaction>,
    pub company: Company,
    pub party: Party,
    pub consignee: Option<ShippingAddress>,
    pub service_names: ServiceNames,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Standard,
    Proforma,
}

impl InvoiceKind {
    fn from_raw(raw: Option<&serde_json::Value>) -> Self {
        match fields::text(raw) {
            Some(t) if t.eq_ignore_ascii_case("proforma") => Self::Proforma,
            _ => Self::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    pub kind: InvoiceKind,
    pub title: String,
    pub invoice_number: Option<String>,
    pub date: String,
    pub due_date: String,
    pub place_of_supply: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub header: InvoiceHeader,
    pub mode: TaxMode,
    pub lines: Vec<TaxedLineItem>,
    pub totals: TotalsSummary,
    pub hsn_summary: Vec<HsnSummaryRow>,
    pub pages: Vec<Page>,
    pub amount_in_words: String,
}

fn placeholder_line() -> UnifiedLineItem {
    UnifiedLineItem {
        item_type: ItemType::Service,
        name: DEFAULT_NAME.to_string(),
        description: String::new(),
        quantity: 1.0,
        unit: DEFAULT_UNIT.to_string(),
        price_per_unit: 0.0,
        amount: 0.0,
        gst_percentage: None,
        line_tax: 0.0,
        line_total: 0.0,
        code: None,
    }
}

fn title(kind: InvoiceKind, mode: TaxMode) -> &'static str {
    match (kind, mode) {
        (InvoiceKind::Proforma, _) => "PROFORMA INVOICE",
        (InvoiceKind::Standard, TaxMode::NoTax) => "INVOICE",
        (InvoiceKind::Standard, _) => "TAX INVOICE",
    }
}

fn header(request: &InvoiceRequest, mode: TaxMode) -> InvoiceHeader {
    let tx = request.transaction.as_ref();
    let kind = InvoiceKind::from_raw(tx.and_then(|t| t.kind.as_ref()));
    let supply_state = tax::supply_state(&request.party, request.consignee.as_ref());

    InvoiceHeader {
        kind,
        title: title(kind, mode).to_string(),
        invoice_number: fields::text(tx.and_then(|t| t.invoice_number.as_ref())),
        date: fmt::date(fields::text(tx.and_then(|t| t.date.as_ref())).as_deref()),
        due_date: fmt::date(fields::text(tx.and_then(|t| t.due_date.as_ref())).as_deref()),
        place_of_supply: states::place_of_supply(supply_state),
        notes: fields::text(tx.and_then(|t| t.notes.as_ref())),
    }
}

/// Run the full pipeline: normalize, tax, summarize, paginate.
///
/// A request without a transaction still renders, as a single zero-amount line.
pub fn build_invoice(request: &InvoiceRequest, page_size: usize) -> Result<InvoiceDocument> {
    let mut lines = normalizer::normalize(request.transaction.as_ref(), &request.service_names);
    if lines.is_empty() {
        lines.push(placeholder_line());
    }

    let computed = tax::compute_taxes(
        &lines,
        &request.company,
        &request.party,
        request.consignee.as_ref(),
    );
    let hsn_summary = hsn::summarize_by_code(&computed.taxed_lines, computed.mode);
    let pages = paginate::paginate(&computed.taxed_lines, page_size)?;

    if let Some(gstin) = request.company.gstin.as_deref().filter(|g| !g.trim().is_empty()) {
        if !states::is_valid_gstin(gstin) {
            tracing::warn!(gstin, "seller GSTIN does not look well-formed");
        }
    }

    Ok(InvoiceDocument {
        header: header(request, computed.mode),
        mode: computed.mode,
        amount_in_words: fmt::amount_in_words(computed.totals.total_amount),
        lines: computed.taxed_lines,
        totals: computed.totals,
        hsn_summary,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvoiceError;
    use serde_json::json;

    fn request(value: serde_json::Value) -> InvoiceRequest {
        serde_json::from_value(value).unwrap()
    }

    fn sample_request() -> InvoiceRequest {
        request(json!({
            "transaction": {
                "invoiceNumber": "INV-0042",
                "date": "2024-04-01",
                "dueDate": "2024-04-15",
                "notes": "Thanks for your business",
                "products": [
                    {"name": "Widget", "quantity": 2, "pricePerUnit": 100, "gstPercentage": 18, "hsn": "8471"}
                ],
                "services": [
                    {"service": "svc-1", "amount": 1000, "gstPercentage": 18, "sac": "998313"}
                ]
            },
            "company": {"name": "Acme", "gstin": "27AAAPL1234C1Z5", "state": "Maharashtra"},
            "party": {"name": "Buyer", "state": "Gujarat"},
            "serviceNames": {"svc-1": "Installation"}
        }))
    }

    #[test]
    fn test_full_pipeline() {
        let doc = build_invoice(&sample_request(), 40).unwrap();
        assert_eq!(doc.mode, TaxMode::InterState);
        assert_eq!(doc.header.title, "TAX INVOICE");
        assert_eq!(doc.header.kind, InvoiceKind::Standard);
        assert_eq!(doc.header.invoice_number.as_deref(), Some("INV-0042"));
        assert_eq!(doc.header.date, "01/04/2024");
        assert_eq!(doc.header.due_date, "15/04/2024");
        assert_eq!(doc.header.place_of_supply, "Gujarat (24)");
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[1].line.name, "Installation");
        assert!((doc.totals.total_amount - 1416.0).abs() < 1e-6);
        assert_eq!(doc.amount_in_words, "One Thousand Four Hundred Sixteen");
        assert_eq!(doc.hsn_summary.len(), 2);
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].is_last_page);
    }

    #[test]
    fn test_views_agree() {
        let doc = build_invoice(&sample_request(), 1).unwrap();
        let hsn_total: f64 = doc.hsn_summary.iter().map(|r| r.total).sum();
        let page_total: f64 = doc
            .pages
            .iter()
            .flat_map(|p| p.items.iter())
            .map(|l| l.total)
            .sum();
        assert!((hsn_total - doc.totals.total_amount).abs() < 1e-6);
        assert!((page_total - doc.totals.total_amount).abs() < 1e-6);
        assert_eq!(doc.pages.len(), 2);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let req = sample_request();
        assert_eq!(build_invoice(&req, 24).unwrap(), build_invoice(&req, 24).unwrap());
    }

    #[test]
    fn test_missing_transaction_renders_placeholder() {
        let doc = build_invoice(&InvoiceRequest::default(), 24).unwrap();
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.totals.total_amount, 0.0);
        assert_eq!(doc.mode, TaxMode::NoTax);
        assert_eq!(doc.header.title, "INVOICE");
        assert_eq!(doc.header.date, "-");
        assert_eq!(doc.amount_in_words, "Zero");
    }

    #[test]
    fn test_proforma_title() {
        let mut req = sample_request();
        if let Some(tx) = req.transaction.as_mut() {
            tx.kind = Some(json!("Proforma"));
        }
        let doc = build_invoice(&req, 24).unwrap();
        assert_eq!(doc.header.kind, InvoiceKind::Proforma);
        assert_eq!(doc.header.title, "PROFORMA INVOICE");
    }

    #[test]
    fn test_consignee_drives_place_of_supply() {
        let mut req = sample_request();
        req.consignee = Some(ShippingAddress {
            state: Some("Maharashtra".to_string()),
            ..ShippingAddress::default()
        });
        let doc = build_invoice(&req, 24).unwrap();
        assert_eq!(doc.mode, TaxMode::IntraState);
        assert_eq!(doc.header.place_of_supply, "Maharashtra (27)");
    }

    #[test]
    fn test_zero_page_size_propagates() {
        let err = build_invoice(&sample_request(), 0).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidPageSize(0)));
    }
}
