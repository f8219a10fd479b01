//! HSN/SAC tax summary.

use serde::{Deserialize, Serialize};

use crate::tax::{TaxMode, TaxedLineItem};

/// Group label for lines without an HSN/SAC code.
pub const NO_CODE: &str = "-";
/// Code shown on the grand-total row.
pub const TOTAL_CODE: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsnSummaryRow {
    pub hsn_code: String,
    pub taxable_value: f64,
    pub tax_rate: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub igst_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl HsnSummaryRow {
    fn empty(code: &str, tax_rate: f64) -> Self {
        Self {
            hsn_code: code.to_string(),
            taxable_value: 0.0,
            tax_rate,
            cgst_amount: 0.0,
            sgst_amount: 0.0,
            igst_amount: 0.0,
            tax_amount: 0.0,
            total: 0.0,
        }
    }

    fn add(&mut self, line: &TaxedLineItem, mode: TaxMode) {
        let (cgst, sgst, igst) = match mode {
            TaxMode::NoTax => (0.0, 0.0, 0.0),
            TaxMode::IntraState => (line.cgst, line.sgst, 0.0),
            TaxMode::InterState => (0.0, 0.0, line.igst),
        };
        self.taxable_value += line.taxable_value;
        self.cgst_amount += cgst;
        self.sgst_amount += sgst;
        self.igst_amount += igst;
        self.tax_amount += cgst + sgst + igst;
        self.total += line.taxable_value + cgst + sgst + igst;
    }
}

/// Group taxed lines by HSN/SAC code in first-seen order.
///
/// Each group reports the rate of its first line. Codes carrying more than
/// one rate are logged but not split.
pub fn summarize_by_code(taxed_lines: &[TaxedLineItem], mode: TaxMode) -> Vec<HsnSummaryRow> {
    let mut rows: Vec<HsnSummaryRow> = Vec::new();

    for line in taxed_lines {
        let code = line.line.code.as_deref().unwrap_or(NO_CODE);
        let rate = match mode {
            TaxMode::NoTax => 0.0,
            _ => line.gst_rate,
        };
        let index = match rows.iter().position(|r| r.hsn_code == code) {
            Some(i) => {
                if rows[i].tax_rate != rate {
                    tracing::warn!(
                        code,
                        group_rate = rows[i].tax_rate,
                        line_rate = rate,
                        "HSN/SAC group has mixed tax rates; keeping the first"
                    );
                }
                i
            }
            None => {
                rows.push(HsnSummaryRow::empty(code, rate));
                rows.len() - 1
            }
        };
        rows[index].add(line, mode);
    }

    rows
}

/// Sum summary rows into a single `"Total"` row for display.
pub fn grand_total(rows: &[HsnSummaryRow]) -> HsnSummaryRow {
    let mut total = HsnSummaryRow::empty(TOTAL_CODE, 0.0);
    for row in rows {
        total.taxable_value += row.taxable_value;
        total.cgst_amount += row.cgst_amount;
        total.sgst_amount += row.sgst_amount;
        total.igst_amount += row.igst_amount;
        total.tax_amount += row.tax_amount;
        total.total += row.total;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, Party, RawTransaction, ServiceNames};
    use crate::normalizer::normalize;
    use crate::tax::{compute_taxes, TaxComputation};
    use serde_json::json;

    fn compute(tx: serde_json::Value, buyer_state: &str, gstin: Option<&str>) -> TaxComputation {
        let tx: RawTransaction = serde_json::from_value(tx).unwrap();
        let lines = normalize(Some(&tx), &ServiceNames::new());
        let seller = Company {
            gstin: gstin.map(str::to_string),
            state: Some("Maharashtra".to_string()),
            ..Company::default()
        };
        let buyer = Party {
            state: Some(buyer_state.to_string()),
            ..Party::default()
        };
        compute_taxes(&lines, &seller, &buyer, None)
    }

    fn sample() -> serde_json::Value {
        json!({
            "products": [
                {"name": "Laptop", "hsn": "8471", "amount": 50000, "gstPercentage": 18},
                {"name": "Cable", "amount": 300, "gstPercentage": 18},
                {"name": "Mouse", "hsn": "8471", "amount": 700, "gstPercentage": 18},
                {"name": "Paper", "hsn": "4802", "amount": 250.5, "gstPercentage": 12}
            ],
            "services": [{"name": "Setup", "sac": "998313", "amount": 1500, "gstPercentage": 18}]
        })
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let result = compute(sample(), "Maharashtra", Some("27AAAPL1234C1Z5"));
        let rows = summarize_by_code(&result.taxed_lines, result.mode);
        let codes: Vec<&str> = rows.iter().map(|r| r.hsn_code.as_str()).collect();
        assert_eq!(codes, vec!["8471", "-", "4802", "998313"]);
        assert_eq!(rows[0].taxable_value, 50700.0);
        assert_eq!(rows[0].tax_rate, 18.0);
        assert!((rows[0].cgst_amount - 4563.0).abs() < 1e-6);
        assert!((rows[0].sgst_amount - 4563.0).abs() < 1e-6);
        assert_eq!(rows[0].igst_amount, 0.0);
    }

    #[test]
    fn test_totals_match_tax_engine() {
        for state in ["Maharashtra", "Gujarat"] {
            let result = compute(sample(), state, Some("27AAAPL1234C1Z5"));
            let rows = summarize_by_code(&result.taxed_lines, result.mode);
            let sum: f64 = rows.iter().map(|r| r.total).sum();
            assert!((sum - result.totals.total_amount).abs() < 1e-6);
            let total_row = grand_total(&rows);
            assert_eq!(total_row.hsn_code, "Total");
            assert!((total_row.total - result.totals.total_amount).abs() < 1e-6);
            assert!((total_row.tax_amount - result.totals.total_tax()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_inter_state_rows_carry_igst_only() {
        let result = compute(sample(), "Gujarat", Some("27AAAPL1234C1Z5"));
        let rows = summarize_by_code(&result.taxed_lines, result.mode);
        for row in &rows {
            assert_eq!(row.cgst_amount, 0.0);
            assert_eq!(row.sgst_amount, 0.0);
            assert!((row.tax_amount - row.igst_amount).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_tax_rows_have_zero_rate() {
        let result = compute(sample(), "Gujarat", None);
        let rows = summarize_by_code(&result.taxed_lines, result.mode);
        assert!(rows.iter().all(|r| r.tax_rate == 0.0 && r.tax_amount == 0.0));
        assert!(rows.iter().all(|r| r.total == r.taxable_value));
    }

    #[test]
    fn test_mixed_rate_group_keeps_first_rate() {
        let tx = json!({"products": [
            {"name": "A", "hsn": "1001", "amount": 100, "gstPercentage": 5},
            {"name": "B", "hsn": "1001", "amount": 100, "gstPercentage": 12}
        ]});
        let result = compute(tx, "Gujarat", Some("27AAAPL1234C1Z5"));
        let rows = summarize_by_code(&result.taxed_lines, result.mode);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tax_rate, 5.0);
        assert!((rows[0].igst_amount - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        assert!(summarize_by_code(&[], TaxMode::NoTax).is_empty());
        let total = grand_total(&[]);
        assert_eq!(total.total, 0.0);
    }
}
