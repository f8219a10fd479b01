use std::io::Read;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Cell, Table};

use gst_invoice::fmt::{money, number, quantity};
use gst_invoice::hsn::{grand_total, HsnSummaryRow};
use gst_invoice::invoice::{build_invoice, InvoiceDocument, InvoiceRequest};
use gst_invoice::paginate::Page;
use gst_invoice::settings::load_settings;
use gst_invoice::tax::TotalsSummary;

fn read_request(file: &str) -> Result<InvoiceRequest> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?
    };
    serde_json::from_str(&content).with_context(|| format!("parsing invoice request {file}"))
}

pub fn run(file: &str, page_size: Option<usize>, json: bool) -> Result<()> {
    let settings = load_settings();
    let mut request = read_request(file)?;
    request.company = settings.seller_for(&request.company).clone();
    let page_size = page_size.unwrap_or(settings.page_size);

    let doc = build_invoice(&request, page_size)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_document(&doc);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal preview
// ---------------------------------------------------------------------------

fn print_document(doc: &InvoiceDocument) {
    let h = &doc.header;
    println!("{}", h.title.bold());
    println!("Invoice No: {}", h.invoice_number.as_deref().unwrap_or("-"));
    println!("Date:       {}", h.date);
    println!("Due Date:   {}", h.due_date);
    println!("Supply:     {}", h.place_of_supply);

    let page_count = doc.pages.len();
    for (n, page) in doc.pages.iter().enumerate() {
        println!("\nPage {} of {page_count}\n{}", n + 1, page_table(page, &doc.totals));
        if page.is_last_page {
            println!("\nTotals\n{}", totals_table(&doc.totals));
            if !doc.hsn_summary.is_empty() {
                println!("\nHSN/SAC Summary\n{}", hsn_table(&doc.hsn_summary, &doc.totals));
            }
            println!("\nAmount in words: {} Only", doc.amount_in_words);
            if let Some(notes) = &h.notes {
                println!("\nNotes: {notes}");
            }
        }
    }
}

fn page_table(page: &Page, totals: &TotalsSummary) -> Table {
    let mut header = vec!["Sr.", "Item", "HSN/SAC", "Qty", "Rate", "Taxable"];
    if totals.show_cgst_sgst {
        header.extend(["CGST", "SGST"]);
    }
    if totals.show_igst {
        header.push("IGST");
    }
    header.push("Amount");

    let mut table = Table::new();
    table.set_header(header);
    for (offset, item) in page.items.iter().enumerate() {
        let mut row = vec![
            Cell::new(page.serial_number(offset)),
            Cell::new(&item.line.name),
            Cell::new(item.line.code.as_deref().unwrap_or("-")),
            Cell::new(quantity(item.line.quantity, &item.line.unit)),
            Cell::new(money(item.line.price_per_unit)),
            Cell::new(money(item.taxable_value)),
        ];
        if totals.show_cgst_sgst {
            row.push(Cell::new(money(item.cgst)));
            row.push(Cell::new(money(item.sgst)));
        }
        if totals.show_igst {
            row.push(Cell::new(money(item.igst)));
        }
        row.push(Cell::new(money(item.total)));
        table.add_row(row);
    }
    table
}

fn totals_table(totals: &TotalsSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Items"), Cell::new(totals.total_items)]);
    table.add_row(vec![Cell::new("Quantity"), Cell::new(number(totals.total_qty))]);
    table.add_row(vec![Cell::new("Taxable Value"), Cell::new(money(totals.total_taxable))]);
    if totals.show_cgst_sgst {
        table.add_row(vec![Cell::new("CGST"), Cell::new(money(totals.total_cgst))]);
        table.add_row(vec![Cell::new("SGST"), Cell::new(money(totals.total_sgst))]);
    }
    if totals.show_igst {
        table.add_row(vec![Cell::new("IGST"), Cell::new(money(totals.total_igst))]);
    }
    if totals.is_gst_applicable {
        table.add_row(vec![Cell::new("Total Tax"), Cell::new(money(totals.total_tax()))]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(totals.total_amount).bold()),
    ]);
    table
}

fn hsn_table(rows: &[HsnSummaryRow], totals: &TotalsSummary) -> Table {
    let mut header = vec!["HSN/SAC", "Taxable", "Rate"];
    if totals.show_cgst_sgst {
        header.extend(["CGST", "SGST"]);
    }
    if totals.show_igst {
        header.push("IGST");
    }
    header.extend(["Tax", "Total"]);

    let mut table = Table::new();
    table.set_header(header);
    let total_row = grand_total(rows);
    for row in rows.iter().chain(std::iter::once(&total_row)) {
        let rate = if row.hsn_code == total_row.hsn_code {
            String::new()
        } else {
            format!("{}%", number(row.tax_rate))
        };
        let mut cells = vec![
            Cell::new(&row.hsn_code),
            Cell::new(money(row.taxable_value)),
            Cell::new(rate),
        ];
        if totals.show_cgst_sgst {
            cells.push(Cell::new(money(row.cgst_amount)));
            cells.push(Cell::new(money(row.sgst_amount)));
        }
        if totals.show_igst {
            cells.push(Cell::new(money(row.igst_amount)));
        }
        cells.push(Cell::new(money(row.tax_amount)));
        cells.push(Cell::new(money(row.total)));
        table.add_row(cells);
    }
    table
}
