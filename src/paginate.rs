use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, Result};
use crate::tax::TaxedLineItem;

/// One printed page of line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<TaxedLineItem>,
    /// Offset of the first item in the full list; serial numbers continue from here.
    pub start_index: usize,
    pub is_last_page: bool,
}

impl Page {
    /// 1-based serial number for the item at `offset` on this page.
    pub fn serial_number(&self, offset: usize) -> usize {
        self.start_index + offset + 1
    }
}

/// Split lines into pages of at most `page_size` items.
///
/// An empty list still yields one (empty, last) page so footers have
/// somewhere to go. `page_size` of zero is a caller bug and is rejected.
pub fn paginate(taxed_lines: &[TaxedLineItem], page_size: usize) -> Result<Vec<Page>> {
    if page_size == 0 {
        return Err(InvoiceError::InvalidPageSize(page_size));
    }

    if taxed_lines.is_empty() {
        return Ok(vec![Page {
            items: Vec::new(),
            start_index: 0,
            is_last_page: true,
        }]);
    }

    let page_count = taxed_lines.len().div_ceil(page_size);
    let pages = taxed_lines
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            items: chunk.to_vec(),
            start_index: i * page_size,
            is_last_page: i + 1 == page_count,
        })
        .collect();
    Ok(pages)
}
