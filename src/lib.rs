//! GST invoice engine: normalizes loosely typed transactions into line items,
//! applies CGST/SGST or IGST, summarizes by HSN/SAC and paginates for print.

pub mod error;
pub mod fields;
pub mod fmt;
pub mod hsn;
pub mod invoice;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod paginate;
pub mod settings;
pub mod states;
pub mod tax;

pub use error::{InvoiceError, Result};
pub use hsn::{summarize_by_code, HsnSummaryRow};
pub use invoice::{build_invoice, InvoiceDocument, InvoiceRequest};
pub use models::{Company, Party, RawItem, RawTransaction, ServiceNames, ShippingAddress, UnifiedLineItem};
pub use normalizer::normalize;
pub use paginate::{paginate, Page};
pub use tax::{compute_taxes, TaxComputation, TaxMode, TaxedLineItem, TotalsSummary};
