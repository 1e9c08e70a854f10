//! Invoicing module: accounts, finalized invoices, and the company-name update.
//!
//! The collaborators here are in-memory stand-ins (no IO, no storage). The
//! interesting part is [`company_update`], which performs the same operation
//! several ways to contrast pipe-style and tap-style side-effect injection.

pub mod account;
pub mod chain;
pub mod company_update;
pub mod in_memory;
pub mod invoice;
pub mod log_sink;

pub use account::{Account, AccountDirectory, FinalizedInvoices};
pub use chain::ChainValue;
pub use company_update::{CompanyUpdater, Variant, log_invoice, updating_message};
pub use in_memory::InMemoryAccountDirectory;
pub use invoice::{
    CompanyName, Invoice, InvoiceHandle, InvoiceNumber, InvoiceSnapshot, InvoiceStatus,
    InvoiceUpdate, UpdateCall, UpdateJournal, UpdateStatus,
};
pub use log_sink::{LogSink, RecordingSink, TracingSink};
