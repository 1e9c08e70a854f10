//! Accounts and their finalized invoices.

use tapline_core::{AccountId, DomainError, DomainResult};

use crate::invoice::{InvoiceHandle, InvoiceStatus};

/// Looks up accounts by email address.
pub trait AccountDirectory {
    fn find_by_email(&self, email: &str) -> DomainResult<Account>;
}

impl<D: AccountDirectory + ?Sized> AccountDirectory for &D {
    fn find_by_email(&self, email: &str) -> DomainResult<Account> {
        (**self).find_by_email(email)
    }
}

/// A customer account and the invoices issued to it.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: String,
    invoices: Vec<InvoiceHandle>,
}

impl Account {
    pub fn new(id: AccountId, email: impl Into<String>, invoices: Vec<InvoiceHandle>) -> Self {
        Self {
            id,
            email: email.into(),
            invoices,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn invoices(&self) -> &[InvoiceHandle] {
        &self.invoices
    }

    pub fn finalized_invoices(&self) -> FinalizedInvoices {
        FinalizedInvoices {
            invoices: self
                .invoices
                .iter()
                .filter(|invoice| invoice.status() == InvoiceStatus::Finalized)
                .cloned()
                .collect(),
        }
    }
}

/// Finalized invoices of one account, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FinalizedInvoices {
    invoices: Vec<InvoiceHandle>,
}

impl FinalizedInvoices {
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// The invoice with the latest `created_at`; ties go to the later entry.
    pub fn most_recent(&self) -> DomainResult<InvoiceHandle> {
        self.invoices
            .iter()
            .max_by_key(|invoice| invoice.created_at())
            .cloned()
            .ok_or_else(|| DomainError::not_found("finalized invoice"))
    }
}
