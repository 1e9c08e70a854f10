//! Dynamically-typed value flowing through a call chain.
//!
//! A typed chain simply refuses to compile `true.update(..)`. Routing the
//! chain through [`ChainValue`] moves that check to run time, where invoking a
//! capability the current value lacks fails with
//! [`DomainError::UnsupportedCapability`].

use tapline_core::{DomainError, DomainResult};

use crate::invoice::{CompanyName, InvoiceHandle, InvoiceNumber, InvoiceUpdate, UpdateStatus};

#[derive(Debug, Clone)]
pub enum ChainValue {
    Invoice(InvoiceHandle),
    /// A boolean result, e.g. from an update or a logger call.
    Flag(bool),
}

impl ChainValue {
    /// Human-readable kind of the current value, used in error messages.
    pub fn receiver(&self) -> &'static str {
        match self {
            ChainValue::Invoice(_) => "invoice",
            ChainValue::Flag(_) => "status flag",
        }
    }

    fn invoice(&self, capability: &'static str) -> DomainResult<&InvoiceHandle> {
        match self {
            ChainValue::Invoice(invoice) => Ok(invoice),
            ChainValue::Flag(_) => Err(DomainError::unsupported(capability, self.receiver())),
        }
    }

    pub fn update(&self, update: InvoiceUpdate) -> DomainResult<UpdateStatus> {
        Ok(self.invoice("update")?.update(update))
    }

    pub fn number(&self) -> DomainResult<InvoiceNumber> {
        Ok(self.invoice("number")?.number())
    }

    pub fn company_name(&self) -> DomainResult<CompanyName> {
        Ok(self.invoice("company_name")?.company_name())
    }

    /// The flag as an [`UpdateStatus`]. Only flags have one.
    pub fn status(&self) -> DomainResult<UpdateStatus> {
        match self {
            ChainValue::Flag(flag) => Ok(UpdateStatus::from(*flag)),
            ChainValue::Invoice(_) => Err(DomainError::unsupported("status", self.receiver())),
        }
    }
}

impl From<InvoiceHandle> for ChainValue {
    fn from(value: InvoiceHandle) -> Self {
        ChainValue::Invoice(value)
    }
}

impl From<bool> for ChainValue {
    fn from(value: bool) -> Self {
        ChainValue::Flag(value)
    }
}

impl From<UpdateStatus> for ChainValue {
    fn from(value: UpdateStatus) -> Self {
        ChainValue::Flag(value.is_applied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Invoice, UpdateJournal};
    use chrono::Utc;

    fn invoice() -> InvoiceHandle {
        InvoiceHandle::new(
            Invoice::finalized("INV-5309", "Yoyodyne", Utc::now()).unwrap(),
            UpdateJournal::new(),
        )
    }

    #[test]
    fn invoice_value_forwards_capabilities() {
        let value = ChainValue::from(invoice());

        assert_eq!(value.number().unwrap().as_str(), "INV-5309");
        assert_eq!(
            value.update(InvoiceUpdate::company_name("Initrode")).unwrap(),
            UpdateStatus::Applied
        );
        assert_eq!(value.company_name().unwrap().as_str(), "Initrode");
    }

    #[test]
    fn flag_value_lacks_invoice_capabilities() {
        let value = ChainValue::from(true);

        assert_eq!(
            value.update(InvoiceUpdate::company_name("Initrode")),
            Err(DomainError::unsupported("update", "status flag"))
        );
        assert_eq!(
            value.number(),
            Err(DomainError::unsupported("number", "status flag"))
        );
        assert!(value.company_name().unwrap_err().is_unsupported_capability());
    }

    #[test]
    fn status_is_only_available_on_flags() {
        assert_eq!(
            ChainValue::from(UpdateStatus::Rejected).status(),
            Ok(UpdateStatus::Rejected)
        );
        assert_eq!(
            ChainValue::from(invoice()).status(),
            Err(DomainError::unsupported("status", "invoice"))
        );
    }
}
