use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tapline_core::{DomainError, DomainResult, Entity, InvoiceId, ValueObject};

/// Display number of an invoice (e.g. `INV-5309`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("invoice number must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for InvoiceNumber {}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Company name printed on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("company name must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CompanyName {}

impl core::fmt::Display for CompanyName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    /// No longer open to revision except for compliance fields (company name).
    Finalized,
}

/// Invoice state. Shared and mutated through [`InvoiceHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    id: InvoiceId,
    number: InvoiceNumber,
    company_name: CompanyName,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        number: &str,
        company_name: &str,
        status: InvoiceStatus,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: InvoiceId::new(),
            number: InvoiceNumber::parse(number)?,
            company_name: CompanyName::parse(company_name)?,
            status,
            created_at,
        })
    }

    pub fn finalized(
        number: &str,
        company_name: &str,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::new(number, company_name, InvoiceStatus::Finalized, created_at)
    }

    pub fn draft(number: &str, company_name: &str, created_at: DateTime<Utc>) -> DomainResult<Self> {
        Self::new(number, company_name, InvoiceStatus::Draft, created_at)
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }
}

/// Attribute changes accepted by [`InvoiceHandle::update`].
///
/// Carries the raw caller input; validation happens inside `update` and is
/// reported through the returned [`UpdateStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub company_name: String,
}

impl InvoiceUpdate {
    pub fn company_name(name: impl Into<String>) -> Self {
        Self {
            company_name: name.into(),
        }
    }
}

/// Outcome flag of an update. Deliberately not the invoice itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Applied,
    Rejected,
}

impl UpdateStatus {
    pub fn is_applied(self) -> bool {
        self == UpdateStatus::Applied
    }
}

impl From<bool> for UpdateStatus {
    fn from(value: bool) -> Self {
        if value {
            UpdateStatus::Applied
        } else {
            UpdateStatus::Rejected
        }
    }
}

impl From<UpdateStatus> for bool {
    fn from(value: UpdateStatus) -> Self {
        value.is_applied()
    }
}

/// One recorded call to [`InvoiceHandle::update`], accepted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCall {
    pub invoice_number: InvoiceNumber,
    pub company_name: String,
}

/// Append-only record of update calls, shared by every handle of one directory.
#[derive(Debug, Clone, Default)]
pub struct UpdateJournal {
    calls: Arc<RwLock<Vec<UpdateCall>>>,
}

impl UpdateJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: UpdateCall) {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    pub fn calls(&self) -> Vec<UpdateCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Serializable view of an invoice at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    pub id: InvoiceId,
    pub number: InvoiceNumber,
    pub company_name: CompanyName,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// Shared, mutable handle to one invoice.
///
/// Clones point at the same invoice, so an update through any clone is seen by
/// all of them. Every write is a single field assignment, which keeps the
/// state consistent even if a holder panicked while holding the lock; poisoned
/// locks are therefore recovered rather than reported.
#[derive(Debug, Clone)]
pub struct InvoiceHandle {
    state: Arc<RwLock<Invoice>>,
    journal: UpdateJournal,
}

impl InvoiceHandle {
    pub fn new(invoice: Invoice, journal: UpdateJournal) -> Self {
        Self {
            state: Arc::new(RwLock::new(invoice)),
            journal,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Invoice> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Invoice> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn number(&self) -> InvoiceNumber {
        self.read().number.clone()
    }

    pub fn company_name(&self) -> CompanyName {
        self.read().company_name.clone()
    }

    pub fn status(&self) -> InvoiceStatus {
        self.read().status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.read().created_at
    }

    pub fn snapshot(&self) -> InvoiceSnapshot {
        let invoice = self.read();
        InvoiceSnapshot {
            id: invoice.id,
            number: invoice.number.clone(),
            company_name: invoice.company_name.clone(),
            status: invoice.status,
            created_at: invoice.created_at,
        }
    }

    /// Whether both handles share the same underlying object.
    pub fn ptr_eq(&self, other: &InvoiceHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Apply `update` and report whether it took effect.
    ///
    /// Returns a status flag, not the invoice. A blank company name is
    /// rejected and leaves the invoice unchanged.
    pub fn update(&self, update: InvoiceUpdate) -> UpdateStatus {
        let mut invoice = self.write();
        self.journal.record(UpdateCall {
            invoice_number: invoice.number.clone(),
            company_name: update.company_name.clone(),
        });

        match CompanyName::parse(&update.company_name) {
            Ok(name) => {
                invoice.company_name = name;
                UpdateStatus::Applied
            }
            Err(err) => {
                tracing::debug!(invoice = %invoice.number, error = %err, "update rejected");
                UpdateStatus::Rejected
            }
        }
    }
}

impl Entity for InvoiceHandle {
    type Id = InvoiceId;

    fn id(&self) -> Self::Id {
        self.read().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn handle(number: &str) -> (InvoiceHandle, UpdateJournal) {
        let journal = UpdateJournal::new();
        let invoice = Invoice::finalized(number, "Initech", test_time()).unwrap();
        (InvoiceHandle::new(invoice, journal.clone()), journal)
    }

    #[test]
    fn value_objects_reject_blank_input() {
        assert!(matches!(
            InvoiceNumber::parse("   "),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(CompanyName::parse(""), Err(DomainError::Validation(_))));
        assert_eq!(CompanyName::parse("  Acme ").unwrap().as_str(), "Acme");
    }

    #[test]
    fn update_returns_status_flag_and_mutates_shared_state() {
        let (invoice, journal) = handle("INV-5309");
        let other = invoice.clone();

        let status = invoice.update(InvoiceUpdate::company_name("Yoyodyne Int'l"));

        assert_eq!(status, UpdateStatus::Applied);
        assert_eq!(other.company_name().as_str(), "Yoyodyne Int'l");
        assert!(other.ptr_eq(&invoice));
        assert!(other.same_entity(&invoice));
        assert_eq!(
            journal.calls(),
            vec![UpdateCall {
                invoice_number: InvoiceNumber::parse("INV-5309").unwrap(),
                company_name: "Yoyodyne Int'l".to_string(),
            }]
        );
    }

    #[test]
    fn blank_company_name_is_rejected_but_recorded() {
        let (invoice, journal) = handle("INV-1");

        let status = invoice.update(InvoiceUpdate::company_name("  "));

        assert_eq!(status, UpdateStatus::Rejected);
        assert!(!bool::from(status));
        assert_eq!(invoice.company_name().as_str(), "Initech");
        assert_eq!(journal.calls().len(), 1);
    }

    #[test]
    fn snapshot_serializes_with_lowercase_status() {
        let (invoice, _) = handle("INV-7");
        let json = serde_json::to_value(invoice.snapshot()).unwrap();
        assert_eq!(json["number"], "INV-7");
        assert_eq!(json["company_name"], "Initech");
        assert_eq!(json["status"], "finalized");
    }

    #[test]
    fn status_flag_converts_from_bool() {
        assert_eq!(UpdateStatus::from(true), UpdateStatus::Applied);
        assert_eq!(UpdateStatus::from(false), UpdateStatus::Rejected);
    }
}
