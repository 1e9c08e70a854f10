use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use tapline_core::{AccountId, DomainError, DomainResult};

use crate::account::{Account, AccountDirectory};
use crate::invoice::{Invoice, InvoiceHandle, UpdateCall, UpdateJournal};

/// Email address of the seeded demo account.
pub const DEMO_EMAIL: &str = "hello@example.com";

/// In-memory account directory.
///
/// Intended for tests/demos. Every invoice handed out shares one
/// [`UpdateJournal`], so callers can observe which updates were attempted.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<String, Account>>,
    journal: UpdateJournal,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn demo_time(unix_secs: i64) -> DomainResult<DateTime<Utc>> {
    DateTime::from_timestamp(unix_secs, 0)
        .ok_or_else(|| DomainError::invariant(format!("timestamp out of range: {unix_secs}")))
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with [`DEMO_EMAIL`], whose most recent finalized
    /// invoice is `INV-5309`. A newer draft (`INV-5310`) is present and must
    /// be ignored by finalized-invoice selection.
    pub fn demo() -> DomainResult<Self> {
        let directory = Self::new();
        directory.register(
            DEMO_EMAIL,
            vec![
                Invoice::finalized("INV-5307", "Initech", demo_time(1_709_283_600)?)?,
                Invoice::finalized("INV-5309", "Yoyodyne", demo_time(1_714_554_000)?)?,
                Invoice::finalized("INV-5308", "Yoyodyne", demo_time(1_711_962_000)?)?,
                Invoice::draft("INV-5310", "Yoyodyne", demo_time(1_717_232_400)?)?,
            ],
        )?;
        Ok(directory)
    }

    /// Register a new account with its invoices.
    pub fn register(&self, email: &str, invoices: Vec<Invoice>) -> DomainResult<AccountId> {
        let key = normalize_email(email);
        if key.is_empty() {
            return Err(DomainError::validation("email must not be blank"));
        }

        let mut seen = HashSet::new();
        for invoice in &invoices {
            if !seen.insert(invoice.number().clone()) {
                return Err(DomainError::invariant(format!(
                    "duplicate invoice number {} for {key}",
                    invoice.number()
                )));
            }
        }

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| DomainError::invariant("account directory lock poisoned"))?;
        if accounts.contains_key(&key) {
            return Err(DomainError::invariant(format!(
                "account already registered for {key}"
            )));
        }

        let id = AccountId::new();
        let handles = invoices
            .into_iter()
            .map(|invoice| InvoiceHandle::new(invoice, self.journal.clone()))
            .collect();
        accounts.insert(key.clone(), Account::new(id, key, handles));
        Ok(id)
    }

    /// Every update call made through invoices of this directory, oldest first.
    pub fn update_calls(&self) -> Vec<UpdateCall> {
        self.journal.calls()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn find_by_email(&self, email: &str) -> DomainResult<Account> {
        let key = normalize_email(email);
        let accounts = self
            .accounts
            .read()
            .map_err(|_| DomainError::invariant("account directory lock poisoned"))?;
        accounts
            .get(&key)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("account for {key}")))
    }
}
