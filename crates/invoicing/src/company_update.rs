//! `update_invoice_company`, written several ways.
//!
//! Every variant locates the account by email, picks its most recent finalized
//! invoice and sets the company name. They differ only in how (and whether) the
//! `Updating <number>` line is injected before the update. The variants are
//! kept side by side on purpose: the buggy ones document failure modes and are
//! exercised by tests.

use core::str::FromStr;

use tapline_core::{DomainError, DomainResult, Pipe, Tap};

use crate::account::AccountDirectory;
use crate::chain::ChainValue;
use crate::invoice::{InvoiceHandle, InvoiceUpdate, UpdateStatus};
use crate::log_sink::{LogSink, TracingSink};

/// The log line emitted before an update.
pub fn updating_message(invoice: &InvoiceHandle) -> String {
    format!("Updating {}", invoice.number())
}

/// Standalone logging step for [`Variant::FactoredTap`].
///
/// Takes the invoice as its only parameter and writes through the process-wide
/// logger, so it can be handed to `tap` as a plain function.
pub fn log_invoice(invoice: &InvoiceHandle) -> bool {
    TracingSink.info(&updating_message(invoice))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// No logging, one chain.
    PlainChain,
    /// Invoice bound to a local, logged, then updated.
    ExtractedLocal,
    /// [`Variant::ExtractedLocal`] with the log line deleted but the chain not
    /// collapsed back: the local ends up holding the status flag.
    ExtractedLocalLogRemoved,
    /// Pipe-style injection whose block returns the logger's result.
    InlinePipeBuggy,
    /// Pipe-style injection whose block returns the invoice it was given.
    InlinePipe,
    /// Tap-style injection with an inline block.
    InlineTap,
    /// Tap-style injection of the standalone [`log_invoice`] function.
    FactoredTap,
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::PlainChain,
        Variant::ExtractedLocal,
        Variant::ExtractedLocalLogRemoved,
        Variant::InlinePipeBuggy,
        Variant::InlinePipe,
        Variant::InlineTap,
        Variant::FactoredTap,
    ];

    /// Variants that complete the update without error.
    pub const CORRECT: [Variant; 5] = [
        Variant::PlainChain,
        Variant::ExtractedLocal,
        Variant::InlinePipe,
        Variant::InlineTap,
        Variant::FactoredTap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::PlainChain => "plain-chain",
            Variant::ExtractedLocal => "extracted-local",
            Variant::ExtractedLocalLogRemoved => "extracted-local-log-removed",
            Variant::InlinePipeBuggy => "inline-pipe-buggy",
            Variant::InlinePipe => "inline-pipe",
            Variant::InlineTap => "inline-tap",
            Variant::FactoredTap => "factored-tap",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::PlainChain => "direct call chain, no logging",
            Variant::ExtractedLocal => "bind invoice to a local, log, then update",
            Variant::ExtractedLocalLogRemoved => {
                "local binding left behind after the log line was removed (fails after updating)"
            }
            Variant::InlinePipeBuggy => {
                "pipe block returns the logger result, update hits a flag (fails)"
            }
            Variant::InlinePipe => "pipe block returns the invoice it was given",
            Variant::InlineTap => "tap with an inline logging block",
            Variant::FactoredTap => "tap with the standalone log_invoice function",
        }
    }

    /// Whether this variant emits the `Updating <number>` line.
    pub fn logs(self) -> bool {
        !matches!(
            self,
            Variant::PlainChain | Variant::ExtractedLocalLogRemoved
        )
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown variant: {s}")))
    }
}

/// Runs the company-name update against a directory, logging through a sink.
#[derive(Debug)]
pub struct CompanyUpdater<D, L> {
    directory: D,
    sink: L,
}

impl<D: AccountDirectory, L: LogSink> CompanyUpdater<D, L> {
    pub fn new(directory: D, sink: L) -> Self {
        Self { directory, sink }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    /// Dispatch to the chosen variant.
    pub fn update_invoice_company(
        &self,
        variant: Variant,
        email: &str,
        new_company: &str,
    ) -> DomainResult<UpdateStatus> {
        tracing::debug!(%variant, email, "update_invoice_company");
        match variant {
            Variant::PlainChain => self.plain_chain(email, new_company),
            Variant::ExtractedLocal => self.extracted_local(email, new_company),
            Variant::ExtractedLocalLogRemoved => {
                self.extracted_local_log_removed(email, new_company)
            }
            Variant::InlinePipeBuggy => self.inline_pipe_buggy(email, new_company),
            Variant::InlinePipe => self.inline_pipe(email, new_company),
            Variant::InlineTap => self.inline_tap(email, new_company),
            Variant::FactoredTap => self.factored_tap(email, new_company),
        }
    }

    pub fn plain_chain(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        Ok(self
            .directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .update(InvoiceUpdate::company_name(new_company)))
    }

    pub fn extracted_local(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        let invoice = self
            .directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?;
        self.sink.info(&updating_message(&invoice));
        Ok(invoice.update(InvoiceUpdate::company_name(new_company)))
    }

    /// The update goes through, then the later read of `invoice` fails because
    /// the name now holds the update's flag.
    pub fn extracted_local_log_removed(
        &self,
        email: &str,
        new_company: &str,
    ) -> DomainResult<UpdateStatus> {
        let invoice: ChainValue = self
            .directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .update(InvoiceUpdate::company_name(new_company))
            .into();
        let number = invoice.number()?;
        tracing::debug!(%number, "company name updated");
        invoice.status()
    }

    /// Always fails: the block's return value (the logger's `true`) replaces
    /// the invoice, and `update` is then invoked on that flag.
    pub fn inline_pipe_buggy(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        self.directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .pipe(|invoice| ChainValue::from(self.sink.info(&updating_message(&invoice))))
            .update(InvoiceUpdate::company_name(new_company))
    }

    pub fn inline_pipe(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        self.directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .pipe(|invoice| {
                self.sink.info(&updating_message(&invoice));
                ChainValue::from(invoice)
            })
            .update(InvoiceUpdate::company_name(new_company))
    }

    pub fn inline_tap(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        Ok(self
            .directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .tap(|invoice| self.sink.info(&updating_message(invoice)))
            .update(InvoiceUpdate::company_name(new_company)))
    }

    /// Logs through [`log_invoice`], i.e. the process-wide logger rather than
    /// this updater's sink.
    pub fn factored_tap(&self, email: &str, new_company: &str) -> DomainResult<UpdateStatus> {
        Ok(self
            .directory
            .find_by_email(email)?
            .finalized_invoices()
            .most_recent()?
            .tap(log_invoice)
            .update(InvoiceUpdate::company_name(new_company)))
    }
}
