//! Demonstration entry point: update the company name on the demo account's
//! most recent finalized invoice using one of the injection variants.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use tapline_invoicing::in_memory::DEMO_EMAIL;
use tapline_invoicing::{
    AccountDirectory, CompanyUpdater, InMemoryAccountDirectory, InvoiceSnapshot, TracingSink,
    UpdateStatus, Variant,
};

#[derive(Parser, Debug)]
#[command(
    name = "tapline",
    version,
    about = "Inject logging into an invoice update chain, several ways"
)]
struct Cli {
    /// Email of the account to update.
    #[arg(long, env = "TAPLINE_EMAIL", default_value = DEMO_EMAIL)]
    email: String,

    /// New company name for the most recent finalized invoice.
    #[arg(long, env = "TAPLINE_COMPANY", default_value = "Yoyodyne Int'l")]
    company: String,

    /// Implementation to run (see --list).
    #[arg(long, env = "TAPLINE_VARIANT", default_value_t = Variant::InlineTap)]
    variant: Variant,

    /// Run the update this many times.
    #[arg(
        long,
        env = "TAPLINE_REPEAT",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    repeat: u32,

    /// Print the available variants and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct Outcome {
    variant: String,
    status: UpdateStatus,
    updates: usize,
    invoice: InvoiceSnapshot,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for variant in Variant::ALL {
            println!("{:<28} {}", variant.name(), variant.description());
        }
        return Ok(());
    }

    tapline_observability::init();

    let directory = InMemoryAccountDirectory::demo().context("failed to seed demo directory")?;
    let updater = CompanyUpdater::new(&directory, TracingSink);

    let mut status = UpdateStatus::Rejected;
    for attempt in 1..=cli.repeat {
        status = updater
            .update_invoice_company(cli.variant, &cli.email, &cli.company)
            .with_context(|| format!("variant {} failed on attempt {attempt}", cli.variant))?;
        tracing::debug!(attempt, ?status, "update finished");
    }

    let invoice = directory
        .find_by_email(&cli.email)?
        .finalized_invoices()
        .most_recent()?
        .snapshot();

    let outcome = Outcome {
        variant: cli.variant.to_string(),
        status,
        updates: directory.update_calls().len(),
        invoice,
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
