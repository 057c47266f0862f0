//! Rebot Intel - offline address classifier
//!
//! Usage:
//!   rebot_intel <address> [blockchain_hint]
//!
//! Prints every family whose format the address satisfies, the
//! disambiguation outcome and the explorer for each candidate. No network.

use rebot_intel::{disambiguate, AddressFormatMatcher, Disambiguation, Rejection};

use eyre::{eyre, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args
        .next()
        .ok_or_else(|| eyre!("usage: rebot_intel <address> [blockchain_hint]"))?;
    let hint = args.next();

    let address = AddressFormatMatcher::new().parse(&raw);
    if !address.is_recognized() {
        println!("❌ {}", Rejection::Format { input: raw }.message());
        return Ok(());
    }

    println!("🔎 Address:    {}", address.normalized());
    println!("📋 Candidates:");
    for family in address.families() {
        let spec = family.spec();
        println!(
            "   - {:<13} {} ({}), explorer: {}, risk scoring: {}",
            family.as_str(),
            spec.display_name,
            spec.native_symbol,
            spec.explorer_name,
            if spec.risk_scoring { "yes" } else { "no" }
        );
    }

    match disambiguate(address.families(), hint.as_deref()) {
        Disambiguation::Resolved(family) => {
            println!("✅ Resolved:   {}", family);
        }
        Disambiguation::NoCandidates => {
            println!("❌ {}", Rejection::Format { input: raw }.message());
        }
        Disambiguation::ClarificationNeeded(candidates) => {
            println!("❓ {}", Rejection::Clarification(candidates).message());
        }
        Disambiguation::InvalidHint { hint, candidates } => {
            println!("❌ {}", Rejection::InvalidHint { hint, candidates }.message());
        }
    }

    Ok(())
}
