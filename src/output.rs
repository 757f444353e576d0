//! Colored console output for proposal checks.
//!
//! Color scheme: blue+bold headers, cyan values, green success,
//! yellow warnings, red failures, dimmed secondary text.

use alloy_primitives::{utils::format_ether, Address, U256};
use colored::Colorize;
use std::fmt;

use crate::governance::{Stage, VoteOutcome};

// ── Helpers ────────────────────────────────────────────────────────

/// Format an 18-decimals token amount, trimming trailing zeros.
///
/// - `500000 * 10^18` → `"500000.0"`
/// - `1.5 * 10^18` → `"1.5"`
pub fn format_token_amount(amount: U256) -> String {
    let formatted = format_ether(amount);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{whole}.{fraction}")
        }
        None => formatted,
    }
}

// ── Run ────────────────────────────────────────────────────────────

/// Print the header of a check run.
pub fn print_banner(proposal: u64, node_url: &str) {
    println!();
    println!("{}", format!("=== Proposal {proposal} ===").blue().bold());
    println!("  Node:         {}", node_url.cyan());
}

/// Print that a lifecycle stage completed.
pub fn print_stage(stage: Stage, detail: impl fmt::Display) {
    println!("  {} {}: {}", "OK".green().bold(), stage.to_string().cyan(), detail);
}

/// Print one voter's outcome.
pub fn print_vote(voter: &Address, outcome: &VoteOutcome) {
    let status = match outcome {
        VoteOutcome::Cast { .. } => "voted".green(),
        VoteOutcome::Ineligible(_) => "couldn't vote".yellow(),
        VoteOutcome::Reverted(_) => "reverted".yellow(),
    };
    println!("    {} {}", format!("{voter}").cyan(), status);
    if let VoteOutcome::Ineligible(reason) | VoteOutcome::Reverted(reason) = outcome {
        println!("      {}", reason.dimmed());
    }
}

// ── Assertions ─────────────────────────────────────────────────────

/// Print a passed assertion.
pub fn print_ok(msg: &str) {
    println!("  {} {}", "OK".green().bold(), msg);
}

/// Print a validated execution event.
pub fn print_event_ok(index: usize, name: &str, origin: &Address) {
    println!(
        "  {} event #{} is expected {} from {}",
        "OK".green().bold(),
        index.to_string().cyan(),
        name.cyan(),
        format!("{origin}").dimmed(),
    );
}

/// Print a treasury balance in token units.
pub fn print_balance(label: &str, amount: U256) {
    println!(
        "  {} {}",
        format!("Treasury balance {label}:").dimmed(),
        format_token_amount(amount).cyan()
    );
}

/// Print a non-fatal warning.
pub fn print_warning(msg: &str) {
    println!("  {} {}", "WARNING:".yellow().bold(), msg);
}

// ── Result ─────────────────────────────────────────────────────────

/// Print that every assertion of a proposal passed.
pub fn print_passed(proposal: u64) {
    println!();
    println!("{}", format!("Proposal {proposal}: all checks passed").green().bold());
}

/// Print the error that failed the run.
pub fn print_failure(proposal: u64, error: &dyn fmt::Display) {
    println!();
    println!("{} {}", format!("Proposal {proposal} FAILED:").red().bold(), error.to_string().red());
}

// ── Tests ───────────────────────────────────────────────────────────
