//! Human-readable ledger reports
//!
//! Text rendering of account lists, histories and the grand total. Every
//! function here reads the ledger through [`LedgerView`] and writes to any
//! `std::io::Write`.

use crate::core::traits::LedgerView;
use crate::types::{EntryKind, HistoryEntry, LedgerError};
use chrono::Local;
use std::io::Write;

/// Timestamp layout used in history lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Entry text without its timestamp
///
/// `TYPE: amount€`, followed for transfers by ` with <account> (<client>)`
/// naming the other side.
pub fn entry_summary(entry: &HistoryEntry) -> String {
    let mut message = format!("{}: {}€", entry.kind, entry.amount);
    if let (EntryKind::Transfer, Some(counterpart)) = (entry.kind, &entry.counterpart) {
        message.push_str(&format!(
            " with {} ({})",
            counterpart.account, counterpart.client
        ));
    }
    message
}

/// Entry text with its creation time in local time
pub fn format_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} - {}",
        entry_summary(entry),
        entry.created_at.with_timezone(&Local).format(TIMESTAMP_FORMAT)
    )
}

/// Write the accounts of `client`
///
/// # Errors
///
/// `ClientNotFound` for an unknown client, `IoError` if writing fails.
pub fn write_accounts<V>(view: &V, client: &str, out: &mut dyn Write) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    let accounts = view.list_accounts(client)?;

    writeln!(out, "Accounts for {}:", client)?;
    for account in accounts {
        writeln!(
            out,
            "- {} (No. {}): {}€",
            account.name,
            account.number,
            account.balance()
        )?;
    }

    Ok(())
}

/// Write the numbered history of one account
///
/// # Errors
///
/// `ClientNotFound` / `AccountNotFound` when the account does not resolve,
/// `IoError` if writing fails.
pub fn write_history<V>(
    view: &V,
    client: &str,
    account: &str,
    out: &mut dyn Write,
) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    let history = view.history(client, account)?;

    writeln!(
        out,
        "Transaction history for account \"{}\" of {}:",
        account, client
    )?;
    for (index, entry) in history.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, format_entry(entry))?;
    }

    Ok(())
}

/// Write the sum of every balance
pub fn write_total<V>(view: &V, out: &mut dyn Write) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    writeln!(
        out,
        "Total money across all accounts: {}€",
        view.total_balance()
    )?;
    Ok(())
}

/// Write the full report: every client's accounts and histories, then the
/// grand total
pub fn write_report<V>(view: &V, out: &mut dyn Write) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    for client in view.clients() {
        write_accounts(view, client, out)?;
        for account in view.list_accounts(client)? {
            write_history(view, client, &account.name, out)?;
        }
        writeln!(out)?;
    }

    write_total(view, out)
}
