//! Read-side abstraction over the ledger
//!
//! Reports and output writers consume ledger state through this trait rather
//! than through the concrete [`Ledger`](crate::core::Ledger), so they can never
//! mutate it.

use crate::types::{Account, HistoryEntry, LedgerError};
use rust_decimal::Decimal;

/// Read API of the ledger
pub trait LedgerView {
    /// Registered clients in registration order
    fn clients(&self) -> Vec<&str>;

    /// Accounts of `client`, in creation order
    fn list_accounts(&self, client: &str) -> Result<&[Account], LedgerError>;

    /// History of the first account of `client` named `account`
    fn history(&self, client: &str, account: &str) -> Result<&[HistoryEntry], LedgerError>;

    /// Sum of every balance across all clients and accounts
    fn total_balance(&self) -> Decimal;

    /// Every account paired with its owner, in registry then creation order
    fn all_accounts(&self) -> Vec<(&str, &Account)> {
        self.clients()
            .into_iter()
            .flat_map(move |client| {
                self.list_accounts(client)
                    .unwrap_or_default()
                    .iter()
                    .map(move |account| (client, account))
            })
            .collect()
    }
}
