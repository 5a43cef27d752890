//! Account-related types for the bank ledger
//!
//! This module defines the Account structure: a named, numbered balance with
//! its append-only transaction history.

use super::transaction::HistoryEntry;
use rust_decimal::Decimal;

/// Account identifier
///
/// Assigned from a ledger-wide counter, so numbers never repeat within a ledger.
pub type AccountNumber = u64;

/// A named balance owned by one client
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account number, unique within the ledger
    pub number: AccountNumber,

    /// Human-readable name, used for lookups
    pub name: String,

    balance: Decimal,

    /// Part of the balance not explained by history
    ///
    /// Seeded accounts start with funds and no history. Accounts opened with a
    /// positive deposit record it as a DEPOSIT entry instead.
    opening_balance: Decimal,

    history: Vec<HistoryEntry>,
}

impl Account {
    /// Create an account holding `opening_balance` with an empty history
    pub fn new(number: AccountNumber, name: impl Into<String>, opening_balance: Decimal) -> Self {
        Account {
            number,
            name: name.into(),
            balance: opening_balance,
            opening_balance,
            history: Vec::new(),
        }
    }

    /// Create an account the way `create_account` does
    ///
    /// A positive initial deposit is recorded as one DEPOSIT entry. A zero or
    /// negative one is kept as the opening balance with no history.
    pub fn open(number: AccountNumber, name: impl Into<String>, initial_deposit: Decimal) -> Self {
        if initial_deposit > Decimal::ZERO {
            let mut account = Account::new(number, name, Decimal::ZERO);
            account.record(initial_deposit, HistoryEntry::deposit(initial_deposit));
            account
        } else {
            Account::new(number, name, initial_deposit)
        }
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance the account held before any recorded history
    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Transaction history in chronological order
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Set the new balance and append the entry that explains it
    ///
    /// Callers compute `new_balance` with checked arithmetic before calling,
    /// so this never fails.
    pub(crate) fn record(&mut self, new_balance: Decimal, entry: HistoryEntry) {
        self.balance = new_balance;
        self.history.push(entry);
    }

    /// Balance recomputed from the opening balance and the history
    pub fn replayed_balance(&self) -> Decimal {
        self.history
            .iter()
            .fold(self.opening_balance, |acc, entry| acc + entry.signed_amount())
    }

    /// Whether the balance matches what the history says it should be
    pub fn reconciles(&self) -> bool {
        self.replayed_balance() == self.balance
    }
}
