//! Operation processing engine
//!
//! This module provides the LedgerEngine that applies script operations to a
//! [`Ledger`] and keeps a count of what was applied and what was refused.
//!
//! The engine only dispatches: every rule (existence checks, sufficient
//! funds, deletion guard, policies) is enforced by the ledger itself.

use crate::core::ledger::Ledger;
use crate::types::{LedgerError, Operation};

/// Apply one operation to a ledger
///
/// # Arguments
///
/// * `ledger` - The ledger to mutate
/// * `operation` - The operation to apply
///
/// # Returns
///
/// * `Ok(())` if the operation was applied
/// * `Err(LedgerError)` if the ledger refused it; the ledger is unchanged
pub fn apply(ledger: &mut Ledger, operation: &Operation) -> Result<(), LedgerError> {
    match operation {
        Operation::Create {
            client,
            account,
            initial_deposit,
        } => ledger
            .create_account(client, account, *initial_deposit)
            .map(|_| ()),
        Operation::Deposit {
            client,
            account,
            amount,
        } => ledger.deposit(client, account, *amount).map(|_| ()),
        Operation::Withdraw {
            client,
            account,
            amount,
        } => ledger.withdraw(client, account, *amount).map(|_| ()),
        Operation::Transfer {
            from_client,
            from_account,
            to_client,
            to_account,
            amount,
        } => ledger
            .transfer(from_client, from_account, to_client, to_account, *amount)
            .map(|_| ()),
        Operation::Delete { client, account } => {
            ledger.delete_account(client, account).map(|_| ())
        }
    }
}

/// Counters of processed operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Operations the ledger applied
    pub applied: usize,
    /// Operations the ledger refused
    pub refused: usize,
}

impl ProcessingStats {
    /// Count one outcome
    pub fn record<T>(&mut self, outcome: &Result<T, LedgerError>) {
        match outcome {
            Ok(_) => self.applied += 1,
            Err(_) => self.refused += 1,
        }
    }

    /// Add another set of counters to this one
    pub fn merge(&mut self, other: ProcessingStats) {
        self.applied += other.applied;
        self.refused += other.refused;
    }

    /// Total operations seen
    pub fn total(&self) -> usize {
        self.applied + self.refused
    }
}

/// Sequential operation engine
///
/// Owns a ledger and applies operations to it one at a time, in order.
#[derive(Debug)]
pub struct LedgerEngine {
    ledger: Ledger,
    stats: ProcessingStats,
}

impl LedgerEngine {
    /// Create a new LedgerEngine around an existing ledger
    pub fn new(ledger: Ledger) -> Self {
        LedgerEngine {
            ledger,
            stats: ProcessingStats::default(),
        }
    }

    /// Process a single operation
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation to apply
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the operation was applied
    /// * `Err(LedgerError)` if it was refused
    ///
    /// # Errors
    ///
    /// Any refusal of the underlying [`Ledger`] operation. A refusal is not
    /// fatal: the engine stays usable and the ledger unchanged.
    pub fn process(&mut self, operation: &Operation) -> Result<(), LedgerError> {
        let outcome = apply(&mut self.ledger, operation);
        self.stats.record(&outcome);
        outcome
    }

    /// The ledger in its current state
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Counters so far
    pub fn stats(&self) -> ProcessingStats {
        self.stats
    }

    /// Consume the engine and return its ledger
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }
}
