//! Shared ledger handle for concurrent callers
//!
//! `SharedLedger` wraps a [`Ledger`] in an `Arc<tokio::sync::Mutex<_>>`. Each
//! operation takes the lock once and runs to completion under it, so a
//! transfer's debit, credit and both history appends are observed together or
//! not at all.
//!
//! The handle is cheap to clone; clones share the same ledger.

use crate::core::engine::apply;
use crate::core::ledger::{Ledger, TransferReceipt};
use crate::core::traits::LedgerView;
use crate::types::{Account, AccountNumber, LedgerError, Operation};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Thread-safe handle to a ledger
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger
    ///
    /// The lock is held for the whole call.
    pub async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Ledger) -> T,
    {
        let mut ledger = self.inner.lock().await;
        f(&mut *ledger)
    }

    /// Run `f` against a consistent view of the ledger
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Ledger) -> T,
    {
        let ledger = self.inner.lock().await;
        f(&*ledger)
    }

    /// See [`Ledger::create_account`]
    pub async fn create_account(
        &self,
        client: &str,
        account: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        self.update(|ledger| ledger.create_account(client, account, initial_deposit))
            .await
    }

    /// See [`Ledger::deposit`]
    pub async fn deposit(
        &self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.update(|ledger| ledger.deposit(client, account, amount))
            .await
    }

    /// See [`Ledger::withdraw`]
    pub async fn withdraw(
        &self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.update(|ledger| ledger.withdraw(client, account, amount))
            .await
    }

    /// See [`Ledger::transfer`]
    pub async fn transfer(
        &self,
        from_client: &str,
        from_account: &str,
        to_client: &str,
        to_account: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        self.update(|ledger| {
            ledger.transfer(from_client, from_account, to_client, to_account, amount)
        })
        .await
    }

    /// See [`Ledger::delete_account`]
    pub async fn delete_account(&self, client: &str, account: &str) -> Result<Account, LedgerError> {
        self.update(|ledger| ledger.delete_account(client, account))
            .await
    }

    /// Apply a script operation under the lock
    pub async fn apply(&self, operation: &Operation) -> Result<(), LedgerError> {
        self.update(|ledger| apply(ledger, operation)).await
    }

    /// Copy of the first account of `client` named `account`
    pub async fn account(&self, client: &str, account: &str) -> Result<Account, LedgerError> {
        self.read(|ledger| ledger.ensure_account(client, account).cloned())
            .await
    }

    /// Sum of every balance
    pub async fn total_balance(&self) -> Decimal {
        self.read(|ledger| ledger.total_balance()).await
    }

    /// Copy of the whole ledger
    pub async fn snapshot(&self) -> Ledger {
        self.read(Ledger::clone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LedgerConfig;
    use crate::types::EntryKind;

    fn shared() -> SharedLedger {
        SharedLedger::new(Ledger::seeded(LedgerConfig::default()))
    }

    #[tokio::test]
    async fn test_operations_go_through_the_lock() {
        let ledger = shared();

        ledger
            .create_account("Alice", "Savings", Decimal::new(100, 0))
            .await
            .unwrap();
        ledger
            .deposit("Alice", "Savings", Decimal::new(50, 0))
            .await
            .unwrap();
        ledger
            .withdraw("Alice", "Savings", Decimal::new(150, 0))
            .await
            .unwrap();
        ledger.delete_account("Alice", "Savings").await.unwrap();

        assert!(matches!(
            ledger.account("Alice", "Savings").await,
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert_eq!(ledger.total_balance().await, Decimal::new(27000, 0));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ledger = shared();
        let clone = ledger.clone();

        clone
            .deposit("Eve", "Compte commun", Decimal::new(1, 0))
            .await
            .unwrap();

        let eve = ledger.account("Eve", "Compte commun").await.unwrap();
        assert_eq!(eve.balance(), Decimal::new(2001, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transfers_conserve_total() {
        let ledger = shared();
        let pairs = [
            ("Alice", "Compte courant", "Bob", "Compte courant"),
            ("Bob", "Compte courant", "Charlie", "LDDS"),
            ("Charlie", "LDDS", "Diana", "Compte courant"),
            ("Diana", "Compte courant", "Eve", "Compte commun"),
            ("Eve", "Compte commun", "Alice", "Compte courant"),
        ];

        let mut tasks = Vec::new();
        for round in 0..40 {
            let ledger = ledger.clone();
            let (from_client, from_account, to_client, to_account) = pairs[round % pairs.len()];
            tasks.push(tokio::spawn(async move {
                ledger
                    .transfer(
                        from_client,
                        from_account,
                        to_client,
                        to_account,
                        Decimal::new(250, 0),
                    )
                    .await
            }));
        }

        let mut applied = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                applied += 1;
            }
        }

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.total_balance(), Decimal::new(27000, 0));

        let transfer_entries: usize = snapshot
            .all_accounts()
            .into_iter()
            .map(|(_, account)| {
                assert!(account.reconciles());
                assert!(account.balance() >= Decimal::ZERO);
                account
                    .history()
                    .iter()
                    .filter(|entry| entry.kind == EntryKind::Transfer)
                    .count()
            })
            .sum();
        assert_eq!(transfer_entries, applied * 2);
    }

    #[tokio::test]
    async fn test_apply_reports_refusal() {
        let ledger = shared();

        let result = ledger
            .apply(&Operation::Delete {
                client: "Charlie".to_string(),
                account: "LDDS".to_string(),
            })
            .await;

        assert!(matches!(result, Err(LedgerError::DeletionBlocked { .. })));
        assert!(ledger.account("Charlie", "LDDS").await.is_ok());
    }
}
