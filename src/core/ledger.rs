//! Account ledger
//!
//! This module provides the `Ledger` struct which owns every client's accounts
//! and implements the balance-mutating operations.
//!
//! The Ledger is responsible for:
//! - Resolving (client, account name) pairs, distinguishing unknown clients
//!   from unknown accounts
//! - Opening and deleting accounts
//! - Deposits, withdrawals and two-sided transfers
//! - Emitting a notification for every operation outcome
//!
//! Every operation either applies completely or returns an error without
//! touching the ledger.

use crate::core::config::{AmountPolicy, DuplicateNamePolicy, LedgerConfig};
use crate::core::registry::ClientRegistry;
use crate::core::traits::LedgerView;
use crate::types::{Account, AccountNumber, Counterpart, HistoryEntry, LedgerError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

/// Balances left behind by a successful transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Amount moved
    pub amount: Decimal,
    /// Source balance after the debit
    pub from_balance: Decimal,
    /// Destination balance after the credit
    pub to_balance: Decimal,
}

/// In-memory ledger of client accounts
///
/// Each registered client maps to an ordered list of accounts. Lookups by name
/// return the first match, so with duplicate names allowed the later accounts
/// are shadowed.
#[derive(Debug, Clone)]
pub struct Ledger {
    registry: ClientRegistry,
    accounts: HashMap<String, Vec<Account>>,
    next_account_number: AccountNumber,
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger with no accounts for the given clients
    ///
    /// # Arguments
    ///
    /// * `registry` - The fixed set of clients
    /// * `config` - Duplicate-name and amount policies
    pub fn new(registry: ClientRegistry, config: LedgerConfig) -> Self {
        let accounts = registry
            .iter()
            .map(|client| (client.to_string(), Vec::new()))
            .collect();

        Ledger {
            registry,
            accounts,
            next_account_number: 1,
            config,
        }
    }

    /// Policies this ledger was built with
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Registered clients
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Check whether `client` is registered
    ///
    /// A miss is reported as a notification; it is not an error.
    pub fn client_exists(&self, client: &str) -> bool {
        let exists = self.registry.contains(client);
        if !exists {
            warn!(client, "client does not exist");
        }
        exists
    }

    /// Find the first account of `client` named `account`
    ///
    /// Returns `None` when the client is unknown or has no such account.
    pub fn find_account(&self, client: &str, account: &str) -> Option<&Account> {
        self.accounts
            .get(client)?
            .iter()
            .find(|candidate| candidate.name == account)
    }

    /// Resolve an account, reporting why it could not be found
    ///
    /// This is the guard used before every financial operation.
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` - `client` is not registered
    /// * `AccountNotFound` - `client` has no account named `account`
    pub fn ensure_account(&self, client: &str, account: &str) -> Result<&Account, LedgerError> {
        self.require_client(client)?;
        self.find_account(client, account)
            .ok_or_else(|| LedgerError::account_not_found(client, account))
    }

    /// Open a new account for `client`
    ///
    /// The account gets the next account number and a balance equal to
    /// `initial_deposit`. A positive initial deposit is recorded as one
    /// DEPOSIT entry.
    ///
    /// # Arguments
    ///
    /// * `client` - Owner of the new account
    /// * `account` - Name of the new account
    /// * `initial_deposit` - Opening balance
    ///
    /// # Returns
    ///
    /// The number assigned to the new account
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` - `client` is not registered
    /// * `DuplicateAccount` - name already used and duplicates are rejected
    /// * `InvalidAmount` - negative deposit and negative amounts are rejected
    pub fn create_account(
        &mut self,
        client: &str,
        account: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        self.open(client, account, initial_deposit)
            .inspect(|number| {
                info!(
                    client,
                    account,
                    number,
                    initial_deposit = %initial_deposit,
                    "account created"
                )
            })
            .inspect_err(|e| warn!(client, account, error = %e, "account creation refused"))
    }

    fn open(
        &mut self,
        client: &str,
        account: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        self.require_client(client)?;
        self.check_amount(initial_deposit, "create")?;

        if self.config.duplicate_names == DuplicateNamePolicy::Reject
            && self.find_account(client, account).is_some()
        {
            return Err(LedgerError::duplicate_account(client, account));
        }

        let number = self.allocate_account_number();
        self.accounts
            .entry(client.to_string())
            .or_default()
            .push(Account::open(number, account, initial_deposit));

        Ok(number)
    }

    /// Add an account holding `balance` with no history
    ///
    /// Used to load seed data. Policies are not applied.
    pub(crate) fn insert_funded_account(
        &mut self,
        client: &str,
        account: &str,
        balance: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        self.require_client(client)?;

        let number = self.allocate_account_number();
        self.accounts
            .entry(client.to_string())
            .or_default()
            .push(Account::new(number, account, balance));

        Ok(number)
    }

    /// Delete an account whose balance is exactly zero
    ///
    /// # Returns
    ///
    /// The removed account
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` - `client` is not registered
    /// * `AccountNotFound` - `client` has no account named `account`
    /// * `DeletionBlocked` - the balance is not zero
    pub fn delete_account(&mut self, client: &str, account: &str) -> Result<Account, LedgerError> {
        self.remove(client, account)
            .inspect(|removed| info!(client, account, number = removed.number, "account deleted"))
            .inspect_err(|e| warn!(client, account, error = %e, "account deletion refused"))
    }

    fn remove(&mut self, client: &str, account: &str) -> Result<Account, LedgerError> {
        self.require_client(client)?;

        let accounts = self
            .accounts
            .get_mut(client)
            .ok_or_else(|| LedgerError::account_not_found(client, account))?;
        let index = accounts
            .iter()
            .position(|candidate| candidate.name == account)
            .ok_or_else(|| LedgerError::account_not_found(client, account))?;

        let balance = accounts[index].balance();
        if !balance.is_zero() {
            return Err(LedgerError::deletion_blocked(client, account, balance));
        }

        Ok(accounts.remove(index))
    }

    /// Deposit funds into an account
    ///
    /// Adds `amount` to the balance and appends a DEPOSIT entry. Uses checked
    /// arithmetic to prevent overflow.
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` / `AccountNotFound` - the account does not resolve
    /// * `InvalidAmount` - negative amount and negative amounts are rejected
    /// * `ArithmeticOverflow` - the new balance does not fit
    pub fn deposit(
        &mut self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.credit(client, account, amount)
            .inspect(|balance| {
                info!(client, account, amount = %amount, balance = %balance, "deposit applied")
            })
            .inspect_err(|e| warn!(client, account, amount = %amount, error = %e, "deposit refused"))
    }

    fn credit(
        &mut self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.check_amount(amount, "deposit")?;

        let target = self.resolve_mut(client, account)?;
        let new_balance = target
            .balance()
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", client, account))?;

        target.record(new_balance, HistoryEntry::deposit(amount));
        Ok(new_balance)
    }

    /// Withdraw funds from an account
    ///
    /// Succeeds only when the balance covers `amount`; then subtracts it and
    /// appends a WITHDRAW entry.
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` / `AccountNotFound` - the account does not resolve
    /// * `InsufficientFunds` - the balance is lower than `amount`
    /// * `InvalidAmount` - negative amount and negative amounts are rejected
    /// * `ArithmeticOverflow` - the new balance does not fit
    pub fn withdraw(
        &mut self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.debit(client, account, amount)
            .inspect(|balance| {
                info!(client, account, amount = %amount, balance = %balance, "withdrawal applied")
            })
            .inspect_err(|e| {
                warn!(client, account, amount = %amount, error = %e, "withdrawal refused")
            })
    }

    fn debit(
        &mut self,
        client: &str,
        account: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.check_amount(amount, "withdraw")?;

        let target = self.resolve_mut(client, account)?;
        if target.balance() < amount {
            return Err(LedgerError::insufficient_funds(
                client,
                account,
                target.balance(),
                amount,
            ));
        }

        let new_balance = target
            .balance()
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdraw", client, account))?;

        target.record(new_balance, HistoryEntry::withdraw(amount));
        Ok(new_balance)
    }

    /// Move funds from one account to another
    ///
    /// Debits the source, credits the destination, then appends the outgoing
    /// TRANSFER entry to the source history and the incoming one to the
    /// destination history. All checks run before the first write, so either
    /// both sides change or neither does.
    ///
    /// A transfer from an account to itself leaves its balance unchanged and
    /// records both entries on it.
    ///
    /// # Returns
    ///
    /// A [`TransferReceipt`] with both new balances
    ///
    /// # Errors
    ///
    /// * `ClientNotFound` - either client is not registered
    /// * `AccountNotFound` - either account does not exist (source reported first)
    /// * `InsufficientFunds` - the source balance is lower than `amount`
    /// * `InvalidAmount` - negative amount and negative amounts are rejected
    /// * `ArithmeticOverflow` - a new balance does not fit
    pub fn transfer(
        &mut self,
        from_client: &str,
        from_account: &str,
        to_client: &str,
        to_account: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        self.move_funds(from_client, from_account, to_client, to_account, amount)
            .inspect(|receipt| {
                info!(
                    from_client,
                    from_account,
                    to_client,
                    to_account,
                    amount = %amount,
                    from_balance = %receipt.from_balance,
                    to_balance = %receipt.to_balance,
                    "transfer applied"
                )
            })
            .inspect_err(|e| {
                if matches!(e, LedgerError::AccountNotFound { .. }) {
                    warn!(
                        from_client,
                        from_account, to_client, to_account, "one or both accounts do not exist"
                    );
                }
                warn!(
                    from_client,
                    from_account,
                    to_client,
                    to_account,
                    amount = %amount,
                    error = %e,
                    "transfer refused"
                )
            })
    }

    fn move_funds(
        &mut self,
        from_client: &str,
        from_account: &str,
        to_client: &str,
        to_account: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        self.check_amount(amount, "transfer")?;
        self.require_client(from_client)?;
        self.require_client(to_client)?;

        let source = self
            .find_account(from_client, from_account)
            .ok_or_else(|| LedgerError::account_not_found(from_client, from_account))?;
        let destination = self
            .find_account(to_client, to_account)
            .ok_or_else(|| LedgerError::account_not_found(to_client, to_account))?;

        if source.balance() < amount {
            return Err(LedgerError::insufficient_funds(
                from_client,
                from_account,
                source.balance(),
                amount,
            ));
        }

        let from_balance = source
            .balance()
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", from_client, from_account))?;

        let same_account = from_client == to_client && from_account == to_account;
        let credited_from = if same_account {
            from_balance
        } else {
            destination.balance()
        };
        let to_balance = credited_from
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", to_client, to_account))?;

        // Both sides validated; nothing below can fail.
        let outgoing = HistoryEntry::transfer(amount, Counterpart::outgoing(to_client, to_account));
        let incoming =
            HistoryEntry::transfer(amount, Counterpart::incoming(from_client, from_account));

        self.resolve_mut(from_client, from_account)?
            .record(from_balance, outgoing);
        self.resolve_mut(to_client, to_account)?
            .record(to_balance, incoming);

        Ok(TransferReceipt {
            amount,
            from_balance,
            to_balance,
        })
    }

    /// Whether the account holds a positive balance
    ///
    /// Returns `false` when the account does not resolve.
    pub fn is_non_empty(&self, client: &str, account: &str) -> bool {
        match self.ensure_account(client, account) {
            Ok(found) if found.balance() > Decimal::ZERO => {
                info!(
                    client,
                    account,
                    balance = %found.balance(),
                    "account is not empty and cannot be deleted"
                );
                true
            }
            Ok(_) => {
                info!(client, account, "account is empty and can be deleted");
                false
            }
            Err(e) => {
                warn!(client, account, error = %e, "account check failed");
                false
            }
        }
    }

    /// Whether the account balance is below zero
    ///
    /// Returns `false` when the account does not resolve.
    pub fn is_negative(&self, client: &str, account: &str) -> bool {
        match self.ensure_account(client, account) {
            Ok(found) => {
                let negative = found.balance() < Decimal::ZERO;
                if negative {
                    info!(client, account, balance = %found.balance(), "account is negative");
                } else {
                    info!(client, account, balance = %found.balance(), "account is not negative");
                }
                negative
            }
            Err(e) => {
                warn!(client, account, error = %e, "account check failed");
                false
            }
        }
    }

    fn require_client(&self, client: &str) -> Result<(), LedgerError> {
        if self.registry.contains(client) {
            Ok(())
        } else {
            Err(LedgerError::client_not_found(client))
        }
    }

    fn resolve_mut(&mut self, client: &str, account: &str) -> Result<&mut Account, LedgerError> {
        self.require_client(client)?;
        self.accounts
            .get_mut(client)
            .and_then(|accounts| accounts.iter_mut().find(|candidate| candidate.name == account))
            .ok_or_else(|| LedgerError::account_not_found(client, account))
    }

    fn check_amount(&self, amount: Decimal, operation: &str) -> Result<(), LedgerError> {
        match self.config.amounts {
            AmountPolicy::RejectNegative if amount < Decimal::ZERO => Err(
                LedgerError::invalid_amount(&amount.to_string(), operation),
            ),
            _ => Ok(()),
        }
    }

    fn allocate_account_number(&mut self) -> AccountNumber {
        let number = self.next_account_number;
        self.next_account_number += 1;
        number
    }
}

impl LedgerView for Ledger {
    fn clients(&self) -> Vec<&str> {
        self.registry.iter().collect()
    }

    fn list_accounts(&self, client: &str) -> Result<&[Account], LedgerError> {
        self.require_client(client)?;
        Ok(self
            .accounts
            .get(client)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    fn history(&self, client: &str, account: &str) -> Result<&[HistoryEntry], LedgerError> {
        self.ensure_account(client, account)
            .map(|found| found.history())
    }

    fn total_balance(&self) -> Decimal {
        self.accounts
            .values()
            .flatten()
            .map(Account::balance)
            .sum()
    }
}
