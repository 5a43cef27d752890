//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating the ledger
//! or reading operation scripts. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: unknown client, unknown account
//! - **Domain Refusals**: insufficient funds, non-empty account deletion
//! - **Policy Refusals**: duplicate account name, negative amount (opt-in)
//! - **Arithmetic Errors**: overflow in balance calculations
//! - **Script Errors**: file not found, I/O, malformed CSV rows

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// Every ledger operation returns this on refusal. None of these leave the
/// ledger partially modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The client is not part of the registry
    #[error("Client {client} does not exist")]
    ClientNotFound {
        /// The unknown client
        client: String,
    },

    /// The client exists but has no account with that name
    #[error("Account \"{account}\" does not exist for {client}")]
    AccountNotFound {
        /// Owner that was searched
        client: String,
        /// Account name that was not found
        account: String,
    },

    /// Balance is lower than the requested debit
    #[error("Insufficient funds on account \"{account}\" of {client}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Owner of the debited account
        client: String,
        /// Debited account
        account: String,
        /// Current balance
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Account still holds money and cannot be deleted
    #[error("Account \"{account}\" of {client} is not empty and cannot be deleted: balance {balance}")]
    DeletionBlocked {
        /// Owner of the account
        client: String,
        /// Account that was kept
        account: String,
        /// Current balance
        balance: Decimal,
    },

    /// An account with this name already exists for the client
    ///
    /// Only returned when duplicate names are rejected by configuration.
    #[error("Account \"{account}\" already exists for {client}")]
    DuplicateAccount {
        /// Owner of the account
        client: String,
        /// Duplicated name
        account: String,
    },

    /// Amount is negative or unparsable
    #[error("Invalid amount '{amount}' for {operation}")]
    InvalidAmount {
        /// The rejected amount, as text
        amount: String,
        /// Operation that received it
        operation: String,
    },

    /// Checked decimal arithmetic overflowed
    #[error("Arithmetic overflow in {operation} on account \"{account}\" of {client}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Owner of the account
        client: String,
        /// Account being updated
        account: String,
    },

    /// Script file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation keyword in a script row
    #[error("Invalid operation '{op}'")]
    InvalidOperation {
        /// The keyword that was not recognised
        op: String,
    },

    /// Script row lacks a field its operation needs
    #[error("{op} operation requires a {field}")]
    MissingField {
        /// Operation of the row
        op: String,
        /// Name of the missing column
        field: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create a ClientNotFound error
    pub fn client_not_found(client: &str) -> Self {
        LedgerError::ClientNotFound {
            client: client.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(client: &str, account: &str) -> Self {
        LedgerError::AccountNotFound {
            client: client.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        client: &str,
        account: &str,
        balance: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            client: client.to_string(),
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create a DeletionBlocked error
    pub fn deletion_blocked(client: &str, account: &str, balance: Decimal) -> Self {
        LedgerError::DeletionBlocked {
            client: client.to_string(),
            account: account.to_string(),
            balance,
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(client: &str, account: &str) -> Self {
        LedgerError::DuplicateAccount {
            client: client.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, operation: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, client: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            client: client.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str) -> Self {
        LedgerError::InvalidOperation { op: op.to_string() }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        LedgerError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }
}
