//! Transaction-related types for the bank ledger
//!
//! This module defines the history entries recorded on accounts and the
//! operations that can be applied to the ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// Kind of balance-affecting event recorded in an account history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Funds credited to the account
    Deposit,

    /// Funds debited from the account
    Withdraw,

    /// Funds moved between two accounts
    ///
    /// The direction lives in the entry's [`Counterpart`].
    Transfer,
}

impl EntryKind {
    /// Upper-case tag used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "DEPOSIT",
            EntryKind::Withdraw => "WITHDRAW",
            EntryKind::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a transfer an entry was recorded on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferDirection {
    /// Recorded on the source account, funds left it
    Outgoing,
    /// Recorded on the destination account, funds arrived
    Incoming,
}

/// The other side of a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    /// Client owning the other account
    pub client: String,

    /// Name of the other account
    pub account: String,

    /// Direction of the transfer as seen from the account holding the entry
    pub direction: TransferDirection,
}

impl Counterpart {
    /// Counterpart for the source side: points at the destination
    pub fn outgoing(client: &str, account: &str) -> Self {
        Counterpart {
            client: client.to_string(),
            account: account.to_string(),
            direction: TransferDirection::Outgoing,
        }
    }

    /// Counterpart for the destination side: points at the source
    pub fn incoming(client: &str, account: &str) -> Self {
        Counterpart {
            client: client.to_string(),
            account: account.to_string(),
            direction: TransferDirection::Incoming,
        }
    }
}

/// Immutable record of one balance-affecting event
///
/// Entries are only ever appended to an account history. Each one carries a
/// random v4 identifier, so the two halves of a transfer never share an id.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Unique entry identifier
    pub id: Uuid,

    /// Deposit, withdraw or transfer
    pub kind: EntryKind,

    /// Magnitude of the movement
    pub amount: Decimal,

    /// Other side of the movement, present only for transfers
    pub counterpart: Option<Counterpart>,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(kind: EntryKind, amount: Decimal, counterpart: Option<Counterpart>) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            kind,
            amount,
            counterpart,
            created_at: Utc::now(),
        }
    }

    /// Create a DEPOSIT entry
    pub fn deposit(amount: Decimal) -> Self {
        Self::new(EntryKind::Deposit, amount, None)
    }

    /// Create a WITHDRAW entry
    pub fn withdraw(amount: Decimal) -> Self {
        Self::new(EntryKind::Withdraw, amount, None)
    }

    /// Create a TRANSFER entry pointing at `counterpart`
    pub fn transfer(amount: Decimal, counterpart: Counterpart) -> Self {
        Self::new(EntryKind::Transfer, amount, Some(counterpart))
    }

    /// Effect of this entry on the balance of the account holding it
    ///
    /// Deposits and incoming transfers count positive, withdrawals and
    /// outgoing transfers count negative.
    pub fn signed_amount(&self) -> Decimal {
        match (self.kind, self.counterpart.as_ref().map(|c| c.direction)) {
            (EntryKind::Deposit, _) => self.amount,
            (EntryKind::Withdraw, _) => -self.amount,
            (EntryKind::Transfer, Some(TransferDirection::Incoming)) => self.amount,
            (EntryKind::Transfer, _) => -self.amount,
        }
    }
}

/// Operation types accepted by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Open a new account
    Create,
    /// Credit an account
    Deposit,
    /// Debit an account
    Withdraw,
    /// Move funds between two accounts
    Transfer,
    /// Remove an empty account
    Delete,
}

impl OperationType {
    /// Lower-case name, as written in operation scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Create => "create",
            OperationType::Deposit => "deposit",
            OperationType::Withdraw => "withdraw",
            OperationType::Transfer => "transfer",
            OperationType::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger operation with its arguments
///
/// This is what a script row turns into once it has been validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open `account` for `client` with an initial deposit
    Create {
        client: String,
        account: String,
        initial_deposit: Decimal,
    },

    /// Credit `amount` to `account` of `client`
    Deposit {
        client: String,
        account: String,
        amount: Decimal,
    },

    /// Debit `amount` from `account` of `client`
    Withdraw {
        client: String,
        account: String,
        amount: Decimal,
    },

    /// Move `amount` from one account to another
    Transfer {
        from_client: String,
        from_account: String,
        to_client: String,
        to_account: String,
        amount: Decimal,
    },

    /// Remove `account` of `client`
    Delete { client: String, account: String },
}

impl Operation {
    /// Type of this operation
    pub fn op_type(&self) -> OperationType {
        match self {
            Operation::Create { .. } => OperationType::Create,
            Operation::Deposit { .. } => OperationType::Deposit,
            Operation::Withdraw { .. } => OperationType::Withdraw,
            Operation::Transfer { .. } => OperationType::Transfer,
            Operation::Delete { .. } => OperationType::Delete,
        }
    }

    /// Clients whose accounts this operation reads or writes
    pub fn clients(&self) -> Vec<&str> {
        match self {
            Operation::Create { client, .. }
            | Operation::Deposit { client, .. }
            | Operation::Withdraw { client, .. }
            | Operation::Delete { client, .. } => vec![client.as_str()],
            Operation::Transfer {
                from_client,
                to_client,
                ..
            } => vec![from_client.as_str(), to_client.as_str()],
        }
    }
}
