//! Demo seed data
//!
//! Five clients, one funded account each. The binary starts every run from
//! this state.

use crate::core::config::LedgerConfig;
use crate::core::ledger::Ledger;
use crate::core::registry::ClientRegistry;
use rust_decimal::Decimal;
use tracing::debug;

/// (client, account name, balance in whole euros)
pub const SEED_ACCOUNTS: [(&str, &str, i64); 5] = [
    ("Alice", "Compte courant", 5000),
    ("Bob", "Compte courant", 3000),
    ("Charlie", "LDDS", 7000),
    ("Diana", "Compte courant", 10000),
    ("Eve", "Compte commun", 2000),
];

impl Ledger {
    /// Build a ledger holding the demo clients and their accounts
    ///
    /// Seed balances are opening balances: the accounts start with an empty
    /// history.
    pub fn seeded(config: LedgerConfig) -> Self {
        let registry = ClientRegistry::new(SEED_ACCOUNTS.iter().map(|(client, _, _)| *client));
        let mut ledger = Ledger::new(registry, config);

        for (client, account, balance) in SEED_ACCOUNTS {
            // Every seed client is in the registry built just above.
            if let Ok(number) = ledger.insert_funded_account(client, account, Decimal::new(balance, 0)) {
                debug!(client, account, number, balance, "seed account loaded");
            }
        }

        ledger
    }
}
