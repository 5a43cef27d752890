//! Ledger behaviour switches
//!
//! Both policies default to the permissive behaviour: duplicate account names
//! are accepted (lookups return the first match) and amounts are applied as
//! given, sign included.

use clap::ValueEnum;

/// What `create_account` does when the client already has an account with the
/// same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicateNamePolicy {
    /// Append the account anyway; lookups keep returning the first match
    #[default]
    Allow,
    /// Refuse with `DuplicateAccount`
    Reject,
}

/// How amounts passed to create/deposit/withdraw/transfer are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AmountPolicy {
    /// Apply any amount, including negative ones
    #[default]
    Permissive,
    /// Refuse negative amounts with `InvalidAmount`
    RejectNegative,
}

/// Configuration for a [`Ledger`](crate::core::Ledger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerConfig {
    /// Duplicate account name handling
    pub duplicate_names: DuplicateNamePolicy,
    /// Amount validation
    pub amounts: AmountPolicy,
}

impl LedgerConfig {
    /// Create a LedgerConfig with explicit policies
    pub fn new(duplicate_names: DuplicateNamePolicy, amounts: AmountPolicy) -> Self {
        Self {
            duplicate_names,
            amounts,
        }
    }

    /// Configuration with both policies set to reject
    pub fn strict() -> Self {
        Self::new(DuplicateNamePolicy::Reject, AmountPolicy::RejectNegative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let config = LedgerConfig::default();
        assert_eq!(config.duplicate_names, DuplicateNamePolicy::Allow);
        assert_eq!(config.amounts, AmountPolicy::Permissive);
    }

    #[test]
    fn test_strict_rejects_both() {
        let config = LedgerConfig::strict();
        assert_eq!(config.duplicate_names, DuplicateNamePolicy::Reject);
        assert_eq!(config.amounts, AmountPolicy::RejectNegative);
    }
}
