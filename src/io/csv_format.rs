//! CSV format handling for operation scripts and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization of script rows
//! - Conversion from CSV records to [`Operation`] values
//! - Account output serialization
//!
//! All functions are pure (no file access) for easy testing.

use crate::core::traits::LedgerView;
use crate::types::{LedgerError, Operation, OperationType};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// One row of an operation script
///
/// Header: `op,client,account,amount,to_client,to_account`. Trailing columns
/// may be omitted when the operation does not use them.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    /// Operation keyword (case-insensitive)
    pub op: String,
    /// Client owning the account (source client for transfers)
    pub client: String,
    /// Account name (source account for transfers)
    pub account: String,
    /// Amount as text; parsed during conversion
    #[serde(default)]
    pub amount: Option<String>,
    /// Destination client of a transfer
    #[serde(default)]
    pub to_client: Option<String>,
    /// Destination account of a transfer
    #[serde(default)]
    pub to_account: Option<String>,
}

/// Parse an operation keyword
///
/// `withdrawal` is accepted as an alias of `withdraw`.
pub fn parse_operation_type(op: &str) -> Result<OperationType, LedgerError> {
    match op.trim().to_lowercase().as_str() {
        "create" => Ok(OperationType::Create),
        "deposit" => Ok(OperationType::Deposit),
        "withdraw" | "withdrawal" => Ok(OperationType::Withdraw),
        "transfer" => Ok(OperationType::Transfer),
        "delete" => Ok(OperationType::Delete),
        _ => Err(LedgerError::invalid_operation(op)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, op: OperationType, field: &str) -> Result<String, LedgerError> {
    non_empty(value).ok_or_else(|| LedgerError::missing_field(op.as_str(), field))
}

fn parse_amount(value: Option<String>, op: OperationType) -> Result<Option<Decimal>, LedgerError> {
    match non_empty(value) {
        Some(text) => Decimal::from_str(&text)
            .map(Some)
            .map_err(|_| LedgerError::invalid_amount(&text, op.as_str())),
        None => Ok(None),
    }
}

/// Convert a CSV record to an operation
///
/// # Arguments
///
/// * `csv_record` - The raw row
///
/// # Returns
///
/// * `Ok(Operation)` if the row is well-formed
/// * `Err(LedgerError)` describing what is wrong with it
///
/// # Errors
///
/// * `InvalidOperation` - unknown keyword
/// * `MissingField` - empty client or account, missing amount for
///   deposit/withdraw/transfer, missing destination for transfer
/// * `InvalidAmount` - the amount does not parse as a decimal
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Operation, LedgerError> {
    let op = parse_operation_type(&csv_record.op)?;

    let client = required(Some(csv_record.client), op, "client")?;
    let account = required(Some(csv_record.account), op, "account")?;
    let amount = parse_amount(csv_record.amount, op)?;

    let operation = match op {
        OperationType::Create => Operation::Create {
            client,
            account,
            initial_deposit: amount.unwrap_or(Decimal::ZERO),
        },
        OperationType::Deposit => Operation::Deposit {
            client,
            account,
            amount: amount.ok_or_else(|| LedgerError::missing_field(op.as_str(), "amount"))?,
        },
        OperationType::Withdraw => Operation::Withdraw {
            client,
            account,
            amount: amount.ok_or_else(|| LedgerError::missing_field(op.as_str(), "amount"))?,
        },
        OperationType::Transfer => Operation::Transfer {
            amount: amount.ok_or_else(|| LedgerError::missing_field(op.as_str(), "amount"))?,
            to_client: required(csv_record.to_client, op, "to_client")?,
            to_account: required(csv_record.to_account, op, "to_account")?,
            from_client: client,
            from_account: account,
        },
        OperationType::Delete => Operation::Delete { client, account },
    };

    Ok(operation)
}

/// Write every account of the ledger as CSV
///
/// Header `client,number,account,balance`; rows in registry order, then
/// account order. Balances are printed with two decimals.
///
/// # Errors
///
/// Returns `ParseError` or `IoError` if the output cannot be written.
pub fn write_accounts_csv<V>(view: &V, output: &mut dyn Write) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["client", "number", "account", "balance"])?;

    for (client, account) in view.all_accounts() {
        writer.write_record(&[
            client.to_string(),
            account.number.to_string(),
            account.name.clone(),
            format_cents(account.balance()),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Render a balance rounded to cents, halves away from zero
fn format_cents(balance: Decimal) -> String {
    let rounded = balance.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Ledger, LedgerConfig};
    use rstest::rstest;

    fn record(op: &str, client: &str, account: &str, amount: Option<&str>) -> CsvRecord {
        CsvRecord {
            op: op.to_string(),
            client: client.to_string(),
            account: account.to_string(),
            amount: amount.map(str::to_string),
            ..CsvRecord::default()
        }
    }

    #[rstest]
    #[case("create", OperationType::Create)]
    #[case("deposit", OperationType::Deposit)]
    #[case("withdraw", OperationType::Withdraw)]
    #[case("withdrawal", OperationType::Withdraw)]
    #[case("TRANSFER", OperationType::Transfer)] // case insensitive
    #[case(" Delete ", OperationType::Delete)]
    fn test_parse_operation_type(#[case] op: &str, #[case] expected: OperationType) {
        assert_eq!(parse_operation_type(op).unwrap(), expected);
    }

    #[test]
    fn test_convert_deposit() {
        let operation = convert_csv_record(record("deposit", "Eve", "Compte commun", Some("250.5")))
            .unwrap();

        assert_eq!(
            operation,
            Operation::Deposit {
                client: "Eve".to_string(),
                account: "Compte commun".to_string(),
                amount: Decimal::new(2505, 1),
            }
        );
    }

    #[rstest]
    #[case::with_amount(Some("100"), Decimal::new(100, 0))]
    #[case::without_amount(None, Decimal::ZERO)]
    #[case::empty_amount(Some(""), Decimal::ZERO)]
    fn test_convert_create_amount_is_optional(
        #[case] amount: Option<&str>,
        #[case] expected: Decimal,
    ) {
        let operation = convert_csv_record(record("create", "Alice", "Savings", amount)).unwrap();

        assert_eq!(
            operation,
            Operation::Create {
                client: "Alice".to_string(),
                account: "Savings".to_string(),
                initial_deposit: expected,
            }
        );
    }

    #[test]
    fn test_convert_transfer() {
        let csv_record = CsvRecord {
            to_client: Some("Eve".to_string()),
            to_account: Some("Compte commun".to_string()),
            ..record("transfer", "Diana", "Compte courant", Some("1000"))
        };

        assert_eq!(
            convert_csv_record(csv_record).unwrap(),
            Operation::Transfer {
                from_client: "Diana".to_string(),
                from_account: "Compte courant".to_string(),
                to_client: "Eve".to_string(),
                to_account: "Compte commun".to_string(),
                amount: Decimal::new(1000, 0),
            }
        );
    }

    #[test]
    fn test_convert_delete_ignores_amount() {
        let operation = convert_csv_record(record("delete", "Charlie", "LDDS", None)).unwrap();
        assert_eq!(
            operation,
            Operation::Delete {
                client: "Charlie".to_string(),
                account: "LDDS".to_string(),
            }
        );
    }

    #[rstest]
    #[case::unknown_op(
        record("close", "Alice", "Compte courant", None),
        LedgerError::invalid_operation("close")
    )]
    #[case::deposit_without_amount(
        record("deposit", "Alice", "Compte courant", None),
        LedgerError::missing_field("deposit", "amount")
    )]
    #[case::withdraw_without_amount(
        record("withdrawal", "Alice", "Compte courant", Some("  ")),
        LedgerError::missing_field("withdraw", "amount")
    )]
    #[case::bad_amount(
        record("deposit", "Alice", "Compte courant", Some("abc")),
        LedgerError::invalid_amount("abc", "deposit")
    )]
    #[case::transfer_without_destination(
        record("transfer", "Alice", "Compte courant", Some("10")),
        LedgerError::missing_field("transfer", "to_client")
    )]
    #[case::empty_client(
        record("deposit", "", "Compte courant", Some("10")),
        LedgerError::missing_field("deposit", "client")
    )]
    #[case::empty_account(
        record("delete", "Alice", " ", None),
        LedgerError::missing_field("delete", "account")
    )]
    fn test_convert_csv_record_errors(#[case] csv_record: CsvRecord, #[case] expected: LedgerError) {
        assert_eq!(convert_csv_record(csv_record).unwrap_err(), expected);
    }

    #[test]
    fn test_transfer_without_destination_account() {
        let csv_record = CsvRecord {
            to_client: Some("Eve".to_string()),
            ..record("transfer", "Alice", "Compte courant", Some("10"))
        };

        assert_eq!(
            convert_csv_record(csv_record).unwrap_err(),
            LedgerError::missing_field("transfer", "to_account")
        );
    }

    #[test]
    fn test_write_accounts_csv_seed() {
        let ledger = Ledger::seeded(LedgerConfig::default());
        let mut output = Vec::new();

        write_accounts_csv(&ledger, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "client,number,account,balance\n\
             Alice,1,Compte courant,5000.00\n\
             Bob,2,Compte courant,3000.00\n\
             Charlie,3,LDDS,7000.00\n\
             Diana,4,Compte courant,10000.00\n\
             Eve,5,Compte commun,2000.00\n"
        );
    }

    #[test]
    fn test_write_accounts_csv_rounds_to_cents() {
        let mut ledger = Ledger::seeded(LedgerConfig::default());
        ledger
            .create_account("Bob", "Livret A", Decimal::new(12346, 3))
            .unwrap();
        let mut output = Vec::new();

        write_accounts_csv(&ledger, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Bob,2,Compte courant,3000.00\nBob,6,Livret A,12.35\n"));
    }

    #[rstest]
    #[case::rounds_up(Decimal::new(12346, 3), "12.35")]
    #[case::rounds_down(Decimal::new(12344, 3), "12.34")]
    #[case::negative(Decimal::new(-12346, 3), "-12.35")]
    #[case::half_cent(Decimal::new(5, 3), "0.01")]
    #[case::negative_half_cent(Decimal::new(-125, 3), "-0.13")]
    #[case::whole(Decimal::new(7000, 0), "7000.00")]
    #[case::one_decimal(Decimal::new(505, 1), "50.50")]
    fn test_format_cents(#[case] balance: Decimal, #[case] expected: &str) {
        assert_eq!(format_cents(balance), expected);
    }

    #[test]
    fn test_write_accounts_csv_rounds_negative_and_half_balances() {
        let mut ledger = Ledger::seeded(LedgerConfig::default());
        ledger
            .create_account("Bob", "Neg", Decimal::new(-12346, 3))
            .unwrap();
        ledger
            .create_account("Bob", "Half", Decimal::new(5, 3))
            .unwrap();
        let mut output = Vec::new();

        write_accounts_csv(&ledger, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Bob,6,Neg,-12.35\nBob,7,Half,0.01\n"));
    }
}
