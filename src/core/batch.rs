//! Batch processing with client-group partitioning
//!
//! This module provides the `BatchProcessor` struct, which applies a batch of
//! operations to a [`SharedLedger`] with independent groups running in
//! parallel tokio tasks.
//!
//! # Ordering
//!
//! Two operations that touch a common client end up in the same group, and a
//! transfer links its two clients, so every account sees its operations in
//! script order. `create` operations allocate ledger-wide account numbers;
//! they split a batch into segments and run alone between them, which keeps
//! numbering identical to sequential processing.

use crate::core::engine::ProcessingStats;
use crate::core::shared::SharedLedger;
use crate::types::{LedgerError, Operation, OperationType};
use std::collections::HashMap;
use tracing::{debug, error};

/// Outcome of one operation of a batch
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub operation: Operation,
    /// What the ledger returned
    pub result: Result<(), LedgerError>,
}

/// Applies batches of operations to a shared ledger
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: SharedLedger,
}

impl BatchProcessor {
    /// Create a processor writing to `ledger`
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// Split operations into groups that share no client
    ///
    /// Groups keep the relative order of their operations and are returned in
    /// order of their first operation.
    pub fn partition_by_clients(&self, batch: Vec<Operation>) -> Vec<Vec<Operation>> {
        let mut groups: Vec<Vec<Operation>> = Vec::new();
        let mut owner: HashMap<String, usize> = HashMap::new();
        // merged[i] points at the group that absorbed group i
        let mut merged: Vec<usize> = Vec::new();

        fn root(merged: &mut [usize], mut group: usize) -> usize {
            while merged[group] != group {
                merged[group] = merged[merged[group]];
                group = merged[group];
            }
            group
        }

        for operation in batch {
            let mut target: Option<usize> = None;
            for client in operation.clients() {
                let Some(&group) = owner.get(client) else {
                    continue;
                };
                let group = root(&mut merged, group);
                target = match target {
                    None => Some(group),
                    Some(current) if current == group => Some(current),
                    Some(current) => {
                        let (keep, absorb) = (current.min(group), current.max(group));
                        let moved = std::mem::take(&mut groups[absorb]);
                        groups[keep].extend(moved);
                        merged[absorb] = keep;
                        Some(keep)
                    }
                };
            }

            let group = target.unwrap_or_else(|| {
                groups.push(Vec::new());
                merged.push(groups.len() - 1);
                groups.len() - 1
            });

            for client in operation.clients() {
                owner.insert(client.to_string(), group);
            }
            groups[group].push(operation);
        }

        groups.into_iter().filter(|group| !group.is_empty()).collect()
    }

    /// Apply a group of operations in order
    pub async fn process_group(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for operation in operations {
            let result = self.ledger.apply(&operation).await;
            results.push(ProcessingResult { operation, result });
        }

        results
    }

    /// Apply a batch, running independent groups concurrently
    ///
    /// Returns when every operation of the batch has been applied or refused.
    pub async fn process_batch(&self, batch: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(batch.len());
        let mut segment = Vec::new();

        for operation in batch {
            if operation.op_type() == OperationType::Create {
                results.extend(self.process_segment(std::mem::take(&mut segment)).await);
                results.extend(self.process_group(vec![operation]).await);
            } else {
                segment.push(operation);
            }
        }
        results.extend(self.process_segment(segment).await);

        results
    }

    async fn process_segment(&self, segment: Vec<Operation>) -> Vec<ProcessingResult> {
        if segment.is_empty() {
            return Vec::new();
        }

        let groups = self.partition_by_clients(segment);
        debug!(groups = groups.len(), "processing segment");

        let mut tasks = Vec::with_capacity(groups.len());
        for group in groups {
            let processor = self.clone();
            tasks.push(tokio::spawn(
                async move { processor.process_group(group).await },
            ));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(group_results) => results.extend(group_results),
                Err(e) => error!(error = %e, "batch task failed"),
            }
        }

        results
    }
}

/// Count the outcomes of a processed batch
pub fn summarize(results: &[ProcessingResult]) -> ProcessingStats {
    let mut stats = ProcessingStats::default();
    for processed in results {
        stats.record(&processed.result);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LedgerConfig;
    use crate::core::ledger::Ledger;
    use crate::core::traits::LedgerView;
    use rust_decimal::Decimal;

    fn processor() -> BatchProcessor {
        BatchProcessor::new(SharedLedger::new(Ledger::seeded(LedgerConfig::default())))
    }

    fn deposit(client: &str, amount: i64) -> Operation {
        Operation::Deposit {
            client: client.to_string(),
            account: "Compte courant".to_string(),
            amount: Decimal::new(amount, 0),
        }
    }

    fn transfer(from: &str, to: &str, amount: i64) -> Operation {
        Operation::Transfer {
            from_client: from.to_string(),
            from_account: "Compte courant".to_string(),
            to_client: to.to_string(),
            to_account: "Compte courant".to_string(),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn test_partition_empty_batch() {
        assert!(processor().partition_by_clients(vec![]).is_empty());
    }

    #[test]
    fn test_partition_separates_independent_clients() {
        let groups = processor().partition_by_clients(vec![
            deposit("Alice", 1),
            deposit("Bob", 2),
            deposit("Alice", 3),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![deposit("Alice", 1), deposit("Alice", 3)]);
        assert_eq!(groups[1], vec![deposit("Bob", 2)]);
    }

    #[test]
    fn test_partition_transfer_links_groups() {
        let groups = processor().partition_by_clients(vec![
            deposit("Alice", 1),
            deposit("Bob", 2),
            deposit("Diana", 3),
            transfer("Bob", "Alice", 4),
            deposit("Bob", 5),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0],
            vec![
                deposit("Alice", 1),
                deposit("Bob", 2),
                transfer("Bob", "Alice", 4),
                deposit("Bob", 5),
            ]
        );
        assert_eq!(groups[1], vec![deposit("Diana", 3)]);
    }

    #[test]
    fn test_partition_chain_of_transfers_is_one_group() {
        let groups = processor().partition_by_clients(vec![
            deposit("Alice", 1),
            deposit("Charlie", 1),
            deposit("Eve", 1),
            transfer("Alice", "Charlie", 1),
            transfer("Charlie", "Eve", 1),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
    }

    #[tokio::test]
    async fn test_process_batch_keeps_per_account_order() {
        let processor = processor();

        // Bob can only afford the second transfer after the deposit lands.
        let results = processor
            .process_batch(vec![
                deposit("Bob", 2000),
                transfer("Bob", "Alice", 5000),
                deposit("Diana", 1),
            ])
            .await;

        assert_eq!(summarize(&results).applied, 3);

        let snapshot = processor.ledger.snapshot().await;
        assert_eq!(
            snapshot.find_account("Alice", "Compte courant").unwrap().balance(),
            Decimal::new(10000, 0)
        );
        assert_eq!(
            snapshot.find_account("Bob", "Compte courant").unwrap().balance(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_creates_get_sequential_numbers() {
        let processor = processor();
        let create = |client: &str, account: &str| Operation::Create {
            client: client.to_string(),
            account: account.to_string(),
            initial_deposit: Decimal::ZERO,
        };

        processor
            .process_batch(vec![
                create("Eve", "A"),
                deposit("Alice", 1),
                create("Alice", "B"),
                create("Bob", "C"),
            ])
            .await;

        let snapshot = processor.ledger.snapshot().await;
        assert_eq!(snapshot.find_account("Eve", "A").unwrap().number, 6);
        assert_eq!(snapshot.find_account("Alice", "B").unwrap().number, 7);
        assert_eq!(snapshot.find_account("Bob", "C").unwrap().number, 8);
    }

    #[tokio::test]
    async fn test_summarize_counts_refusals() {
        let processor = processor();

        let results = processor
            .process_batch(vec![transfer("Eve", "Bob", 1), deposit("Mallory", 1)])
            .await;

        let stats = summarize(&results);
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.refused, 2);
        assert_eq!(processor.ledger.snapshot().await.total_balance(), Decimal::new(27000, 0));
    }
}
