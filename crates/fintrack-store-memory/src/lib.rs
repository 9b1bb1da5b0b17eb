//! In-memory store implementations
//!
//! Concrete [`TransactionStore`]/[`CategoryStore`] collaborators backed by
//! plain vectors, for tests and embedded use. They honor the same contract
//! as a real persistence layer: soft-deleted rows are filtered out before
//! the engine sees them, and range bounds are inclusive.

use async_trait::async_trait;

use fintrack_core::error::CoreError;
use fintrack_core::models::{Category, Transaction};
use fintrack_core::store::{CategoryStore, TransactionStore};

/// Vector-backed transaction store
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    rows: Vec<Transaction>,
}

impl MemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given rows
    pub fn with_transactions(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    /// Add a transaction
    pub fn push(&mut self, transaction: Transaction) {
        self.rows.push(transaction);
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|t| t.user_id == user_id && t.is_active())
            .cloned()
            .collect())
    }

    async fn find_active_by_user_in_range(
        &self,
        user_id: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|t| {
                t.user_id == user_id
                    && t.is_active()
                    && t.transaction_date >= start_date
                    && t.transaction_date <= end_date
            })
            .cloned()
            .collect())
    }
}

/// Vector-backed category store
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    rows: Vec<Category>,
}

impl MemoryCategoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given rows
    pub fn with_categories(rows: Vec<Category>) -> Self {
        Self { rows }
    }

    /// Add a category
    pub fn push(&mut self, category: Category) {
        self.rows.push(category);
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|c| c.user_id == user_id && c.is_active())
            .cloned()
            .collect())
    }
}

// ==================== Tests ====================
