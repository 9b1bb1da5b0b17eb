//! Persistence collaborator traits
//!
//! The engine's only view of storage. Implementations are expected to
//! return active records only and to treat range bounds as inclusive;
//! retries and timeouts, if any, live behind these traits.

use async_trait::async_trait;
use std::sync::Arc;

use super::error::CoreError;
use super::models::{Category, Transaction};

/// Read access to a user's transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All active transactions of the user
    async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError>;

    /// Active transactions of the user with `start_date <= transaction_date <= end_date`
    async fn find_active_by_user_in_range(
        &self,
        user_id: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<Vec<Transaction>, CoreError>;
}

/// Read access to a user's categories
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All active categories of the user
    async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Category>, CoreError>;
}

/// Shared transaction store handle
pub type TransactionStoreRef = Arc<dyn TransactionStore>;

/// Shared category store handle
pub type CategoryStoreRef = Arc<dyn CategoryStore>;
