//! Reports facade
//!
//! Orchestrates the timeframe resolver, bucket aggregation and category
//! ranking against the store collaborators. Holds no state across
//! requests; collaborator failures propagate unchanged.

use std::collections::HashMap;

use fintrack_config::{ReportingConfig, UnknownCategoryPolicy};

use super::error::CoreError;
use super::models::{Category, Transaction};
use super::reports::{AmountSum, CategorySummary, HistoryDataRecord, PeriodQuery, TimeframeQuery};
use super::store::{CategoryStoreRef, TransactionStoreRef};
use super::time::TimeframeResolution;
use super::validate::{self, ReportOperation};

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Reporting service over a pair of store collaborators
pub struct ReportsService {
    transactions: TransactionStoreRef,
    categories: CategoryStoreRef,
    config: ReportingConfig,
}

impl ReportsService {
    /// Create a service with default reporting policies
    pub fn new(transactions: TransactionStoreRef, categories: CategoryStoreRef) -> Self {
        Self::with_config(transactions, categories, ReportingConfig::default())
    }

    /// Create a service with explicit reporting policies
    pub fn with_config(
        transactions: TransactionStoreRef,
        categories: CategoryStoreRef,
        config: ReportingConfig,
    ) -> Self {
        Self {
            transactions,
            categories,
            config,
        }
    }

    /// Distinct UTC calendar years with activity, ascending
    pub async fn transaction_periods(&self, user_id: &str) -> Result<Vec<i32>, CoreError> {
        validate::validate_user_id(ReportOperation::TransactionPeriods, user_id)?;

        let transactions = self.transactions.find_active_by_user(user_id).await?;

        let mut periods: Vec<i32> = Vec::new();
        for transaction in transactions.iter().filter(|t| self.visible(t)) {
            match transaction.utc_year() {
                Some(year) if !periods.contains(&year) => periods.push(year),
                Some(_) => {}
                None => log::warn!(
                    target: "fintrack::reports",
                    "Skipping transaction {} with out-of-range date {}",
                    transaction.id,
                    transaction.transaction_date
                ),
            }
        }
        periods.sort_unstable();

        log::debug!(
            target: "fintrack::reports",
            "transaction_periods: {} years for user {}",
            periods.len(),
            user_id
        );
        Ok(periods)
    }

    /// Time-bucketed balance history for one month or one year
    ///
    /// Always returns exactly `bucket_count` records in natural index
    /// order; buckets without transactions keep their zero balance.
    pub async fn timeframe_summary(
        &self,
        user_id: &str,
        query: &TimeframeQuery,
    ) -> Result<Vec<HistoryDataRecord>, CoreError> {
        validate::validate_user_id(ReportOperation::TimeframeSummary, user_id)?;
        validate::validate_timeframe_query(query, self.max_offset_ms())?;

        let resolution = TimeframeResolution::resolve(query)?;

        // The two fetches are independent; fire both, then join
        let (transactions, categories) = tokio::try_join!(
            self.transactions.find_active_by_user_in_range(
                user_id,
                resolution.start_date,
                resolution.end_date,
            ),
            self.categories.find_active_by_user(user_id),
        )?;

        let lookup = category_lookup(&categories);
        let mut buckets = resolution.empty_buckets();

        for transaction in transactions.iter().filter(|t| self.visible(t)) {
            let Some(category) = self.resolve_category(&lookup, transaction)? else {
                continue;
            };
            let Some(index) = resolution.bucket_index(transaction.transaction_date)? else {
                log::warn!(
                    target: "fintrack::reports",
                    "Transaction {} at {} falls outside the resolved window",
                    transaction.id,
                    transaction.transaction_date
                );
                continue;
            };
            buckets[index]
                .balance
                .credit(category.is_income(), transaction.amount);
        }

        log::debug!(
            target: "fintrack::reports",
            "timeframe_summary: {} transactions into {} buckets for user {}",
            transactions.len(),
            buckets.len(),
            user_id
        );
        Ok(buckets)
    }

    /// Per-category totals over a date range, descending by total
    ///
    /// Ties keep first-seen order (stable sort); categories without
    /// matching transactions are absent.
    pub async fn category_summary(
        &self,
        user_id: &str,
        query: &PeriodQuery,
    ) -> Result<Vec<CategorySummary>, CoreError> {
        validate::validate_user_id(ReportOperation::CategorySummary, user_id)?;
        validate::validate_period_query(query)?;

        let (transactions, categories) = tokio::try_join!(
            self.transactions.find_active_by_user_in_range(
                user_id,
                query.start_date,
                query.end_date,
            ),
            self.categories.find_active_by_user(user_id),
        )?;

        let lookup = category_lookup(&categories);

        let mut summaries: Vec<CategorySummary> = Vec::new();
        let mut index_by_category: HashMap<String, usize> = HashMap::new();

        for transaction in transactions.iter().filter(|t| self.visible(t)) {
            let Some(category) = self.resolve_category(&lookup, transaction)? else {
                continue;
            };
            match index_by_category.get(&transaction.category_id) {
                Some(&index) => summaries[index].sum.amount += transaction.amount,
                None => {
                    index_by_category.insert(transaction.category_id.clone(), summaries.len());
                    summaries.push(CategorySummary {
                        category: category.clone(),
                        sum: AmountSum {
                            amount: transaction.amount,
                        },
                    });
                }
            }
        }

        // Vec::sort_by is stable, so equal sums keep insertion order
        summaries.sort_by(|a, b| b.sum.amount.cmp(&a.sum.amount));

        log::debug!(
            target: "fintrack::reports",
            "category_summary: {} categories for user {}",
            summaries.len(),
            user_id
        );
        Ok(summaries)
    }

    fn max_offset_ms(&self) -> i64 {
        self.config.max_client_offset_hours * HOUR_MS
    }

    /// Stores are expected to pre-filter deleted rows; re-check unless
    /// the defensive check was switched off
    fn visible(&self, transaction: &Transaction) -> bool {
        !self.config.defensive_status_check || transaction.is_active()
    }

    fn resolve_category<'a>(
        &self,
        lookup: &HashMap<&str, &'a Category>,
        transaction: &Transaction,
    ) -> Result<Option<&'a Category>, CoreError> {
        match lookup.get(transaction.category_id.as_str()) {
            Some(category) => Ok(Some(category)),
            None => match self.config.unknown_category_policy {
                UnknownCategoryPolicy::Skip => {
                    log::warn!(
                        target: "fintrack::reports",
                        "Skipping transaction {} with unresolved category {}",
                        transaction.id,
                        transaction.category_id
                    );
                    Ok(None)
                }
                UnknownCategoryPolicy::Fail => Err(CoreError::CategoryNotFound {
                    id: transaction.category_id.clone(),
                }),
            },
        }
    }
}

fn category_lookup(categories: &[Category]) -> HashMap<&str, &Category> {
    categories.iter().map(|c| (c.id.as_str(), c)).collect()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::{CategoryStore, TransactionStore};
    use crate::types::{CategoryType, RecordStatus, Timeframe};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockTransactionStore {
        rows: Vec<Transaction>,
    }

    #[async_trait]
    impl TransactionStore for MockTransactionStore {
        async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
            Ok(self
                .rows
                .iter()
                .filter(|t| t.user_id == user_id)
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
                        && t.transaction_date >= start_date
                        && t.transaction_date <= end_date
                })
                .cloned()
                .collect())
        }
    }

    struct MockCategoryStore {
        rows: Vec<Category>,
    }

    #[async_trait]
    impl CategoryStore for MockCategoryStore {
        async fn find_active_by_user(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
            Ok(self
                .rows
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    struct FailingTransactionStore;

    #[async_trait]
    impl TransactionStore for FailingTransactionStore {
        async fn find_active_by_user(&self, _: &str) -> Result<Vec<Transaction>, CoreError> {
            Err(CoreError::StoreUnavailable {
                detail: "connection refused".to_string(),
            })
        }

        async fn find_active_by_user_in_range(
            &self,
            _: &str,
            _: i64,
            _: i64,
        ) -> Result<Vec<Transaction>, CoreError> {
            Err(CoreError::StoreUnavailable {
                detail: "connection refused".to_string(),
            })
        }
    }

    fn tx(id: &str, category_id: &str, amount: i64, date: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            category_id: category_id.to_string(),
            amount,
            description: None,
            transaction_date: date,
            status: RecordStatus::Active,
            creation_date: date,
            last_update_date: date,
        }
    }

    fn category(id: &str, category_type: CategoryType) -> Category {
        Category {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            name: format!("name-{}", id),
            icon: format!("icon-{}", id),
            category_type,
            status: RecordStatus::Active,
            creation_date: 0,
            last_update_date: 0,
        }
    }

    fn service(transactions: Vec<Transaction>, categories: Vec<Category>) -> ReportsService {
        let _ = env_logger::builder().is_test(true).try_init();
        ReportsService::new(
            Arc::new(MockTransactionStore { rows: transactions }),
            Arc::new(MockCategoryStore { rows: categories }),
        )
    }

    fn year_query(year: i32, offset: i64) -> TimeframeQuery {
        TimeframeQuery {
            timeframe: Timeframe::Year,
            year,
            month: None,
            client_offset_ms: offset,
        }
    }

    // 2021 UTC instants used across the summary tests
    const MAR_2021: i64 = 1614556800000; // 2021-03-01T00:00:00Z
    const APR_2021: i64 = 1617235200000; // 2021-04-01T00:00:00Z
    const NOV_2021: i64 = 1636070400000; // 2021-11-05T00:00:00Z

    #[tokio::test]
    async fn test_periods_sorted_distinct_years() {
        let svc = service(
            vec![
                tx("id-1", "c1", 1000, 1722384000000), // 2024-07-31
                tx("id-2", "c2", 1000, 1708992000000), // 2024-02-27
                tx("id-3", "c3", 1000, 1677456000000), // 2023-02-27
            ],
            vec![],
        );
        assert_eq!(svc.transaction_periods("user-1").await.unwrap(), vec![2023, 2024]);
    }

    #[tokio::test]
    async fn test_periods_empty_without_transactions() {
        let svc = service(vec![], vec![]);
        assert_eq!(svc.transaction_periods("user-1").await.unwrap(), Vec::<i32>::new());
    }

    #[tokio::test]
    async fn test_periods_use_utc_year() {
        // 2023-12-31T23:59:59.999Z stays 2023 regardless of any client locale
        let svc = service(vec![tx("id-1", "c1", 5, 1704067199999)], vec![]);
        assert_eq!(svc.transaction_periods("user-1").await.unwrap(), vec![2023]);
    }

    #[tokio::test]
    async fn test_yearly_summary_concrete_scenario() {
        let svc = service(
            vec![
                tx("id-1", "expense-cat", 900, MAR_2021),
                tx("id-2", "income-cat", 700, MAR_2021),
                tx("id-3", "income-cat", 1300, APR_2021),
                tx("id-4", "expense-cat", 100, NOV_2021),
                tx("id-5", "income-cat", 330, NOV_2021),
            ],
            vec![
                category("expense-cat", CategoryType::Expense),
                category("income-cat", CategoryType::Income),
            ],
        );

        let buckets = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();

        assert_eq!(buckets.len(), 12);
        for (index, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.year, 2021);
            assert_eq!(bucket.month, index as u32);
            assert_eq!(bucket.day, None);
        }
        assert_eq!(buckets[2].balance.expense, 900);
        assert_eq!(buckets[2].balance.income, 700);
        assert_eq!(buckets[3].balance.income, 1300);
        assert_eq!(buckets[10].balance.expense, 100);
        assert_eq!(buckets[10].balance.income, 330);

        let zeroed = buckets
            .iter()
            .enumerate()
            .filter(|(i, _)| ![2, 3, 10].contains(i))
            .all(|(_, b)| b.balance.income == 0 && b.balance.expense == 0);
        assert!(zeroed);
    }

    #[tokio::test]
    async fn test_bucket_totals_match_transaction_totals() {
        let svc = service(
            vec![
                tx("id-1", "expense-cat", 900, MAR_2021),
                tx("id-2", "income-cat", 700, MAR_2021),
                tx("id-3", "income-cat", 1300, APR_2021),
                tx("id-4", "expense-cat", 100, NOV_2021),
            ],
            vec![
                category("expense-cat", CategoryType::Expense),
                category("income-cat", CategoryType::Income),
            ],
        );

        let buckets = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();
        let income: i64 = buckets.iter().map(|b| b.balance.income).sum();
        let expense: i64 = buckets.iter().map(|b| b.balance.expense).sum();
        assert_eq!(income, 2000);
        assert_eq!(expense, 1000);
    }

    #[tokio::test]
    async fn test_monthly_summary_day_buckets() {
        let svc = service(
            vec![
                tx("id-1", "expense-cat", 300, 1628294400000), // 2021-08-07
                tx("id-2", "other-expense", 200, 1628294400000),
                tx("id-3", "income-cat", 700, 1628294400000),
                tx("id-4", "other-expense", 400, 1628294400000),
                tx("id-5", "income-cat", 1300, 1628640000000), // 2021-08-11
                tx("id-6", "other-expense", 600, 1628812800000), // 2021-08-13
                tx("id-7", "expense-cat", 100, 1630368000000), // 2021-08-31
                tx("id-8", "income-cat", 330, 1630368000000),
            ],
            vec![
                category("expense-cat", CategoryType::Expense),
                category("income-cat", CategoryType::Income),
                category("other-expense", CategoryType::Expense),
            ],
        );

        let query = TimeframeQuery {
            timeframe: Timeframe::Month,
            year: 2021,
            month: Some(7),
            client_offset_ms: 0,
        };
        let buckets = svc.timeframe_summary("user-1", &query).await.unwrap();

        assert_eq!(buckets.len(), 31);
        for (index, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.day, Some(index as u32 + 1));
            assert_eq!(bucket.month, 7);
        }
        assert_eq!(buckets[6].balance.income, 700);
        assert_eq!(buckets[6].balance.expense, 900);
        assert_eq!(buckets[10].balance.income, 1300);
        assert_eq!(buckets[12].balance.expense, 600);
        assert_eq!(buckets[30].balance.income, 330);
        assert_eq!(buckets[30].balance.expense, 100);
    }

    #[tokio::test]
    async fn test_client_offset_shifts_bucket() {
        // 2021-08-06T23:30:00Z: day 7 in UTC+2, day 6 in UTC
        let aug_6_2330 = 1628294400000 - 30 * 60 * 1000;
        let svc = service(
            vec![tx("id-1", "income-cat", 500, aug_6_2330)],
            vec![category("income-cat", CategoryType::Income)],
        );

        let offset_query = TimeframeQuery {
            timeframe: Timeframe::Month,
            year: 2021,
            month: Some(7),
            client_offset_ms: 2 * 60 * 60 * 1000,
        };
        let buckets = svc.timeframe_summary("user-1", &offset_query).await.unwrap();
        assert_eq!(buckets[6].balance.income, 500);
        assert_eq!(buckets[5].balance.income, 0);

        let utc_query = TimeframeQuery {
            client_offset_ms: 0,
            ..offset_query
        };
        let buckets = svc.timeframe_summary("user-1", &utc_query).await.unwrap();
        assert_eq!(buckets[5].balance.income, 500);
        assert_eq!(buckets[6].balance.income, 0);
    }

    #[tokio::test]
    async fn test_unknown_category_skipped_by_default() {
        let svc = service(
            vec![
                tx("id-1", "income-cat", 700, MAR_2021),
                tx("id-2", "ghost-cat", 999, MAR_2021),
            ],
            vec![category("income-cat", CategoryType::Income)],
        );

        let buckets = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();
        assert_eq!(buckets[2].balance.income, 700);
        assert_eq!(buckets[2].balance.expense, 0);
    }

    #[tokio::test]
    async fn test_unknown_category_fails_under_fail_policy() {
        let mut config = ReportingConfig::default();
        config.unknown_category_policy = UnknownCategoryPolicy::Fail;
        let svc = ReportsService::with_config(
            Arc::new(MockTransactionStore {
                rows: vec![tx("id-1", "ghost-cat", 999, MAR_2021)],
            }),
            Arc::new(MockCategoryStore {
                rows: vec![category("income-cat", CategoryType::Income)],
            }),
            config,
        );

        let err = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn test_deleted_transaction_excluded_defensively() {
        // A store in breach of contract returns a deleted row
        let mut deleted = tx("id-1", "income-cat", 700, MAR_2021);
        deleted.status = RecordStatus::Deleted;
        let svc = service(
            vec![deleted, tx("id-2", "income-cat", 300, MAR_2021)],
            vec![category("income-cat", CategoryType::Income)],
        );

        let buckets = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();
        assert_eq!(buckets[2].balance.income, 300);
    }

    #[tokio::test]
    async fn test_category_summary_ranked_descending() {
        let svc = service(
            vec![
                tx("id-1", "cat-a", 300, MAR_2021),
                tx("id-2", "cat-a", 100, APR_2021),
                tx("id-3", "cat-b", 2330, APR_2021),
            ],
            vec![
                category("cat-a", CategoryType::Expense),
                category("cat-b", CategoryType::Expense),
            ],
        );

        let summaries = svc
            .category_summary(
                "user-1",
                &PeriodQuery {
                    start_date: MAR_2021,
                    end_date: NOV_2021,
                },
            )
            .await
            .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category.id, "cat-b");
        assert_eq!(summaries[0].sum.amount, 2330);
        assert_eq!(summaries[1].category.id, "cat-a");
        assert_eq!(summaries[1].sum.amount, 400);
    }

    #[tokio::test]
    async fn test_category_summary_ties_keep_first_seen_order() {
        let svc = service(
            vec![
                tx("id-1", "cat-a", 500, MAR_2021),
                tx("id-2", "cat-b", 500, APR_2021),
                tx("id-3", "cat-c", 900, APR_2021),
            ],
            vec![
                category("cat-a", CategoryType::Expense),
                category("cat-b", CategoryType::Expense),
                category("cat-c", CategoryType::Expense),
            ],
        );

        let summaries = svc
            .category_summary(
                "user-1",
                &PeriodQuery {
                    start_date: MAR_2021,
                    end_date: NOV_2021,
                },
            )
            .await
            .unwrap();

        let order: Vec<&str> = summaries.iter().map(|s| s.category.id.as_str()).collect();
        assert_eq!(order, vec!["cat-c", "cat-a", "cat-b"]);
    }

    #[tokio::test]
    async fn test_category_summary_boundary_inclusive() {
        let svc = service(
            vec![
                tx("id-1", "cat-a", 10, MAR_2021),
                tx("id-2", "cat-a", 20, NOV_2021),
                tx("id-3", "cat-a", 40, MAR_2021 - 1),
                tx("id-4", "cat-a", 80, NOV_2021 + 1),
            ],
            vec![category("cat-a", CategoryType::Expense)],
        );

        let summaries = svc
            .category_summary(
                "user-1",
                &PeriodQuery {
                    start_date: MAR_2021,
                    end_date: NOV_2021,
                },
            )
            .await
            .unwrap();
        assert_eq!(summaries[0].sum.amount, 30);
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let svc = service(vec![], vec![]);
        let err = svc
            .category_summary(
                "user-1",
                &PeriodQuery {
                    start_date: 100,
                    end_date: 99,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_invalid_month_rejected_before_fetch() {
        // The failing store would error if reached; validation trips first
        let svc = ReportsService::new(
            Arc::new(FailingTransactionStore),
            Arc::new(MockCategoryStore { rows: vec![] }),
        );
        let query = TimeframeQuery {
            timeframe: Timeframe::Month,
            year: 2021,
            month: Some(12),
            client_offset_ms: 0,
        };
        let err = svc.timeframe_summary("user-1", &query).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let svc = ReportsService::new(
            Arc::new(FailingTransactionStore),
            Arc::new(MockCategoryStore { rows: vec![] }),
        );
        let err = svc.transaction_periods("user-1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);

        let err = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_idempotent_for_fixed_snapshot() {
        let svc = service(
            vec![
                tx("id-1", "cat-a", 300, MAR_2021),
                tx("id-2", "cat-b", 2330, APR_2021),
            ],
            vec![
                category("cat-a", CategoryType::Expense),
                category("cat-b", CategoryType::Income),
            ],
        );

        let first = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();
        let second = svc
            .timeframe_summary("user-1", &year_query(2021, 0))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
