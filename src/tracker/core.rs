//! Main tracker orchestrator that coordinates transactions, categories,
//! budgets, settings and receipt scanning

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calendar::{build_grid, grid_window, DaySummary, MonthGrid};
use crate::config::TrackerConfig;
use crate::receipt::{ExtractedReceiptData, ReceiptDataExtractor, ReceiptDraft};
use crate::reports::{group_by_date, BudgetProgress, DateGroup, PeriodStatistics};
use crate::tracker::backup::{ImportSummary, TrackerBackup, BACKUP_VERSION};
use crate::tracker::{patterns, CategoryManager, TransactionManager};
use crate::traits::*;
use crate::types::*;
use crate::utils::format::{format_currency, format_signed};
use crate::utils::validation::{validate_non_negative_amount, validate_setting_key};

/// Main tracker system that orchestrates all bookkeeping operations
pub struct Tracker<S: TrackerStorage> {
    storage: S,
    transaction_manager: TransactionManager<S>,
    category_manager: CategoryManager<S>,
    extractor: ReceiptDataExtractor,
    config: TrackerConfig,
}

impl<S: TrackerStorage + Clone> Tracker<S> {
    /// Create a new tracker with the given storage backend
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, TrackerConfig::default())
    }

    /// Create a new tracker with custom configuration
    pub fn with_config(storage: S, config: TrackerConfig) -> Self {
        Self {
            transaction_manager: TransactionManager::new(storage.clone()),
            category_manager: CategoryManager::new(storage.clone()),
            extractor: ReceiptDataExtractor::new(config.extraction.clone()),
            storage,
            config,
        }
    }

    /// Create a new tracker with custom validators
    pub fn with_validators(
        storage: S,
        config: TrackerConfig,
        transaction_validator: Box<dyn TransactionValidator>,
        category_validator: Box<dyn CategoryValidator>,
    ) -> Self {
        Self {
            transaction_manager: TransactionManager::with_validator(
                storage.clone(),
                transaction_validator,
            ),
            category_manager: CategoryManager::with_validator(storage.clone(), category_validator),
            extractor: ReceiptDataExtractor::new(config.extraction.clone()),
            storage,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // Transaction operations
    /// Record a new transaction
    pub async fn record_transaction(
        &mut self,
        transaction: Transaction,
    ) -> TrackerResult<Transaction> {
        self.transaction_manager.record_transaction(transaction).await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> TrackerResult<Option<Transaction>> {
        self.transaction_manager.get_transaction(transaction_id).await
    }

    /// Replace a transaction in place
    pub async fn update_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()> {
        self.transaction_manager.update_transaction(transaction).await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> TrackerResult<()> {
        self.transaction_manager.delete_transaction(transaction_id).await
    }

    /// Record a quick-add entry with the configured category and note
    pub async fn quick_add(
        &mut self,
        date: NaiveDate,
        kind: TransactionType,
        amount: BigDecimal,
    ) -> TrackerResult<Transaction> {
        let transaction = patterns::quick_add(&self.config, date, kind, amount)?;
        self.record_transaction(transaction).await
    }

    /// Latest transactions for the home screen
    pub async fn recent_transactions(&self) -> TrackerResult<Vec<Transaction>> {
        self.transaction_manager
            .recent_transactions(self.config.recent_limit)
            .await
    }

    /// Full history grouped by day, newest first, labelled relative to `today`
    pub async fn transaction_history(&self, today: NaiveDate) -> TrackerResult<Vec<DateGroup>> {
        let transactions = self
            .transaction_manager
            .recent_transactions(self.config.history_limit)
            .await?;
        Ok(group_by_date(transactions, today))
    }

    // Calendar operations
    /// Build the six-week grid for a month
    pub async fn month_grid(&self, month: CalendarMonth) -> TrackerResult<MonthGrid> {
        let (start, end) = grid_window(month);
        let transactions = self
            .transaction_manager
            .transactions_between(start, end)
            .await?;
        Ok(build_grid(month, &transactions))
    }

    /// Transactions and totals for a single day
    pub async fn day_details(&self, date: NaiveDate) -> TrackerResult<DaySummary> {
        let transactions = self.transaction_manager.transactions_on(date).await?;
        Ok(DaySummary::new(date, transactions))
    }

    // Reporting operations
    /// Totals and category breakdowns for `start..=end`
    pub async fn period_statistics(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> TrackerResult<PeriodStatistics> {
        let transactions = self
            .transaction_manager
            .transactions_between(start_date, end_date)
            .await?;
        Ok(PeriodStatistics::from_transactions(
            start_date,
            end_date,
            &transactions,
        ))
    }

    /// Statistics for a whole calendar month
    pub async fn month_statistics(&self, month: CalendarMonth) -> TrackerResult<PeriodStatistics> {
        self.period_statistics(month.first_day(), month.last_day())
            .await
    }

    // Budget operations
    /// Set the spending budget for a month, keeping any savings goal
    pub async fn set_budget(
        &mut self,
        month: CalendarMonth,
        amount: BigDecimal,
    ) -> TrackerResult<Budget> {
        validate_non_negative_amount(&amount)?;
        let mut budget = self.budget_or_default(month).await?;
        budget.amount = amount;
        self.storage.set_budget(&budget).await?;
        info!(month = %month, amount = %budget.amount, "set budget");
        Ok(budget)
    }

    /// Set the savings goal for a month, keeping its budget amount
    pub async fn set_savings_goal(
        &mut self,
        month: CalendarMonth,
        goal: BigDecimal,
    ) -> TrackerResult<Budget> {
        validate_non_negative_amount(&goal)?;
        let mut budget = self.budget_or_default(month).await?;
        budget.savings_goal = Some(goal);
        self.storage.set_budget(&budget).await?;
        info!(month = %month, "set savings goal");
        Ok(budget)
    }

    /// Get the stored budget for a month
    pub async fn get_budget(&self, month: CalendarMonth) -> TrackerResult<Option<Budget>> {
        self.storage.get_budget(month).await
    }

    /// Spending against the month's budget; `None` without a positive budget
    pub async fn budget_progress(
        &self,
        month: CalendarMonth,
    ) -> TrackerResult<Option<BudgetProgress>> {
        let Some(budget) = self.storage.get_budget(month).await? else {
            return Ok(None);
        };
        let stats = self.month_statistics(month).await?;
        let progress = BudgetProgress::new(&budget, stats.total_expenses);

        if let Some(progress) = &progress {
            if progress.is_over_budget() {
                warn!(
                    month = %month,
                    over = %format_currency(&progress.overspent(), &self.config.currency_symbol),
                    "month is over budget"
                );
            }
        }
        Ok(progress)
    }

    async fn budget_or_default(&self, month: CalendarMonth) -> TrackerResult<Budget> {
        Ok(self
            .storage
            .get_budget(month)
            .await?
            .unwrap_or_else(|| Budget::new(month, BigDecimal::from(0))))
    }

    // Category operations
    /// Add the default categories that are not present yet
    pub async fn setup_default_categories(&mut self) -> TrackerResult<Vec<Category>> {
        crate::tracker::category::utils::create_default_categories(&mut self.category_manager).await
    }

    /// Add a category
    pub async fn add_category(
        &mut self,
        name: String,
        kind: TransactionType,
    ) -> TrackerResult<Category> {
        self.category_manager.add_category(name, kind).await
    }

    /// Delete a category
    pub async fn delete_category(&mut self, category_id: &str) -> TrackerResult<()> {
        self.category_manager.delete_category(category_id).await
    }

    /// List categories, optionally of one kind
    pub async fn list_categories(
        &self,
        kind: Option<TransactionType>,
    ) -> TrackerResult<Vec<Category>> {
        self.category_manager.list_categories(kind).await
    }

    // Settings operations
    /// Store a setting
    pub async fn set_setting(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        validate_setting_key(key)?;
        self.storage.set_setting(key, value).await
    }

    /// Read a setting
    pub async fn get_setting(&self, key: &str) -> TrackerResult<Option<String>> {
        self.storage.get_setting(key).await
    }

    /// Whether a boolean flag such as `dailyReminder` is switched on
    pub async fn setting_enabled(&self, key: &str) -> TrackerResult<bool> {
        Ok(self
            .storage
            .get_setting(key)
            .await?
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true")))
    }

    // Receipt operations
    /// Run OCR on a receipt image and extract candidate values.
    ///
    /// Fails with [`TrackerError::NoAmountRecognized`] when no amount is found.
    pub async fn scan_receipt(
        &self,
        ocr: &dyn OcrEngine,
        image: &[u8],
    ) -> TrackerResult<ExtractedReceiptData> {
        let text = ocr.recognize(image).await?;
        let data = self.extractor.extract(&text);

        if data.requires_manual_entry() {
            warn!(text_len = text.len(), "no amount recognized on receipt");
            return Err(TrackerError::NoAmountRecognized);
        }

        info!(
            candidates = data.amounts.len(),
            invoice = ?data.invoice_number,
            "scanned receipt"
        );
        Ok(data)
    }

    /// Extract candidate values from already recognized text
    pub fn extract_receipt(&self, text: &str) -> ExtractedReceiptData {
        self.extractor.extract(text)
    }

    /// Record the expense described by a receipt draft
    pub async fn record_receipt(
        &mut self,
        draft: ReceiptDraft,
        category: String,
        fallback_date: NaiveDate,
    ) -> TrackerResult<Transaction> {
        let transaction = draft.into_transaction(category, fallback_date)?;
        self.record_transaction(transaction).await
    }

    // Backup operations
    /// Snapshot everything stored
    pub async fn export_backup(&self) -> TrackerResult<TrackerBackup> {
        let backup = TrackerBackup {
            version: BACKUP_VERSION,
            exported_at: chrono::Utc::now().naive_utc(),
            transactions: self.transaction_manager.all_transactions().await?,
            categories: self.storage.list_categories(None).await?,
            budgets: self.storage.list_budgets().await?,
            settings: self.storage.list_settings().await?.into_iter().collect(),
        };
        info!(
            transactions = backup.transactions.len(),
            categories = backup.categories.len(),
            "exported backup"
        );
        Ok(backup)
    }

    /// Snapshot everything stored as pretty-printed JSON
    pub async fn export_json(&self) -> TrackerResult<String> {
        self.export_backup().await?.to_json()
    }

    /// Import a JSON backup, overwriting records with the same id
    pub async fn import_json(&mut self, json: &str) -> TrackerResult<ImportSummary> {
        let backup = TrackerBackup::from_json(json)?;
        self.import_backup(backup).await
    }

    /// Import a backup, overwriting records with the same id.
    ///
    /// Every record is validated before anything is written.
    pub async fn import_backup(&mut self, backup: TrackerBackup) -> TrackerResult<ImportSummary> {
        for transaction in &backup.transactions {
            self.transaction_manager.validate(transaction)?;
        }
        self.category_manager
            .validate_incoming(&backup.categories)
            .await?;
        for budget in &backup.budgets {
            validate_non_negative_amount(&budget.amount)?;
            if let Some(goal) = &budget.savings_goal {
                validate_non_negative_amount(goal)?;
            }
        }
        for key in backup.settings.keys() {
            validate_setting_key(key)?;
        }

        let mut summary = ImportSummary::default();
        for transaction in &backup.transactions {
            self.storage.save_transaction(transaction).await?;
            summary.transactions += 1;
        }
        for category in &backup.categories {
            self.storage.save_category(category).await?;
            summary.categories += 1;
        }
        for budget in &backup.budgets {
            self.storage.set_budget(budget).await?;
            summary.budgets += 1;
        }
        for (key, value) in &backup.settings {
            self.storage.set_setting(key, value).await?;
            summary.settings += 1;
        }

        info!(
            transactions = summary.transactions,
            categories = summary.categories,
            budgets = summary.budgets,
            settings = summary.settings,
            "imported backup"
        );
        Ok(summary)
    }

    // Display helpers
    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: &BigDecimal) -> String {
        format_currency(amount, &self.config.currency_symbol)
    }

    /// Amount of a transaction with its sign, e.g. `+$50.00` or `-$12.00`
    pub fn format_transaction_amount(&self, transaction: &Transaction) -> String {
        format_signed(
            &transaction.amount,
            transaction.kind.sign(),
            &self.config.currency_symbol,
        )
    }
}
