//! Month calendar and budget example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use expense_tracker_core::utils::MemoryStorage;
use expense_tracker_core::{
    weekday_label, CalendarMonth, DayActivity, Tracker, Transaction, TransactionType,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("📅 Expense Tracker - Monthly Calendar Example\n");

    let mut tracker = Tracker::new(MemoryStorage::new());
    tracker.setup_default_categories().await?;

    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).ok_or("invalid date");

    tracker
        .record_transaction(Transaction::income(
            day(1)?,
            BigDecimal::from(52000),
            "Salary".to_string(),
        ))
        .await?;
    tracker
        .record_transaction(
            Transaction::expense(day(3)?, BigDecimal::from(15000), "Bills".to_string())
                .with_note("Rent"),
        )
        .await?;
    tracker
        .record_transaction(Transaction::expense(
            day(15)?,
            BigDecimal::from(320),
            "Food".to_string(),
        ))
        .await?;
    tracker
        .quick_add(day(15)?, TransactionType::Income, BigDecimal::from(800))
        .await?;

    let month = CalendarMonth::new(2024, 2);
    tracker.set_budget(month, BigDecimal::from(20000)).await?;

    let grid = tracker.month_grid(month).await?;
    println!("{}", month.header_label());

    let header: Vec<&str> = grid.cells()[..7]
        .iter()
        .map(|cell| weekday_label(chrono::Datelike::weekday(&cell.date)))
        .collect();
    println!("{}", header.join("  "));

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = match cell.activity() {
                    DayActivity::None => ' ',
                    DayActivity::IncomeOnly => '+',
                    DayActivity::ExpenseOnly => '-',
                    DayActivity::Mixed => '*',
                };
                if cell.is_other_month {
                    "  . ".to_string()
                } else {
                    format!("{:>3}{}", cell.day_number, marker)
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
    println!();

    let stats = tracker.month_statistics(month).await?;
    println!("  Income:   {}", tracker.format_amount(&stats.total_income));
    println!("  Expenses: {}", tracker.format_amount(&stats.total_expenses));
    println!("  Balance:  {}", tracker.format_amount(&stats.balance()));

    if let Some(progress) = tracker.budget_progress(month).await? {
        println!(
            "  Budget:   {}% used, {} left",
            progress.percentage(),
            tracker.format_amount(&progress.remaining())
        );
    }

    let details = tracker.day_details(day(15)?).await?;
    println!(
        "\n🔎 {} ({} transactions)",
        details.date,
        details.transactions.len()
    );
    for txn in &details.transactions {
        println!(
            "  {} {}",
            tracker.format_transaction_amount(txn),
            txn.category
        );
    }

    Ok(())
}
