//! Receipt scanning example with a canned OCR engine

use async_trait::async_trait;
use chrono::NaiveDate;
use expense_tracker_core::utils::MemoryStorage;
use expense_tracker_core::{OcrEngine, Tracker, TrackerError, TrackerResult};
use tracing_subscriber::EnvFilter;

/// Returns fixed text instead of reading the image
struct CannedOcr {
    text: &'static str,
}

#[async_trait]
impl OcrEngine for CannedOcr {
    async fn recognize(&self, _image: &[u8]) -> TrackerResult<String> {
        Ok(self.text.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧾 Expense Tracker - Receipt Scan Example\n");

    let mut tracker = Tracker::new(MemoryStorage::new());
    let today = NaiveDate::from_ymd_opt(2024, 1, 20).ok_or("invalid date")?;

    let receipt = CannedOcr {
        text: "全家便利商店\n電子發票證明聯\n113/01/15 12:03\nCD-87654321\n咖啡 2 x 45\n總計: 1,280元\n找零 20",
    };

    let data = tracker.scan_receipt(&receipt, b"").await?;
    let candidates: Vec<String> = data.amounts.iter().map(|a| a.to_string()).collect();
    println!("  Candidates: {:?}", candidates);
    println!("  Date:       {:?}", data.date);
    println!("  Invoice:    {:?}", data.invoice_number);

    let txn = tracker
        .record_receipt(data.draft(0), "Food".to_string(), today)
        .await?;
    println!(
        "\n  ✓ Recorded {} on {} ({})",
        tracker.format_amount(&txn.amount),
        txn.date,
        txn.note.as_deref().unwrap_or("")
    );

    let blurry = CannedOcr { text: "謝謝光臨" };
    match tracker.scan_receipt(&blurry, b"").await {
        Err(TrackerError::NoAmountRecognized) => {
            println!("\n  ⚠️  Nothing recognized on the second receipt; enter the amount manually")
        }
        Err(err) => return Err(err.into()),
        Ok(data) => println!("\n  Unexpected candidates: {:?}", data.amounts),
    }

    println!("\n📦 Backup preview:\n{}", tracker.export_json().await?);
    Ok(())
}
