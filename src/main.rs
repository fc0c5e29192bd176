//! Catch-up runner for `Tallybook`.
//!
//! This binary is the cron-like external trigger for the scheduled-transaction
//! replay engine: it connects to the ledger database, walks every owner with an
//! active template, and applies all elapsed occurrences up to today. It performs
//! no other mutations; the HTTP layer runs as a separate service.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use tallybook::config::{currencies, database};
use tallybook::core::reporting::TracingReporter;
use tallybook::core::schedule;
use tallybook::entities::{ScheduledTransaction, scheduled_transaction};
use tallybook::errors::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenvy::dotenv().ok();

    // 3. Load the currency allow-list
    let supported = currencies::load_supported_currencies()
        .inspect_err(|e| error!("Failed to load currency configuration: {e}"))?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to ensure database schema: {e}"))?;

    // 5. Replay scheduled transactions for every owner with an active template
    let owners: Vec<String> = ScheduledTransaction::find()
        .select_only()
        .column(scheduled_transaction::Column::Owner)
        .filter(scheduled_transaction::Column::Active.eq(true))
        .distinct()
        .into_tuple()
        .all(&db)
        .await?;

    let today = chrono::Utc::now().date_naive();
    let reporter = TracingReporter;

    for owner in owners {
        let result = schedule::apply_all(&db, &supported, &reporter, &owner, today).await?;
        if result.errors.is_empty() {
            info!(
                owner,
                applied = result.applied_count,
                "scheduled transactions applied"
            );
        } else {
            warn!(
                owner,
                applied = result.applied_count,
                errors = ?result.errors,
                "scheduled transactions applied with errors"
            );
        }
    }

    Ok(())
}
