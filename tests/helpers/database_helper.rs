//! Test database helper utilities
//!
//! Integration tests that need PostgreSQL read the connection string from
//! `TEST_DATABASE_URL` and skip themselves when it is absent, so the suite
//! stays green on machines without a database.

use sqlx::PgPool;
use std::sync::Once;

static INIT: Once = Once::new();

/// Test database handle with truncation helpers
pub struct TestDatabase {
    pub pool: PgPool,
}

impl TestDatabase {
    /// Connect to the test database if one is configured.
    ///
    /// Returns None (and the caller should skip) when `TEST_DATABASE_URL`
    /// is not set or the database is unreachable.
    pub async fn maybe_new() -> Option<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt::try_init();
        });

        let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

        let pool = match PgPool::connect(&database_url).await {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("TEST_DATABASE_URL set but unreachable: {}", e);
                return None;
            }
        };

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            eprintln!("Test database migration failed: {}", e);
            return None;
        }

        Some(Self { pool })
    }

    /// Remove all rows between tests, keeping the schema
    pub async fn truncate_all(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "TRUNCATE notifications, ticket_messages, support_tickets, bills, financial_documents, \
             exam_results, exams, assessments, assessment_templates, managers, users, companies \
             RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
