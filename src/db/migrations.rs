use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    db::{
        DbPool,
        tables::{DeliveryTable, NoteTable},
    },
    error::{AppError, Result},
};

/// A single idempotent schema change.
pub enum Step {
    /// Run a statement that is safe to repeat (`IF NOT EXISTS`).
    Execute(fn() -> String),
    /// Add a column unless the table already has it.
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
}

pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub steps: &'static [Step],
}

/// Applied in order, once each, at startup.
pub static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create notes table",
        steps: &[Step::Execute(NoteTable::create_table)],
    },
    Migration {
        version: 2,
        description: "create deliveries table",
        steps: &[Step::Execute(DeliveryTable::create_table)],
    },
    Migration {
        version: 3,
        description: "add delivery time, gate and zone",
        steps: &[
            Step::AddColumn {
                table: DeliveryTable::TABLE_NAME,
                column: DeliveryTable::COLUMN_DELIVERY_TIME,
                definition: DeliveryTable::OPTIONAL_TEXT,
            },
            Step::AddColumn {
                table: DeliveryTable::TABLE_NAME,
                column: DeliveryTable::COLUMN_GATE,
                definition: DeliveryTable::OPTIONAL_TEXT,
            },
            Step::AddColumn {
                table: DeliveryTable::TABLE_NAME,
                column: DeliveryTable::COLUMN_ZONE,
                definition: DeliveryTable::OPTIONAL_TEXT,
            },
        ],
    },
    Migration {
        version: 4,
        description: "index deliveries by date",
        steps: &[Step::Execute(DeliveryTable::create_date_index)],
    },
];

impl Step {
    async fn apply(&self, conn: &mut SqliteConnection) -> Result<()> {
        match self {
            Step::Execute(statement) => {
                sqlx::query(&statement()).execute(&mut *conn).await?;
            }
            Step::AddColumn {
                table,
                column,
                definition,
            } => {
                if column_exists(conn, table, column).await? {
                    tracing::debug!("Column {}.{} already present", table, column);
                } else {
                    let statement = format!("ALTER TABLE {table} ADD COLUMN {column} {definition}");
                    sqlx::query(&statement).execute(&mut *conn).await?;
                    tracing::info!("Added column {}.{}", table, column);
                }
            }
        }
        Ok(())
    }
}

async fn column_exists(conn: &mut SqliteConnection, table: &str, column: &str) -> Result<bool> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(&mut *conn)
            .await?;

    Ok(count.0 > 0)
}

/// Apply every migration not yet recorded in `schema_migrations`.
///
/// Returns how many were applied by this call.
pub async fn run_migrations(pool: &DbPool) -> Result<usize> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY NOT NULL,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM schema_migrations WHERE version = ?")
                .bind(migration.version)
                .fetch_optional(pool)
                .await?;

        if existing.is_some() {
            continue;
        }

        let mut tx = pool.begin().await?;
        for step in migration.steps {
            step.apply(&mut *tx).await.map_err(|e| {
                AppError::Migration(format!(
                    "version {} ({}): {}",
                    migration.version, migration.description, e
                ))
            })?;
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?, ?, ?)",
        )
        .bind(migration.version)
        .bind(migration.description)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(
            "Applied migration {}: {}",
            migration.version,
            migration.description
        );
        applied += 1;
    }

    Ok(applied)
}
