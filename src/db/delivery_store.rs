use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    calendar::{DeliverySource, YearMonth, parse_iso_date, year_prefix},
    db::{DbPool, tables::DeliveryTable},
    error::{AppError, Result},
    models::{Delivery, NewDelivery},
    services::NotificationService,
};

/// Gate and zone values a delivery may be assigned to.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliveryOptions {
    pub gates: Vec<String>,
    pub zones: Vec<String>,
}

/// Delivery store for database operations
pub struct DeliveryStore {
    pool: DbPool,
    notifications: Arc<NotificationService>,
    options: DeliveryOptions,
}

impl DeliveryStore {
    /// Create a new DeliveryStore with the provided database pool
    pub fn new(
        pool: DbPool,
        notifications: Arc<NotificationService>,
        options: DeliveryOptions,
    ) -> Self {
        Self {
            pool,
            notifications,
            options,
        }
    }

    pub fn options(&self) -> &DeliveryOptions {
        &self.options
    }

    /// Log a new delivery and return its id
    pub async fn create(&self, new: NewDelivery) -> Result<i64> {
        let delivery_date = validate_date(&new.delivery_date)?;
        let gate = validate_choice("gate", new.gate, &self.options.gates)?;
        let zone = validate_choice("zone", new.zone, &self.options.zones)?;
        let delivery_time = new
            .delivery_time
            .map(|time| time.trim().to_string())
            .unwrap_or_default();

        let result = sqlx::query(&format!(
            "INSERT INTO {} (item, quantity, supplier, delivery_date, delivery_time, gate, zone)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            DeliveryTable::TABLE_NAME
        ))
        .bind(&new.item)
        .bind(&new.quantity)
        .bind(&new.supplier)
        .bind(&delivery_date)
        .bind(&delivery_time)
        .bind(&gate)
        .bind(&zone)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let delivery = Delivery {
            id: result.last_insert_rowid(),
            item: new.item,
            quantity: new.quantity,
            supplier: new.supplier,
            delivery_date,
            delivery_time,
            gate,
            zone,
        };

        tracing::debug!("Created delivery {}", delivery.id);
        self.notifications
            .emit(&format!("New delivery #{}: {}", delivery.id, delivery.summary()))
            .await;

        Ok(delivery.id)
    }

    /// Get a delivery by ID
    pub async fn get(&self, id: i64) -> Result<Delivery> {
        sqlx::query_as::<_, Delivery>(&format!(
            "SELECT {} FROM {} WHERE id = ?",
            DeliveryTable::SELECT_COLUMNS,
            DeliveryTable::TABLE_NAME
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::DeliveryNotFound(id))
    }

    /// All deliveries, newest first
    pub async fn list_all(&self) -> Result<Vec<Delivery>> {
        let deliveries = sqlx::query_as::<_, Delivery>(&format!(
            "SELECT {} FROM {} ORDER BY id DESC",
            DeliveryTable::SELECT_COLUMNS,
            DeliveryTable::TABLE_NAME
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(deliveries)
    }

    /// Deliveries dated `start..=end`
    pub async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Delivery>> {
        self.fetch_where(
            "delivery_date >= ? AND delivery_date <= ?",
            &[iso(start), iso(end)],
        )
        .await
    }

    pub async fn list_on(&self, date: NaiveDate) -> Result<Vec<Delivery>> {
        self.fetch_where("delivery_date = ?", &[iso(date)]).await
    }

    pub async fn list_in_month(&self, month: YearMonth) -> Result<Vec<Delivery>> {
        self.fetch_where("delivery_date LIKE ?", &[format!("{}%", month.date_prefix())])
            .await
    }

    pub async fn list_in_year(&self, year: i32) -> Result<Vec<Delivery>> {
        self.fetch_where("delivery_date LIKE ?", &[format!("{}%", year_prefix(year))])
            .await
    }

    /// Move a delivery to another date; every other field is left untouched.
    pub async fn reschedule(&self, id: i64, new_date: &str) -> Result<Delivery> {
        let delivery_date = validate_date(new_date)?;
        let existing = self.get(id).await?;

        let result = sqlx::query(&format!(
            "UPDATE {} SET delivery_date = ? WHERE id = ?",
            DeliveryTable::TABLE_NAME
        ))
        .bind(&delivery_date)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        // Deleted between the lookup and the update
        if result.rows_affected() == 0 {
            return Err(AppError::DeliveryNotFound(id));
        }

        self.notifications
            .emit(&format!(
                "Delivery #{} ({}) rescheduled from {} to {}",
                id, existing.item, existing.delivery_date, delivery_date
            ))
            .await;

        Ok(Delivery {
            delivery_date,
            ..existing
        })
    }

    /// Delete a delivery by ID
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ?",
            DeliveryTable::TABLE_NAME
        ))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::DeliveryNotFound(id));
        }

        tracing::debug!("Deleted delivery {}", id);
        Ok(())
    }

    async fn fetch_where(&self, condition: &str, params: &[String]) -> Result<Vec<Delivery>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY delivery_date, delivery_time, id",
            DeliveryTable::SELECT_COLUMNS,
            DeliveryTable::TABLE_NAME,
            condition
        );

        let mut query = sqlx::query_as::<_, Delivery>(&sql);
        for param in params {
            query = query.bind(param);
        }

        let deliveries = query
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(deliveries)
    }
}

#[async_trait]
impl DeliverySource for DeliveryStore {
    async fn deliveries_on(&self, date: NaiveDate) -> Result<Vec<Delivery>> {
        self.list_on(date).await
    }

    async fn deliveries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Delivery>> {
        self.list_in_range(start, end).await
    }

    async fn deliveries_in_month(&self, month: YearMonth) -> Result<Vec<Delivery>> {
        self.list_in_month(month).await
    }

    async fn deliveries_in_year(&self, year: i32) -> Result<Vec<Delivery>> {
        self.list_in_year(year).await
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn validate_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    parse_iso_date(raw)
        .map(iso)
        .ok_or_else(|| AppError::Validation(format!("delivery date {:?} is not YYYY-MM-DD", raw)))
}

/// Empty or missing means "not assigned"; anything else must be a configured value.
fn validate_choice(field: &str, value: Option<String>, allowed: &[String]) -> Result<String> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() || allowed.iter().any(|choice| *choice == value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "unknown {} {:?}, expected one of: {}",
            field,
            value,
            allowed.join(", ")
        )))
    }
}
