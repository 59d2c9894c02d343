//! Read-time grouping of deliveries into calendar views.
//!
//! Every view is computed from a [`DeliverySource`] on each call; nothing is cached.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{error::Result, models::Delivery};

pub mod period;

pub use period::{CalendarQuery, Period, YearMonth, parse_iso_date, week_dates, year_prefix};

/// The queries the aggregator needs from the delivery store.
#[async_trait]
pub trait DeliverySource: Send + Sync {
    async fn deliveries_on(&self, date: NaiveDate) -> Result<Vec<Delivery>>;

    /// Inclusive on both ends.
    async fn deliveries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Delivery>>;

    async fn deliveries_in_month(&self, month: YearMonth) -> Result<Vec<Delivery>>;

    async fn deliveries_in_year(&self, year: i32) -> Result<Vec<Delivery>>;
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub deliveries: Vec<Delivery>,
}

/// One column of the week grid.
#[derive(Debug, Clone, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<WeekDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<u32>; 7]>,
    /// Keyed by day of month
    pub buckets: BTreeMap<u32, Vec<Delivery>>,
    /// `None` past the first or last supported year
    pub prev: Option<YearMonth>,
    pub next: Option<YearMonth>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearView {
    pub year: i32,
    /// Deliveries per month, all twelve months present
    pub counts: BTreeMap<u32, usize>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum CalendarView {
    Day(DayView),
    Week(WeekView),
    Month(MonthView),
    Year(YearView),
}

/// Build the view for `period` around `reference`.
pub async fn aggregate(
    period: Period,
    reference: NaiveDate,
    source: &dyn DeliverySource,
) -> Result<CalendarView> {
    let view = match period {
        Period::Day => CalendarView::Day(day_view(reference, source).await?),
        Period::Week => CalendarView::Week(week_view(reference, source).await?),
        Period::Month => CalendarView::Month(month_view(YearMonth::of(reference), source).await?),
        Period::Year => CalendarView::Year(year_view(reference.year(), source).await?),
    };

    Ok(view)
}

pub async fn day_view(date: NaiveDate, source: &dyn DeliverySource) -> Result<DayView> {
    let deliveries = source.deliveries_on(date).await?;
    Ok(DayView { date, deliveries })
}

pub async fn week_view(reference: NaiveDate, source: &dyn DeliverySource) -> Result<WeekView> {
    let dates = week_dates(reference);
    let (start, end) = (dates[0], dates[6]);

    let mut by_date: BTreeMap<String, Vec<Delivery>> = BTreeMap::new();
    for delivery in source.deliveries_between(start, end).await? {
        by_date
            .entry(delivery.delivery_date.clone())
            .or_default()
            .push(delivery);
    }

    let days = dates
        .iter()
        .map(|date| {
            let deliveries = by_date
                .remove(&date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            WeekDay {
                date: *date,
                weekday: date.format("%A").to_string(),
                deliveries,
            }
        })
        .collect();

    Ok(WeekView { start, end, days })
}

pub async fn month_view(month: YearMonth, source: &dyn DeliverySource) -> Result<MonthView> {
    let mut buckets: BTreeMap<u32, Vec<Delivery>> = BTreeMap::new();
    for delivery in source.deliveries_in_month(month).await? {
        match parse_iso_date(&delivery.delivery_date) {
            Some(date) => buckets.entry(date.day()).or_default().push(delivery),
            None => tracing::warn!(
                "Skipping delivery {} with malformed date {:?}",
                delivery.id,
                delivery.delivery_date
            ),
        }
    }

    Ok(MonthView {
        year: month.year(),
        month: month.month(),
        weeks: month.grid(),
        buckets,
        prev: Some(month.prev()).filter(YearMonth::in_range),
        next: Some(month.next()).filter(YearMonth::in_range),
    })
}

pub async fn year_view(year: i32, source: &dyn DeliverySource) -> Result<YearView> {
    let mut counts: BTreeMap<u32, usize> = (1..=12).map(|month| (month, 0)).collect();
    let mut total = 0;

    for delivery in source.deliveries_in_year(year).await? {
        match parse_iso_date(&delivery.delivery_date) {
            Some(date) => {
                *counts.entry(date.month()).or_default() += 1;
                total += 1;
            }
            None => tracing::warn!(
                "Skipping delivery {} with malformed date {:?}",
                delivery.id,
                delivery.delivery_date
            ),
        }
    }

    Ok(YearView { year, counts, total })
}
