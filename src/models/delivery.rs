use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database delivery model.
///
/// Optional columns are stored as empty strings, matching the column defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Delivery {
    pub id: i64,
    pub item: String,
    pub quantity: String,
    pub supplier: String,
    pub delivery_date: String,
    pub delivery_time: String,
    pub gate: String,
    pub zone: String,
}

impl Delivery {
    /// One-line description used for notifications
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} x {} from {} on {}",
            self.quantity, self.item, self.supplier, self.delivery_date
        );
        if !self.delivery_time.is_empty() {
            line.push_str(&format!(" at {}", self.delivery_time));
        }
        if !self.gate.is_empty() {
            line.push_str(&format!(", gate {}", self.gate));
        }
        if !self.zone.is_empty() {
            line.push_str(&format!(", zone {}", self.zone));
        }
        line
    }
}

/// Payload for logging a new delivery
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDelivery {
    pub item: String,
    pub quantity: String,
    pub supplier: String,
    pub delivery_date: String,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

/// Drag/drop target: only the date moves
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub delivery_date: String,
}
