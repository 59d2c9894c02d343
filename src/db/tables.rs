/// Provides constants and utilities for working with
/// the "deliveries" database table.
pub struct DeliveryTable;

impl DeliveryTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "deliveries";

    /// Column list in the order `Delivery` is decoded from.
    pub const SELECT_COLUMNS: &'static str =
        "id, item, quantity, supplier, delivery_date, delivery_time, gate, zone";

    pub const COLUMN_DELIVERY_TIME: &'static str = "delivery_time";
    pub const COLUMN_GATE: &'static str = "gate";
    pub const COLUMN_ZONE: &'static str = "zone";

    /// Definition shared by every optional text column added after the first release.
    pub const OPTIONAL_TEXT: &'static str = "TEXT NOT NULL DEFAULT ''";

    /// SQL statement for the first version of the deliveries table.
    ///
    /// Later columns are added by migrations so old databases and new ones converge.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item TEXT NOT NULL,
                quantity TEXT NOT NULL,
                supplier TEXT NOT NULL,
                delivery_date TEXT NOT NULL
            )",
            Self::TABLE_NAME
        )
    }

    pub fn create_date_index() -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{0}_delivery_date ON {0} (delivery_date)",
            Self::TABLE_NAME
        )
    }
}

/// Provides constants and utilities for working with
/// the "notes" database table.
pub struct NoteTable;

impl NoteTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "notes";

    /// SQL statement for creating the notes table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            Self::TABLE_NAME
        )
    }
}
