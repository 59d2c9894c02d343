use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub category: String,
    pub content: String,
}
