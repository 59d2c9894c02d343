use crate::{
    db::{DbPool, tables::NoteTable},
    error::{AppError, Result},
    models::{NewNote, Note},
};

/// Note store for database operations
pub struct NoteStore {
    pool: DbPool,
}

impl NoteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, note: NewNote) -> Result<Note> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (title, category, content) VALUES (?, ?, ?)",
            NoteTable::TABLE_NAME
        ))
        .bind(&note.title)
        .bind(&note.category)
        .bind(&note.content)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(Note {
            id: result.last_insert_rowid(),
            title: note.title,
            category: note.category,
            content: note.content,
        })
    }

    /// Grouped by category, newest first within each
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT id, title, category, content FROM {} ORDER BY category, id DESC",
            NoteTable::TABLE_NAME
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(notes)
    }
}
