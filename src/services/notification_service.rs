use std::path::{Path, PathBuf};

use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

/// Append-only event log.
///
/// Writes are best-effort: a failed append is logged and dropped, never returned.
pub struct NotificationService {
    path: PathBuf,
    // Serializes appends so concurrent events never interleave within a line.
    write_lock: Mutex<()>,
}

impl NotificationService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `message` as one line and mirror it to the console.
    ///
    /// Line breaks inside the message are flattened to spaces so every event stays on one line.
    pub async fn emit(&self, message: &str) {
        let line = single_line(message);
        tracing::info!(target: "notifications", "{}", line);

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.append(&line).await {
            tracing::warn!(
                "Failed to write notification to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    async fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(format!("{}\n", message).as_bytes()).await?;
        file.flush().await
    }
}

fn single_line(message: &str) -> String {
    message.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::single_line;

    #[test]
    fn single_line_flattens_line_breaks() {
        assert_eq!(single_line("a\nb\r\nc"), "a b  c");
        assert_eq!(single_line("plain"), "plain");
    }
}
