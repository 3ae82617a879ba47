use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::document::{process_log, LogDocument};
use super::error::JournalError;

/// Append-only file of raw log lines backing the in-memory store.
#[derive(Clone, Debug)]
pub struct LogJournal {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl LogJournal {
    /// Open the journal, creating the file with owner-only permissions if
    /// it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        options.mode(0o600);
        let file = options.open(&path).await.map_err(|source| JournalError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read every stored line. Any line that no longer parses aborts the
    /// replay.
    pub async fn replay(&self) -> Result<Vec<LogDocument>, JournalError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| JournalError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let mut docs = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let doc = process_log(line).map_err(|source| JournalError::Replay {
                path: self.path.display().to_string(),
                line: idx + 1,
                source,
            })?;
            docs.push(doc);
        }
        Ok(docs)
    }

    /// Append one raw line. Writers are serialized so lines never interleave.
    pub async fn append(&self, line: &str) -> Result<(), JournalError> {
        let mut record = Vec::with_capacity(line.len() + 1);
        record.extend_from_slice(line.as_bytes());
        record.push(b'\n');

        let mut file = self.file.lock().await;
        let io_err = |source| JournalError::Io {
            path: self.path.display().to_string(),
            source,
        };
        file.write_all(&record).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn append_then_replay_round_trips_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = LogJournal::open(dir.path().join("logfile")).await.unwrap();
        journal.append(r#"{"timestamp":"2024-01-01T00:00:00Z","a":1}"#).await.unwrap();
        journal.append(r#"{"timestamp":"2024-01-02T00:00:00Z","a":2}"#).await.unwrap();

        let reopened = LogJournal::open(journal.path()).await.unwrap();
        let docs = reopened.replay().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1]["a"], json!(2));
    }

    #[tokio::test]
    async fn replay_reports_the_offending_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logfile");
        std::fs::write(&path, "{\"timestamp\":\"2024-01-01T00:00:00Z\"}\n\n{\"level\":\"x\"}\n").unwrap();

        let journal = LogJournal::open(&path).await.unwrap();
        match journal.replay().await {
            Err(JournalError::Replay { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected replay result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh");
        let journal = LogJournal::open(&path).await.unwrap();
        assert!(path.exists());
        assert!(journal.replay().await.unwrap().is_empty());
    }
}
