//! JSONL file writer for pipeline run events.
//!
//! One line per [`RunEvent`]: `timestamp`, `run_id`, then the event's own
//! fields under its `event` tag. Grep a run with `"run_id":"run-7"`.

use assistant_application::{RunEvent, RunEventKind, RunLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

#[derive(Serialize)]
struct RunRecord<'a> {
    timestamp: String,
    run_id: &'a str,
    #[serde(flatten)]
    event: &'a RunEventKind,
}

/// Appends run events to a JSONL file, one complete line per write.
pub struct JsonlRunLogger {
    writer: Mutex<LineWriter<File>>,
    path: PathBuf,
}

impl JsonlRunLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create run log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(LineWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open run log file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunLogger for JsonlRunLogger {
    fn log(&self, event: RunEvent) {
        let record = RunRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            run_id: &event.run_id,
            event: &event.kind,
        };

        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not encode {} event: {}", event.kind.name(), e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Could not write run log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_domain::{ModelRole, Stage};
    use serde_json::Value;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_carry_run_id_and_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlRunLogger::new(&path).unwrap();

        logger.log(RunEvent::new(
            "run-1",
            RunEventKind::RunStarted {
                topic: "ocean currents".to_string(),
                question: "What drives ocean currents?".to_string(),
            },
        ));
        logger.log(RunEvent::new(
            "run-1",
            RunEventKind::StageCompleted {
                stage: Stage::Generate,
                elapsed_ms: 840,
            },
        ));

        // Lines are complete as soon as `log` returns
        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["run_id"], "run-1");
            assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        }
        assert_eq!(records[0]["event"], "run_started");
        assert_eq!(records[0]["topic"], "ocean currents");
        assert_eq!(records[1]["event"], "stage_completed");
        assert_eq!(records[1]["stage"], "generate");
        assert_eq!(records[1]["elapsed_ms"], 840);
    }

    #[test]
    fn test_failed_run_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlRunLogger::new(&path).unwrap();

        logger.log(RunEvent::new(
            "run-3",
            RunEventKind::RunFailed {
                elapsed_ms: 12,
                stage: None,
                role: Some(ModelRole::Summarizer),
                error: "model unavailable".to_string(),
            },
        ));

        let records = read_lines(&path);
        assert_eq!(records[0]["event"], "run_failed");
        assert_eq!(records[0]["role"], "summarizer");
        assert!(records[0].get("stage").is_none());
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runs.jsonl");

        let first = JsonlRunLogger::new(&path).unwrap();
        first.log(RunEvent::new("run-1", RunEventKind::RunCompleted { elapsed_ms: 3 }));
        drop(first);

        let second = JsonlRunLogger::new(&path).unwrap();
        assert_eq!(second.path(), path.as_path());
        second.log(RunEvent::new("run-2", RunEventKind::RunCompleted { elapsed_ms: 4 }));

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["run_id"], "run-2");
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlRunLogger::new(dir.path()).is_none());
    }
}
