use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::config::DiagOutConfig;

/// One swallowed failure. The page shows nothing for these; the sink is the
/// only place they surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagEvent {
    pub ts: DateTime<Utc>,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub detail: String,
}

impl DiagEvent {
    pub fn toggle_failure(task_id: &str, detail: impl fmt::Display) -> Self {
        Self {
            ts: Utc::now(),
            kind: "toggle.failure".to_string(),
            task_id: Some(task_id.to_string()),
            detail: detail.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DiagTx {
    tx: mpsc::Sender<DiagEvent>,
    dropped: Arc<AtomicU64>,
    drop_when_full: bool,
}

impl DiagTx {
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub async fn report(&self, event: DiagEvent) {
        if self.drop_when_full {
            if self.tx.try_send(event).is_err() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        } else if self.tx.send(event).await.is_err() {
            // consumer closed
        }
    }
}

/// Bare channel for embedders (and tests) that consume events themselves.
pub fn channel(capacity: usize) -> (DiagTx, mpsc::Receiver<DiagEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        DiagTx {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
            drop_when_full: true,
        },
        rx,
    )
}

/// Spawn the sink consumer: every event is logged through tracing and, when
/// `path` is set, appended as a JSON line.
pub fn start_diag(cfg: &DiagOutConfig) -> Result<Option<DiagTx>, String> {
    if !cfg.enabled {
        return Ok(None);
    }

    let (tx, mut rx) = mpsc::channel::<DiagEvent>(cfg.channel_capacity);
    let dropped = Arc::new(AtomicU64::new(0));
    let path = cfg.path.clone();
    let drop_when_full = cfg.drop_when_full;

    tokio::spawn(async move {
        let mut writer: Option<Box<dyn tokio::io::AsyncWrite + Unpin + Send>> =
            if path.trim().is_empty() {
                None
            } else if path == "stdout:" {
                Some(Box::new(tokio::io::stdout()))
            } else {
                match tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .await
                {
                    Ok(f) => Some(Box::new(f)),
                    Err(e) => {
                        tracing::warn!(target: "taskpage.diag", path = %path, error = %e, "diag file unavailable, tracing only");
                        None
                    }
                }
            };

        while let Some(event) = rx.recv().await {
            tracing::error!(
                target: "taskpage.diag",
                kind = %event.kind,
                task_id = event.task_id.as_deref().unwrap_or("-"),
                detail = %event.detail
            );
            if let Some(w) = writer.as_mut() {
                let mut line = match serde_json::to_string(&event) {
                    Ok(s) => s,
                    Err(_) => continue,
                };
                line.push('\n');
                if w.write_all(line.as_bytes()).await.is_err() {
                    writer = None;
                }
            }
        }

        if let Some(w) = writer.as_mut() {
            let _ = w.flush().await;
        }
    });

    Ok(Some(DiagTx {
        tx,
        dropped,
        drop_when_full,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_delivers_events_in_order() {
        let (tx, mut rx) = channel(8);
        tx.report(DiagEvent::toggle_failure("1", "first")).await;
        tx.report(DiagEvent::toggle_failure("2", "second")).await;

        let first = rx.recv().await.expect("first event");
        assert_eq!(first.kind, "toggle.failure");
        assert_eq!(first.task_id.as_deref(), Some("1"));
        assert_eq!(first.detail, "first");

        let second = rx.recv().await.expect("second event");
        assert_eq!(second.task_id.as_deref(), Some("2"));
        assert_eq!(tx.dropped_count(), 0);
    }

    #[tokio::test]
    async fn full_channel_counts_drops() {
        let (tx, _rx) = channel(1);
        tx.report(DiagEvent::toggle_failure("1", "kept")).await;
        tx.report(DiagEvent::toggle_failure("1", "dropped")).await;
        assert_eq!(tx.dropped_count(), 1);
    }

    #[tokio::test]
    async fn start_diag_appends_json_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("diag.jsonl");
        let cfg = DiagOutConfig {
            enabled: true,
            path: path.to_string_lossy().to_string(),
            channel_capacity: 8,
            drop_when_full: false,
        };

        let tx = start_diag(&cfg).expect("start").expect("enabled");
        tx.report(DiagEvent::toggle_failure("42", "connection refused"))
            .await;
        drop(tx);

        // Writer flushes when the channel closes.
        let mut content = String::new();
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            content = tokio::fs::read_to_string(&path).await.unwrap_or_default();
            if !content.is_empty() {
                break;
            }
        }
        let event: DiagEvent = serde_json::from_str(content.trim()).expect("json line");
        assert_eq!(event.kind, "toggle.failure");
        assert_eq!(event.task_id.as_deref(), Some("42"));
        assert!(event.detail.contains("connection refused"));
    }

    #[test]
    fn disabled_sink_yields_none() {
        let cfg = DiagOutConfig {
            enabled: false,
            ..DiagOutConfig::default()
        };
        // No runtime needed when disabled.
        assert!(start_diag(&cfg).expect("start").is_none());
    }
}
