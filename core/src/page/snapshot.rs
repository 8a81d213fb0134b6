use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;

use super::model::{
    AlertHandle, PageSnapshot, RowHandle, ToggleControl, ALERT_SHOW_CLASS, LABEL_MARK_COMPLETE,
    LABEL_MARK_INCOMPLETE, STRIKE_CLASS,
};

/// On-disk description of a rendered task-list page, as fed to `taskpage run`.
#[derive(Debug, Deserialize)]
pub struct SnapshotDoc {
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskRowDoc>,
    #[serde(default)]
    pub alerts: Vec<AlertDoc>,
}

#[derive(Debug, Deserialize)]
pub struct TaskRowDoc {
    pub task_id: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct AlertDoc {
    #[serde(default = "default_alert_classes")]
    pub classes: Vec<String>,
}

fn default_alert_classes() -> Vec<String> {
    vec!["alert".to_string(), ALERT_SHOW_CLASS.to_string()]
}

/// Build the page model the way the server template renders it: completed
/// rows carry the strikethrough class and the "mark incomplete" label.
pub fn load_snapshot(json: &str) -> Result<PageSnapshot, EnhanceError> {
    let doc: SnapshotDoc =
        serde_json::from_str(json).map_err(|e| EnhanceError::Snapshot(e.to_string()))?;

    let mut page = PageSnapshot::new(doc.csrf_token);
    for task in doc.tasks {
        let row = RowHandle::new();
        let label = if task.completed {
            row.add_class(STRIKE_CLASS);
            LABEL_MARK_INCOMPLETE
        } else {
            LABEL_MARK_COMPLETE
        };
        page.register_control(ToggleControl::new(task.task_id, label, row));
    }
    for alert in doc.alerts {
        page.register_alert(AlertHandle::new(alert.classes));
    }
    Ok(page)
}

/// Final page state, as printed by the CLI after a run.
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub tasks: Vec<TaskReport>,
    pub alerts_remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct TaskReport {
    pub task_id: String,
    pub label: String,
    pub strikethrough: bool,
}

impl PageReport {
    pub fn from_page(page: &PageSnapshot) -> Self {
        Self {
            tasks: page
                .controls()
                .iter()
                .map(|c| TaskReport {
                    task_id: c.task_id().to_string(),
                    label: c.label(),
                    strikethrough: c.row().has_class(STRIKE_CLASS),
                })
                .collect(),
            alerts_remaining: page.alerts().iter().filter(|a| a.is_attached()).count(),
        }
    }
}
