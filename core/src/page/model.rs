use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Row class applied while a task is completed (strikethrough styling).
pub const STRIKE_CLASS: &str = "text-decoration-line-through";

/// Class that keeps an alert banner visible; removing it starts the fade.
pub const ALERT_SHOW_CLASS: &str = "show";

/// Label shown on a completed task's control ("mark incomplete").
pub const LABEL_MARK_INCOMPLETE: &str = "未対応にする";

/// Label shown on an open task's control ("mark complete").
pub const LABEL_MARK_COMPLETE: &str = "完了にする";

/// Shared handle to a table row's class list.
///
/// Mutations are atomic; the strikethrough class is the only one this crate
/// touches, but the list is kept generic so snapshots can carry whatever the
/// server rendered.
#[derive(Clone, Debug)]
pub struct RowHandle {
    classes: Arc<Mutex<BTreeSet<String>>>,
}

impl RowHandle {
    pub fn new() -> Self {
        Self {
            classes: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    pub fn add_class(&self, class: &str) {
        let mut g = self.classes.lock().unwrap();
        g.insert(class.to_string());
    }

    /// classList.toggle semantics: returns whether the class is present
    /// after the call.
    pub fn toggle_class(&self, class: &str) -> bool {
        let mut g = self.classes.lock().unwrap();
        if g.remove(class) {
            false
        } else {
            g.insert(class.to_string());
            true
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.lock().unwrap().contains(class)
    }
}

impl Default for RowHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A completion-toggle control: the task it addresses, its visible label,
/// and the enclosing row.
#[derive(Clone, Debug)]
pub struct ToggleControl {
    task_id: String,
    label: Arc<Mutex<String>>,
    row: RowHandle,
}

impl ToggleControl {
    pub fn new(task_id: impl Into<String>, label: impl Into<String>, row: RowHandle) -> Self {
        Self {
            task_id: task_id.into(),
            label: Arc::new(Mutex::new(label.into())),
            row,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn label(&self) -> String {
        self.label.lock().unwrap().clone()
    }

    pub fn set_label(&self, label: &str) {
        let mut g = self.label.lock().unwrap();
        g.clear();
        g.push_str(label);
    }

    pub fn row(&self) -> &RowHandle {
        &self.row
    }
}

#[derive(Debug)]
struct AlertState {
    classes: BTreeSet<String>,
    attached: bool,
}

/// Shared handle to a transient notification banner.
///
/// Both mutators tolerate a banner that other code already removed: the
/// dismissal timers keep firing after a manual removal and must land on a
/// no-op, not a fault.
#[derive(Clone, Debug)]
pub struct AlertHandle {
    inner: Arc<Mutex<AlertState>>,
}

impl AlertHandle {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Mutex::new(AlertState {
                classes: classes.into_iter().map(Into::into).collect(),
                attached: true,
            })),
        }
    }

    pub fn remove_class(&self, class: &str) {
        let mut g = self.inner.lock().unwrap();
        if !g.attached {
            return;
        }
        g.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.lock().unwrap().classes.contains(class)
    }

    /// Detach from the document. Idempotent.
    pub fn detach(&self) {
        let mut g = self.inner.lock().unwrap();
        g.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().unwrap().attached
    }
}

/// Everything the enhancement pass discovers on the rendered page: the CSRF
/// hidden-field value (if the page carries one), the toggle controls, and the
/// alert banners present at load time.
///
/// Elements appearing after the snapshot are not discovered automatically;
/// callers register them explicitly.
#[derive(Debug)]
pub struct PageSnapshot {
    csrf_token: Option<String>,
    controls: Vec<ToggleControl>,
    alerts: Vec<AlertHandle>,
}

impl PageSnapshot {
    pub fn new(csrf_token: Option<String>) -> Self {
        Self {
            csrf_token,
            controls: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn register_control(&mut self, control: ToggleControl) {
        self.controls.push(control);
    }

    pub fn register_alert(&mut self, alert: AlertHandle) {
        self.alerts.push(alert);
    }

    pub fn controls(&self) -> &[ToggleControl] {
        &self.controls
    }

    pub fn alerts(&self) -> &[AlertHandle] {
        &self.alerts
    }

    pub fn control(&self, task_id: &str) -> Option<&ToggleControl> {
        self.controls.iter().find(|c| c.task_id() == task_id)
    }
}
