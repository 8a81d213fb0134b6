use crate::diag::{DiagEvent, DiagTx};
use crate::page::{ToggleControl, LABEL_MARK_COMPLETE, LABEL_MARK_INCOMPLETE, STRIKE_CLASS};

use super::client::{ToggleClient, ToggleResponse};

/// The handler bound to every completion-toggle control.
///
/// One activation means one request and at most one page mutation. Nothing
/// escapes the handler: transport and decode failures go to the diagnostic
/// sink, well-formed non-success responses are dropped without a trace.
pub struct CompletionToggler {
    client: ToggleClient,
    csrf_token: Option<String>,
    diag: Option<DiagTx>,
}

impl CompletionToggler {
    pub fn new(client: ToggleClient, csrf_token: Option<String>, diag: Option<DiagTx>) -> Self {
        Self {
            client,
            csrf_token,
            diag,
        }
    }

    pub async fn activate(&self, control: &ToggleControl) {
        let task_id = control.task_id();
        match self.client.toggle(task_id, self.csrf_token.as_deref()).await {
            Ok(resp) => self.apply(control, &resp),
            Err(err) => {
                tracing::debug!(
                    target: "taskpage.toggle",
                    stage = "toggle.fail",
                    task_id = %task_id,
                    kind = %err.kind()
                );
                if let Some(diag) = &self.diag {
                    diag.report(DiagEvent::toggle_failure(task_id, &err)).await;
                }
            }
        }
    }

    /// Success-path mutation. Responses are applied in arrival order; with
    /// overlapping activations the last one to resolve wins.
    pub fn apply(&self, control: &ToggleControl, resp: &ToggleResponse) {
        if !resp.is_success() {
            return;
        }
        control.row().toggle_class(STRIKE_CLASS);
        control.set_label(if resp.completed {
            LABEL_MARK_INCOMPLETE
        } else {
            LABEL_MARK_COMPLETE
        });
    }
}
