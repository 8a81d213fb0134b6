use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::alerts::AlertDismisser;
use crate::config::AppConfig;
use crate::diag::DiagTx;
use crate::error::EnhanceError;
use crate::page::{AlertHandle, PageSnapshot, ToggleControl};
use crate::toggle::{CompletionToggler, ToggleClient};

/// The page-load pass: bind every toggle control and schedule every alert
/// present in the snapshot. Elements appearing later go through the
/// `register_*` entry points; there is no live observation.
pub struct PageEnhancer {
    toggler: Arc<CompletionToggler>,
    dismisser: AlertDismisser,
    controls: HashMap<String, ToggleControl>,
    tasks: JoinSet<()>,
}

impl PageEnhancer {
    pub fn attach(
        page: &PageSnapshot,
        cfg: &AppConfig,
        diag: Option<DiagTx>,
    ) -> Result<Self, EnhanceError> {
        let client = ToggleClient::new(&cfg.server.base_url, cfg.server.timeout_ms)
            .map_err(|e| EnhanceError::Config(e.to_string()))?;
        // The token is read once from the snapshot; a page without the hidden
        // field simply sends token-less requests.
        let toggler = Arc::new(CompletionToggler::new(
            client,
            page.csrf_token().map(str::to_string),
            diag,
        ));

        let mut enhancer = Self {
            toggler,
            dismisser: AlertDismisser::from_config(&cfg.alerts),
            controls: HashMap::new(),
            tasks: JoinSet::new(),
        };
        for control in page.controls() {
            enhancer.register_control(control.clone());
        }
        for alert in page.alerts() {
            enhancer.register_alert(alert.clone());
        }
        tracing::info!(
            target: "taskpage.enhance",
            controls = page.controls().len(),
            alerts = page.alerts().len(),
            "page enhanced"
        );
        Ok(enhancer)
    }

    /// Bind a control that appeared after the initial pass. A control with a
    /// task id already bound replaces the earlier binding.
    pub fn register_control(&mut self, control: ToggleControl) {
        self.controls
            .insert(control.task_id().to_string(), control);
    }

    /// Schedule dismissal for a banner that appeared after the initial pass.
    pub fn register_alert(&mut self, alert: AlertHandle) {
        self.tasks.spawn(self.dismisser.dismissal(alert));
    }

    /// Simulate a user activation of the control for `task_id`: fire and
    /// forget, one spawned request per call. Returns false when no such
    /// control is bound.
    pub fn activate(&mut self, task_id: &str) -> bool {
        let Some(control) = self.controls.get(task_id) else {
            tracing::debug!(
                target: "taskpage.enhance",
                task_id = %task_id,
                "activation for unbound control ignored"
            );
            return false;
        };
        let activation_id = uuid::Uuid::new_v4();
        tracing::debug!(
            target: "taskpage.enhance",
            activation_id = %activation_id,
            task_id = %task_id,
            "activation dispatched"
        );
        let toggler = self.toggler.clone();
        let control = control.clone();
        self.tasks.spawn(async move {
            toggler.activate(&control).await;
        });
        true
    }

    /// Await every spawned task: in-flight activations and alert timers.
    /// Dropping the enhancer instead abandons them, the way navigating away
    /// abandons a page's pending work.
    pub async fn wait_idle(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSnapshot;

    #[tokio::test]
    async fn activation_of_unbound_control_is_ignored() {
        let page = PageSnapshot::new(None);
        let mut enhancer =
            PageEnhancer::attach(&page, &AppConfig::default(), None).expect("attach");
        assert!(!enhancer.activate("404"));
        enhancer.wait_idle().await;
    }
}
