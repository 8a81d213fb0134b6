use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::AlertsConfig;
use crate::page::{AlertHandle, ALERT_SHOW_CLASS};

/// Schedules the two-stage removal of transient notification banners: hide
/// after the display delay, detach once the fade has run.
///
/// Each banner gets its own timer chain; chains never interact and cannot be
/// cancelled. A banner removed elsewhere in the meantime degrades the chain
/// to no-ops.
pub struct AlertDismisser {
    display: Duration,
    fade: Duration,
}

impl AlertDismisser {
    pub fn new(display: Duration, fade: Duration) -> Self {
        Self { display, fade }
    }

    pub fn from_config(cfg: &AlertsConfig) -> Self {
        Self::new(
            Duration::from_millis(cfg.display_ms),
            Duration::from_millis(cfg.fade_ms),
        )
    }

    /// The timer chain for one banner, not yet spawned.
    pub fn dismissal(&self, alert: AlertHandle) -> impl Future<Output = ()> + Send + 'static {
        let display = self.display;
        let fade = self.fade;
        async move {
            tokio::time::sleep(display).await;
            alert.remove_class(ALERT_SHOW_CLASS);
            tokio::time::sleep(fade).await;
            alert.detach();
        }
    }

    pub fn schedule(&self, alert: AlertHandle) -> JoinHandle<()> {
        tokio::spawn(self.dismissal(alert))
    }

    pub fn schedule_all(&self, alerts: &[AlertHandle]) -> Vec<JoinHandle<()>> {
        alerts
            .iter()
            .map(|alert| self.schedule(alert.clone()))
            .collect()
    }
}
