//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `taskpage_core::api` instead of reaching into internal modules.

pub use crate::alerts::AlertDismisser;
pub use crate::config::{
    load_default, AlertsConfig, AppConfig, DiagOutConfig, LoggingConfig, ServerConfig,
};
pub use crate::diag::{start_diag, DiagEvent, DiagTx};
pub use crate::enhance::PageEnhancer;
pub use crate::error::{CliError, EnhanceError};
pub use crate::page::{
    load_snapshot, AlertHandle, PageReport, PageSnapshot, RowHandle, TaskReport, ToggleControl,
    ALERT_SHOW_CLASS, LABEL_MARK_COMPLETE, LABEL_MARK_INCOMPLETE, STRIKE_CLASS,
};
pub use crate::toggle::{
    CompletionToggler, ToggleClient, ToggleHttpError, ToggleHttpErrorKind, ToggleResponse,
};
