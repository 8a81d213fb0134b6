pub mod model;
pub mod snapshot;

pub use model::{
    AlertHandle, PageSnapshot, RowHandle, ToggleControl, ALERT_SHOW_CLASS, LABEL_MARK_COMPLETE,
    LABEL_MARK_INCOMPLETE, STRIKE_CLASS,
};
pub use snapshot::{load_snapshot, PageReport, TaskReport};
