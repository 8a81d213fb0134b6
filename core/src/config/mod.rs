pub mod load;
pub mod types;

pub use load::{get_taskpage_data_dir, load_default};
pub use types::{AlertsConfig, AppConfig, DiagOutConfig, LoggingConfig, ServerConfig};
