use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("enhance failed: {0}")]
    Enhance(#[from] EnhanceError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
}
