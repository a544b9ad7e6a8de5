use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Config error: {0}")]
    Config(String),
}
