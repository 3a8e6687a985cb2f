use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Rendering error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Exported CSV is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
