use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Day index {index} out of range (form holds {len} days)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Unknown weather icon: {0}")]
    UnknownIcon(String),
    #[error("Invalid edit '{0}', expected INDEX.FIELD=VALUE")]
    InvalidEdit(String),
    #[error("Unknown start day: {0}")]
    StartDay(String),
    #[error("Invalid form file: {0}")]
    Form(String),
    #[error("Invalid layout: {0}")]
    Layout(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
