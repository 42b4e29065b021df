use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL query failed: {0}")]
    QueryFailed(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Missing GitHub token (pass --github_token or set GITHUB_TOKEN)")]
    MissingToken,

    #[error("Report rendering failed: {0}")]
    Render(String),
}
