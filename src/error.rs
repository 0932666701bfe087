use crate::parse;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] parse::Error),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The portal answered the login form without a logout link.
    #[error("Login rejected: the portal did not show a logged-in page")]
    AuthRejected,
}

pub type Result<T> = std::result::Result<T, Error>;
