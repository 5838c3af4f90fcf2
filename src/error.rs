use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenesysError {
    #[error("Ranked list fetch failed: {0}")]
    RankedList(String),

    #[error("Card catalog fetch failed: {0}")]
    Catalog(String),

    #[error("No points table found on the ranked list page")]
    TableMissing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenesysError>;
