use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Member data error: {0}")]
    Data(String),

    #[error("Duplicate member ID: '{0}'")]
    DuplicateId(String),

    #[error("Required origin member '{0}' is missing from the member list")]
    MissingOrigin(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
