use thiserror::Error;

#[derive(Error, Debug)]
pub enum QattrError {
    /// The question has no owning survey, so there is no locale list to fill
    /// i18n values against.
    #[error("Question {question_id} has no survey")]
    MissingParent { question_id: u64 },

    #[error("Source error: {0}")]
    Source(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QattrError>;
