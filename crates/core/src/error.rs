use crate::integrity::IntegrityError;

#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse dataset: {0}")]
    DatasetParse(serde_yaml::Error),
    #[error("dataset has no {0}; at least one is required")]
    EmptyDataset(&'static str),
    #[error("dataset integrity check failed: {0}")]
    Integrity(#[from] IntegrityError),
    #[error("failed to parse event script: {0}")]
    ScriptParse(serde_yaml::Error),
    #[error("failed to serialize case: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to read asset directory: {0}")]
    AssetRead(std::io::Error),
    #[error("invalid text: {0}")]
    Text(#[from] showcase_types::TextError),
}

pub type ShowcaseResult<T> = std::result::Result<T, ShowcaseError>;
