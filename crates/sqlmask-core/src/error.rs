use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("Duplicate alias in mapping: {0}")]
    DuplicateAlias(String),

    #[error("Original name mapped by more than one alias: {0}")]
    DuplicateOriginal(String),
}

pub type Result<T> = std::result::Result<T, MaskError>;
