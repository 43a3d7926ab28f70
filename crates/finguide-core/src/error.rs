use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinGuideError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Structural mismatch in {statement}: {detail}")]
    StructuralMismatch { statement: String, detail: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    #[error("Unknown profile preset: {0}")]
    UnknownProfile(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinGuideError {
    fn from(e: serde_json::Error) -> Self {
        FinGuideError::SerializationError(e.to_string())
    }
}
