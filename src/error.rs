use thiserror::Error;

/// Failures at the engine boundary. Rule violations are never errors; they
/// come back as a plain `false` from move validation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A square was not a column `a`-`i` followed by a row `1`-`10`.
    #[error("invalid notation `{0}`: expected a column a-i followed by a row 1-10")]
    Notation(String),

    /// Horse/Elephant transpositions were requested after play started.
    #[error("pieces can only be transposed before the first move")]
    SetupClosed,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
