pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown operator: {id}")]
    UnknownOperator { id: String },

    #[error("unknown region: {id}")]
    UnknownRegion { id: String },

    #[error("unknown message angle: {id}")]
    UnknownAngle { id: String },

    #[error("invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
