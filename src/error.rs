pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("search index error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("corpus error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown {kind}: {value}")]
    Parse { kind: &'static str, value: String },
}
