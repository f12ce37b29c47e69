#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a bounding box carries exactly 8 points, got {count}")]
    BoundingBoxArity { count: usize },

    #[error("non-finite coordinate in {what}")]
    NonFinite { what: &'static str },

    #[error("Invalid snap config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid snap config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
