use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("trip text is empty")]
    Empty,

    #[error("no JSON object or array found in trip text")]
    NoJsonFound,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
