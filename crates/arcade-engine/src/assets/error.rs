use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no asset registered under key `{0}`")]
    UnknownKey(String),

    #[error("asset key `{0}` is registered twice")]
    DuplicateKey(String),

    #[error("sprite sheet `{key}` is invalid: {reason}")]
    InvalidSheet { key: String, reason: &'static str },

    #[error("failed to parse asset manifest")]
    Parse(#[from] serde_json::Error),
}
