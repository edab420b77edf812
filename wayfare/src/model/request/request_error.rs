#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failure decoding routing request: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("invalid value for '{field}': {msg}")]
    InvalidParameter { field: String, msg: String },
}
