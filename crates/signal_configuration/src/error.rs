use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown service environment \"{0}\"")]
    UnknownEnvironment(String),
    #[error("bad base64 in configuration value")]
    Base64(#[from] base64::DecodeError),
    #[error("bad hex in configuration value")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
