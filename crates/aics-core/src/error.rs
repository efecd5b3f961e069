use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid trigger pattern `{pattern}`: {source}")]
    InvalidTrigger {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("enter at least one phone number")]
    NoPhoneNumbers,

    #[error("cloud connected PSTN needs a provider")]
    MissingProvider,

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
