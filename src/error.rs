use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
}

/// Body of a 403 response.
///
/// The marketplace usually answers with a structured problem document, but
/// some gateways return plain text instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenBody {
    Structured {
        title: String,
        detail: String,
        request_id: String,
        origin: String,
    },
    Raw(String),
}

/// Marketplace API failures, one variant per status class.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {body}")]
    BadRequest { body: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0:?}")]
    Forbidden(ForbiddenBody),

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected status {status}: {body}")]
    Unexpected { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Slot booker failures.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("failed to launch booker: {0}")]
    Launch(#[source] std::io::Error),

    #[error("booker killed by signal")]
    Killed,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("messenger error: {0}")]
    Messenger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
