use thiserror::Error;

/// Failure of a single weather API request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("OpenWeather API key is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to parse {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a position query.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("geolocation is not supported")]
    Unsupported,

    #[error("location lookup failed: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Advisory shown next to the widget when the default location is kept.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Unsupported => {
                "Geolocation is not supported on this system. Using default location."
            }
            Self::PermissionDenied | Self::Unavailable(_) => {
                "Unable to get your location. Using default location."
            }
        }
    }
}

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Failure of an order store query.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order store is not configured")]
    NotConfigured,

    #[error("store request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("store query failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Shortens a response body for inclusion in error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
