//! Error types shared across the market crates

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum MarketError {
    /// A field was malformed or outside its valid range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A raw address string is not a well-formed hex address.
    #[error("bad address: {0}")]
    AddressFormat(String),

    /// An outcome label was looked up that the market does not have.
    #[error("outcome `{outcome}` not found in {outcomes:?}")]
    OutcomeNotFound {
        outcome: String,
        outcomes: Vec<String>,
    },

    /// An outcome index was looked up past the end of the outcome list.
    #[error("outcome index {index} not valid, there are only {len} outcomes")]
    OutcomeIndexOutOfRange { index: usize, len: usize },

    /// The embedded data blob could not be located in a scraped document.
    #[error("embedded payload marker not found in document")]
    PayloadNotFound,

    /// The embedded data blob is not syntactically valid JSON.
    #[error("malformed embedded payload: {0}")]
    MalformedPayload(String),

    /// More than one candidate market snapshot in a single document.
    #[error("expected at most one full market snapshot, found {count}")]
    AmbiguousPayload { count: usize },

    /// A closed market whose terminal prices are not a clean binary answer.
    #[error("closed market has unexpected outcome prices {prices:?} for outcomes {outcomes:?}")]
    UnresolvableOutcome {
        outcomes: Vec<String>,
        prices: Vec<String>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),
}

impl MarketError {
    pub fn validation(msg: impl Into<String>) -> Self {
        MarketError::Validation(msg.into())
    }

    pub fn address_format(msg: impl Into<String>) -> Self {
        MarketError::AddressFormat(msg.into())
    }

    pub fn malformed_payload(msg: impl Into<String>) -> Self {
        MarketError::MalformedPayload(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        MarketError::Network(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        MarketError::Api(msg.into())
    }
}

/// Result type alias for market operations
pub type MarketResult<T> = Result<T, MarketError>;
