use thiserror::Error;

pub type Result<T, E = RouteError> = core::result::Result<T, E>;

/// Errors surfaced by the routing engine.
///
/// None of these are fatal: unreachable destinations and unknown sources are
/// normally expressed in the forwarding table itself, and only show up here
/// when a caller asks for something the table cannot answer.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid weight {weight} for link {from} - {to}: weights must be positive and fit in u32")]
    InvalidWeight { from: String, to: String, weight: i64 },

    #[error("no path exists from {origin} to {destination}")]
    NoPath { origin: String, destination: String },

    #[error("forwarding table was computed for {actual}, not {expected}")]
    TableSourceMismatch { expected: String, actual: String },

    #[error("forwarding table is inconsistent while tracing toward {destination}")]
    InconsistentTable { destination: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("config: {0}")]
    Config(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl RouteError {
    pub fn no_path(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::NoPath {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
