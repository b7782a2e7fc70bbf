use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid route table: {0}")]
    InvalidRoutes(String),
    #[error("no route matches location: {0}")]
    RouteNotFound(String),
    #[error("invalid location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },
    #[error("navigation to {0} exceeded the redirect limit")]
    RedirectLoop(String),
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
