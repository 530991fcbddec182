use std::time::Duration;
use crate::repositories::directory::Predicate;

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Directory lookup by {predicate} failed: {source}")]
    Directory {
        predicate: Predicate,
        #[source]
        source: anyhow::Error,
    },
    #[error("Directory lookup by {predicate} did not finish: {message}")]
    TaskFailed { predicate: Predicate, message: String },
    #[error("Directory lookups did not finish within {0:?}")]
    Timeout(Duration),
}
