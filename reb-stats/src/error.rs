/// Failure kinds surfaced by the statistics core.
///
/// None of these are fatal: callers degrade to an empty or default view.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// The backing store could not be reached or returned garbage.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A well-formed query legitimately matched nothing.
    #[error("No data: {0}")]
    NoData(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
