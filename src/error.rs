use ::std::fmt::Display;

/// Engine-side failures. Every variant is detected at plan-build time,
/// before any host execution is attempted; an invalid pagination request
/// never reaches the executor.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// An order direction is neither ascending nor descending.
    #[error("bad order direction: {0:?}")]
    BadOrder(String),
    /// A raw order expression's direction keyword could not be parsed.
    #[error("order expression has no recoverable direction keyword: {0:?}")]
    BadKeyword(String),
    /// The cursor does not supply a value for every order key, or the
    /// order specification is empty when a predicate is requested.
    #[error("{}", constraint_message(.missing))]
    InsufficientConstraints { missing: Vec<String> },
    /// The page limit is missing, non-integer, or not positive.
    #[error("invalid page limit: {0}")]
    LimitParameter(String),
}

impl Error {
    pub(crate) fn empty_order() -> Self {
        Self::InsufficientConstraints { missing: vec![] }
    }
}

fn constraint_message(missing: &[String]) -> String {
    if missing.is_empty() {
        "pagination requires a non-empty order specification".into()
    } else {
        format!("cursor is missing values for order keys: {}", missing.join(", "))
    }
}

/// Failure of a full pagination round: either the engine rejected the
/// request before execution, or the host executor failed. Executor
/// failures propagate unmodified.
#[derive(Debug, thiserror::Error)]
pub enum PaginateError<E: Display> {
    #[error(transparent)]
    Engine(#[from] Error),
    #[error("executor failure: {0}")]
    Executor(E),
}
