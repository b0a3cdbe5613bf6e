use crate::{pagination_max_limit, Error};
use ::tracing::debug;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TraversalDirection {
    #[default]
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Inclusivity {
    Inclusive,
    /// The cursor's own row is excluded from the adjacent page.
    #[default]
    Exclusive,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Seekability {
    /// Report page existence in both directions from a single fetch.
    Seekable,
    /// Report only the traversal direction's continuation.
    #[default]
    Unseekable,
}

/// Per-request pagination options. Each option is a named method on a
/// closed set known at compile time; there is no string-dispatched
/// configuration. Built once per request and immutable once planned.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PaginationConfig {
    pub direction: TraversalDirection,
    pub inclusivity: Inclusivity,
    pub seekability: Seekability,
    limit: Option<u32>,
}

impl PaginationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(mut self) -> Self {
        self.direction = TraversalDirection::Forward;
        self
    }

    pub fn backward(mut self) -> Self {
        self.direction = TraversalDirection::Backward;
        self
    }

    pub fn inclusive(mut self) -> Self {
        self.inclusivity = Inclusivity::Inclusive;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.inclusivity = Inclusivity::Exclusive;
        self
    }

    pub fn seekable(mut self) -> Self {
        self.seekability = Seekability::Seekable;
        self
    }

    pub fn unseekable(mut self) -> Self {
        self.seekability = Seekability::Unseekable;
        self
    }

    /// Sets the page size. Validation happens at plan time so a zero
    /// limit surfaces as [`Error::LimitParameter`] rather than silently
    /// degrading the fetch.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page size from text derivable to an integer, the form
    /// hosts surface from a raw limit clause. Non-integer text fails
    /// immediately.
    pub fn limit_text(self, text: &str) -> Result<Self, Error> {
        let limit = text
            .trim()
            .parse()
            .map_err(|_| Error::LimitParameter(format!("not an integer: {:?}", text.trim())))?;
        Ok(self.limit(limit))
    }

    pub(crate) fn validated_limit(&self) -> Result<u32, Error> {
        validate_limit(self.limit, *pagination_max_limit())
    }
}

fn validate_limit(limit: Option<u32>, cap: Option<u32>) -> Result<u32, Error> {
    let limit = limit.ok_or_else(|| Error::LimitParameter("page limit is not set".into()))?;
    if limit == 0 {
        return Err(Error::LimitParameter("page limit must be positive".into()));
    }
    if let Some(cap) = cap {
        if limit > cap {
            return Err(Error::LimitParameter(format!(
                "page limit {limit} exceeds the configured maximum {cap}"
            )));
        }
    }
    Ok(limit)
}

/// How many rows to ask the host for, and in which order. The rows past
/// the page size are lookahead only and never appear in the page.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchPlan {
    pub limit: u32,
    pub fetch_count: u32,
    /// Backward traversal fetches in the reverse of the logical order so
    /// the rows closest to the cursor survive the host's LIMIT.
    pub reverse_order: bool,
}

pub(crate) fn fetch_plan(config: &PaginationConfig) -> Result<FetchPlan, Error> {
    let limit = config.validated_limit()?;
    let lookahead = match config.seekability {
        Seekability::Unseekable => 1,
        Seekability::Seekable => 2,
    };
    let plan = FetchPlan {
        limit,
        fetch_count: limit + lookahead,
        reverse_order: config.direction == TraversalDirection::Backward,
    };
    debug!(
        limit,
        fetch_count = plan.fetch_count,
        reverse_order = plan.reverse_order,
        "computed fetch plan"
    );
    Ok(plan)
}
