use crate::{
    assemble, build_boundary, fetch_plan, render_order, render_predicate, Cursor, Error, OrderSpec,
    PaginateError, PaginationConfig, PaginationResult, Predicate, Row, SortDirection,
    TraversalDirection,
};
use ::std::fmt::Display;
use ::tracing::debug;

/// Host executor boundary. The engine hands over the boundary predicate
/// and the effective fetch order; the host renders both into its native
/// query language, executes, and returns rows in the exact fetch order
/// requested. Connectivity and SQL failures propagate unmodified through
/// [`PaginateError::Executor`].
pub trait Executor {
    type Error: Display;

    fn fetch(&self, plan: &PagePlan) -> Result<Vec<Row>, Self::Error>;
}

/// Everything the host needs to run one page fetch. Derived fresh per
/// request; no state is cached across calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PagePlan {
    /// Boundary condition, absent on a cursorless first page.
    pub predicate: Option<Predicate>,
    /// Effective ORDER BY: the caller's spec, reversed for backward
    /// traversal.
    pub order: OrderSpec,
    /// Row count to fetch, page size plus lookahead.
    pub fetch_count: u32,
    pub reverse_order: bool,
    pub(crate) limit: u32,
    pub(crate) direction: TraversalDirection,
    pub(crate) had_cursor: bool,
}

/// Pure rendering of a plan, or the structured reason one cannot be
/// built. `describe` never executes anything.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum PlanDescription {
    Plan {
        predicate: String,
        order: String,
        limit: u32,
        fetch_count: u32,
    },
    Unplannable {
        reason: String,
        missing: Vec<String>,
    },
}

/// One pagination request: the sort specification, the optional cursor,
/// and the per-request options. Treat as immutable once planned; the
/// engine itself never mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageQuery {
    order: OrderSpec,
    cursor: Option<Cursor>,
    config: PaginationConfig,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit, enumerated copy of another request's pagination state:
    /// exactly the order spec, cursor, and config, nothing else.
    pub fn from_query(other: &PageQuery) -> Self {
        Self {
            order: other.order.clone(),
            cursor: other.cursor.clone(),
            config: other.config,
        }
    }

    pub fn order_by(mut self, identity: impl Into<String>, direction: SortDirection) -> Self {
        self.order.add(identity, direction);
        self
    }

    /// Order ingestion from direction text (`"ASC"` / `"DESC"`), the form
    /// hosts surface from their own sort clauses.
    pub fn order_by_text(mut self, identity: impl Into<String>, direction: &str) -> Result<Self, Error> {
        self.order.add_text(identity, direction)?;
        Ok(self)
    }

    /// Order ingestion from a raw order expression (`"created_at DESC"`).
    pub fn order_by_raw(mut self, expr: &str) -> Result<Self, Error> {
        self.order.add_raw(expr)?;
        Ok(self)
    }

    pub fn clear_order(mut self) -> Self {
        self.order.clear();
        self
    }

    pub fn order(&self) -> &OrderSpec {
        &self.order
    }

    /// Supplies the boundary cursor; absent on the first page.
    pub fn cursor(mut self, cursor: impl Into<Cursor>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Cursor ingestion from a full previously-fetched row.
    pub fn cursor_row(self, row: Row) -> Self {
        self.cursor(Cursor::Row(row))
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.config = self.config.limit(limit);
        self
    }

    pub fn limit_text(mut self, text: &str) -> Result<Self, Error> {
        self.config = self.config.limit_text(text)?;
        Ok(self)
    }

    pub fn forward(mut self) -> Self {
        self.config = self.config.forward();
        self
    }

    pub fn backward(mut self) -> Self {
        self.config = self.config.backward();
        self
    }

    pub fn inclusive(mut self) -> Self {
        self.config = self.config.inclusive();
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.config = self.config.exclusive();
        self
    }

    pub fn seekable(mut self) -> Self {
        self.config = self.config.seekable();
        self
    }

    pub fn unseekable(mut self) -> Self {
        self.config = self.config.unseekable();
        self
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Builds the page fetch plan: boundary predicate, effective order,
    /// and fetch count. Every invalid request fails here, before any host
    /// execution; limit validation runs first so a bad limit is reported
    /// before any predicate is built.
    pub fn plan(&self) -> Result<PagePlan, Error> {
        if self.order.is_empty() {
            return Err(Error::empty_order());
        }
        let fetch = fetch_plan(&self.config)?;

        let predicate = match &self.cursor {
            Some(cursor) => {
                let boundary = cursor.resolve(&self.order)?;
                Some(build_boundary(
                    &boundary,
                    self.config.direction,
                    self.config.inclusivity,
                ))
            }
            None => None,
        };

        let order = if fetch.reverse_order {
            self.order.reversed()
        } else {
            self.order.clone()
        };

        debug!(
            keys = self.order.len(),
            fetch_count = fetch.fetch_count,
            direction = ?self.config.direction,
            has_cursor = self.cursor.is_some(),
            "built page plan"
        );

        Ok(PagePlan {
            predicate,
            order,
            fetch_count: fetch.fetch_count,
            reverse_order: fetch.reverse_order,
            limit: fetch.limit,
            direction: self.config.direction,
            had_cursor: self.cursor.is_some(),
        })
    }

    /// Renders the plan for inspection, or reports the structured reason
    /// planning fails. A cursorless first page is a valid plan; its
    /// predicate renders as `"<none>"`.
    pub fn describe(&self) -> PlanDescription {
        match self.plan() {
            Ok(plan) => PlanDescription::Plan {
                predicate: plan
                    .predicate
                    .as_ref()
                    .map(render_predicate)
                    .unwrap_or_else(|| "<none>".into()),
                order: render_order(&plan.order),
                limit: plan.limit,
                fetch_count: plan.fetch_count,
            },
            Err(error) => {
                let missing = match &error {
                    Error::InsufficientConstraints { missing } => missing.clone(),
                    _ => vec![],
                };
                PlanDescription::Unplannable {
                    reason: error.to_string(),
                    missing,
                }
            }
        }
    }

    /// Runs one full pagination round against a host executor: plan,
    /// fetch, assemble.
    pub fn paginate<X: Executor>(&self, executor: &X) -> Result<PaginationResult, PaginateError<X::Error>> {
        let plan = self.plan()?;
        let raw = executor.fetch(&plan).map_err(PaginateError::Executor)?;
        Ok(assemble(raw, plan.limit, plan.direction, plan.had_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cursor, Inclusivity, Seekability};

    fn base_query() -> PageQuery {
        PageQuery::new()
            .order_by("id", SortDirection::Ascending)
            .limit(2)
    }

    #[test]
    fn from_query_copies_only_pagination_state() {
        let original = base_query().cursor(Cursor::key("id", 7)).backward().inclusive();
        let copy = PageQuery::from_query(&original);
        assert_eq!(copy, original);
        assert_eq!(copy.config().inclusivity, Inclusivity::Inclusive);
        assert!(copy.cursor.as_ref().is_some_and(Cursor::is_keys));
    }

    #[test]
    fn cursorless_plan_has_no_predicate() {
        let plan = base_query().plan().unwrap();
        assert_eq!(plan.predicate, None);
        assert!(!plan.had_cursor);
        assert_eq!(plan.fetch_count, 3);
    }

    #[test]
    fn empty_order_fails_before_execution() {
        let query = PageQuery::new().limit(2).cursor(Cursor::key("id", 1));
        assert_eq!(query.plan().unwrap_err(), Error::empty_order());
    }

    #[test]
    fn limit_failure_precedes_cursor_resolution() {
        // Cursor is partial too, but the limit error must win.
        let query = PageQuery::new()
            .order_by("a", SortDirection::Ascending)
            .order_by("b", SortDirection::Ascending)
            .cursor(Cursor::key("a", 1));
        assert!(matches!(query.plan(), Err(Error::LimitParameter(_))));
    }

    #[test]
    fn backward_plan_reverses_effective_order() {
        let plan = base_query()
            .backward()
            .cursor(Cursor::key("id", 3))
            .plan()
            .unwrap();
        assert!(plan.reverse_order);
        assert_eq!(plan.order.keys()[0].direction, SortDirection::Descending);
    }

    #[test]
    fn seekable_plan_fetches_two_extra() {
        let query = base_query().seekable();
        assert_eq!(query.config().seekability, Seekability::Seekable);
        assert_eq!(query.plan().unwrap().fetch_count, 4);
    }

    #[test]
    fn describe_renders_a_cursorless_plan() {
        assert_eq!(
            base_query().describe(),
            PlanDescription::Plan {
                predicate: "<none>".into(),
                order: "id asc".into(),
                limit: 2,
                fetch_count: 3,
            }
        );
    }

    #[test]
    fn describe_reports_missing_constraints() {
        let query = PageQuery::new()
            .order_by("a", SortDirection::Ascending)
            .order_by("b", SortDirection::Ascending)
            .limit(2)
            .cursor(Cursor::key("a", 1));
        let PlanDescription::Unplannable { missing, .. } = query.describe() else {
            panic!("expected a diagnostic");
        };
        assert_eq!(missing, vec!["b".to_string()]);
    }
}
