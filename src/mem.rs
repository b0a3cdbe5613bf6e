use crate::{canonical_cmp, Executor, OrderSpec, PagePlan, Row, SortDirection, Value};
use ::std::cmp::Ordering;
use ::std::convert::Infallible;

/// Compares two rows under an order spec with the canonical value
/// ordering, reading an absent column as `Value::Null`. Only the first
/// non-equal key governs the result.
pub fn compare_rows(left: &Row, right: &Row, order: &OrderSpec) -> Ordering {
    for key in order.keys() {
        let l = left.get(&key.identity).unwrap_or(&Value::Null);
        let r = right.get(&key.identity).unwrap_or(&Value::Null);
        let ordering = match key.direction {
            SortDirection::Ascending => canonical_cmp(l, r),
            SortDirection::Descending => canonical_cmp(l, r).reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Reference host: a plain in-memory dataset that evaluates the boundary
/// predicate with the engine's own canonical ordering. Exists so the
/// engine's contract can be exercised end to end without a database; real
/// hosts render the plan into their query language instead.
#[derive(Clone, Debug, Default)]
pub struct MemoryExecutor {
    rows: Vec<Row>,
}

impl MemoryExecutor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl Executor for MemoryExecutor {
    type Error = Infallible;

    fn fetch(&self, plan: &PagePlan) -> Result<Vec<Row>, Infallible> {
        let mut rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| match &plan.predicate {
                Some(predicate) => predicate.matches(row),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|left, right| compare_rows(left, right, &plan.order));
        rows.truncate(plan.fetch_count as usize);
        Ok(rows)
    }
}
