use crate::{Row, TraversalDirection};
use ::tracing::trace;

/// One assembled page, terminal value of a pagination request. Rows are
/// always in the caller's logical order, regardless of traversal
/// direction; lookahead rows never appear.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PaginationResult {
    pub rows: Vec<Row>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Turns raw fetched rows (in fetch order, up to the planned fetch count)
/// into the final page.
///
/// A row past the page size proves more rows exist in the traversal
/// direction. Rows on the opposite side are proven by cursor presence
/// alone: with no cursor there is nothing before the first page, and with
/// a cursor at least the cursor's own row lies on the far side of the
/// boundary. Under backward traversal the fetch order is the reverse of
/// logical order, so the page is the first `limit` rows of the fetch,
/// re-reversed, and the two flags swap roles.
pub fn assemble(
    mut raw: Vec<Row>,
    limit: u32,
    direction: TraversalDirection,
    had_cursor: bool,
) -> PaginationResult {
    let more_in_traversal = raw.len() > limit as usize;
    raw.truncate(limit as usize);
    if direction == TraversalDirection::Backward {
        raw.reverse();
    }

    let (has_previous, has_next) = match direction {
        TraversalDirection::Forward => (had_cursor, more_in_traversal),
        TraversalDirection::Backward => (more_in_traversal, had_cursor),
    };

    trace!(
        rows = raw.len(),
        has_previous,
        has_next,
        "assembled page"
    );

    PaginationResult {
        rows: raw,
        has_previous,
        has_next,
    }
}
