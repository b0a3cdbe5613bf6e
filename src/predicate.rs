use crate::{canonical_cmp, Boundary, Inclusivity, Row, TraversalDirection, Value};
use ::std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
        }
    }
}

/// Abstract boundary condition tree over sort-key identities and resolved
/// cursor values. Opaque to the host except that it can be rendered into
/// the host's filter language; structural equality is derived, so
/// identical inputs build structurally identical predicates.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Predicate {
    Compare {
        key: String,
        op: CompareOp,
        value: Value,
    },
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    fn compare(key: &str, op: CompareOp, value: &Value) -> Self {
        Self::Compare {
            key: key.to_string(),
            op,
            value: value.clone(),
        }
    }

    /// Evaluates the tree against one row under the canonical value
    /// ordering, reading an absent column as `Value::Null`. This is the
    /// reference semantics hosts must reproduce in their own filter
    /// language; the in-memory executor uses it directly.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Compare { key, op, value } => {
                let actual = row.get(key).unwrap_or(&Value::Null);
                match op {
                    CompareOp::Eq => canonical_cmp(actual, value) == Ordering::Equal,
                    CompareOp::Lt => canonical_cmp(actual, value) == Ordering::Less,
                    CompareOp::Gt => canonical_cmp(actual, value) == Ordering::Greater,
                }
            }
            Self::All(terms) => terms.iter().all(|term| term.matches(row)),
            Self::Any(terms) => terms.iter().any(|term| term.matches(row)),
        }
    }
}

/// The strict comparison selecting rows past the cursor on the first
/// differing key: `>` when the key's direction agrees with the traversal,
/// `<` otherwise.
fn strict_op(key_direction: crate::SortDirection, traversal: TraversalDirection) -> CompareOp {
    use crate::SortDirection::*;
    use TraversalDirection::*;
    match (key_direction, traversal) {
        (Ascending, Forward) | (Descending, Backward) => CompareOp::Gt,
        (Descending, Forward) | (Ascending, Backward) => CompareOp::Lt,
    }
}

fn group_all(mut terms: Vec<Predicate>) -> Predicate {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        Predicate::All(terms)
    }
}

/// Builds the lexicographic "next tuple" boundary predicate: a disjunction
/// over every possible first-difference position `i`, each branch equal on
/// all higher-priority keys and strictly past the cursor on key `i`.
/// Inclusive boundaries OR in one more branch, full equality across all
/// keys, so the cursor's own row stays eligible.
pub fn build_boundary(
    boundary: &Boundary,
    traversal: TraversalDirection,
    inclusivity: Inclusivity,
) -> Predicate {
    let slots = boundary.slots();
    let mut branches = Vec::with_capacity(slots.len() + 1);

    for (i, (key, value)) in slots.iter().enumerate() {
        let mut terms: Vec<Predicate> = slots[..i]
            .iter()
            .map(|(prior, prior_value)| Predicate::compare(&prior.identity, CompareOp::Eq, prior_value))
            .collect();
        terms.push(Predicate::compare(
            &key.identity,
            strict_op(key.direction, traversal),
            value,
        ));
        branches.push(group_all(terms));
    }

    if inclusivity == Inclusivity::Inclusive {
        branches.push(group_all(
            slots
                .iter()
                .map(|(key, value)| Predicate::compare(&key.identity, CompareOp::Eq, value))
                .collect(),
        ));
    }

    if branches.len() == 1 {
        branches.remove(0)
    } else {
        Predicate::Any(branches)
    }
}
