use crate::{OrderSpec, PagePlan, Predicate, Value};
use ::itertools::Itertools;

/// Reference ANSI-SQL text rendering of the condition tree. Hosts with
/// their own expression layer ignore this and walk [`Predicate`] directly;
/// `describe` and plain-text-SQL hosts use it as-is.
pub fn render_predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Compare { key, op, value } => {
            format!("{key} {} {}", op.symbol(), render_value(value))
        }
        Predicate::All(terms) => terms
            .iter()
            .map(|term| format!("({})", render_predicate(term)))
            .join(" and "),
        Predicate::Any(terms) => terms
            .iter()
            .map(|term| format!("({})", render_predicate(term)))
            .join(" or "),
    }
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(text) => format!("'{}'", text.replace('\'', "''")),
        Value::Timestamp(ts) => format!("'{ts}'"),
        Value::Uuid(uuid) => format!("'{uuid}'"),
    }
}

pub fn render_order(order: &OrderSpec) -> String {
    order
        .keys()
        .iter()
        .map(|key| format!("{} {}", key.identity, key.direction.keyword()))
        .join(", ")
}

/// Renders the whole plan as a SQL clause fragment, the form `describe`
/// reports.
pub fn render_plan(plan: &PagePlan) -> String {
    let mut clauses = Vec::with_capacity(3);
    if let Some(predicate) = &plan.predicate {
        clauses.push(format!("where {}", render_predicate(predicate)));
    }
    clauses.push(format!("order by {}", render_order(&plan.order)));
    clauses.push(format!("limit {}", plan.fetch_count));
    clauses.join(" ")
}
