use crate::{Error, OrderSpec, SortKey};
use ::chrono::NaiveDateTime;
use ::std::cmp::Ordering;
use ::std::collections::BTreeMap;
use ::uuid::Uuid;

/// Untyped scalar carried between cursors, rows, and predicates. The
/// engine interprets values only through equality and ordering; anything
/// richer belongs to the host.
#[derive(Clone, Debug, Deserialize, From, PartialEq, Serialize)]
pub enum Value {
    #[from(skip)]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Uuid(Uuid),
}

impl Value {
    /// Rank used to totally order values of different kinds; within a
    /// kind (and across Int/Float) comparison is by value.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::Timestamp(_) => 4,
            Self::Uuid(_) => 5,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

/// Total canonical ordering over [`Value`]: Null sorts lowest, numerics
/// compare numerically across Int/Float, otherwise kind rank then value.
/// Hosts are expected to order their native column types compatibly.
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    use Value::*;
    match (left, right) {
        (Null, Null) => Ordering::Equal,
        (Bool(l), Bool(r)) => l.cmp(r),
        (Int(l), Int(r)) => l.cmp(r),
        (Float(l), Float(r)) => l.total_cmp(r),
        (Int(l), Float(r)) => (*l as f64).total_cmp(r),
        (Float(l), Int(r)) => l.total_cmp(&(*r as f64)),
        (Text(l), Text(r)) => l.cmp(r),
        (Timestamp(l), Timestamp(r)) => l.cmp(r),
        (Uuid(l), Uuid(r)) => l.cmp(r),
        _ => left.kind_rank().cmp(&right.kind_rank()),
    }
}

/// A fetched row as the host returns it: a column→value mapping.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Opaque boundary-row reference: either an explicit key→value mapping or
/// a full previously-fetched row. No other shapes are valid.
#[derive(Clone, Debug, Deserialize, From, IsVariant, PartialEq, Serialize)]
pub enum Cursor {
    Keys(BTreeMap<String, Value>),
    Row(Row),
}

impl Cursor {
    /// Single-key convenience constructor, the common primary-key cursor.
    pub fn key(identity: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Keys(BTreeMap::from([(identity.into(), value.into())]))
    }

    fn lookup(&self, identity: &str) -> Option<&Value> {
        match self {
            Self::Keys(keys) => keys.get(identity),
            Self::Row(row) => row.get(identity),
        }
    }

    /// Resolves one value per order key, in spec order. Partial cursors
    /// are invalid: every missing identity is reported in the error. An
    /// explicit `Value::Null` counts as present.
    pub fn resolve(&self, order: &OrderSpec) -> Result<Boundary, Error> {
        if order.is_empty() {
            return Err(Error::empty_order());
        }

        let mut slots = Vec::with_capacity(order.len());
        let mut missing = Vec::new();
        for key in order.keys() {
            match self.lookup(&key.identity) {
                Some(value) => slots.push((key.clone(), value.clone())),
                None => missing.push(key.identity.clone()),
            }
        }

        if missing.is_empty() {
            Ok(Boundary { slots })
        } else {
            Err(Error::InsufficientConstraints { missing })
        }
    }
}

/// A cursor resolved against an order spec: one `(key, value)` slot per
/// sort key, in lexicographic tie-break order.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    slots: Vec<(SortKey, Value)>,
}

impl Boundary {
    pub fn slots(&self) -> &[(SortKey, Value)] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortDirection;

    fn order() -> OrderSpec {
        let mut order = OrderSpec::new();
        order
            .add("status", SortDirection::Ascending)
            .add("created_at", SortDirection::Descending);
        order
    }

    #[test]
    fn resolves_explicit_keys_in_spec_order() {
        let cursor = Cursor::Keys(BTreeMap::from([
            ("created_at".to_string(), Value::Int(7)),
            ("status".to_string(), Value::from("open")),
        ]));
        let boundary = cursor.resolve(&order()).unwrap();
        assert_eq!(boundary.slots()[0].0.identity, "status");
        assert_eq!(boundary.slots()[0].1, Value::from("open"));
        assert_eq!(boundary.slots()[1].0.identity, "created_at");
        assert_eq!(boundary.slots()[1].1, Value::Int(7));
    }

    #[test]
    fn resolves_row_cursor() {
        let row = Row::new()
            .set("status", "open")
            .set("created_at", 7)
            .set("unrelated", true);
        let boundary = Cursor::Row(row).resolve(&order()).unwrap();
        assert_eq!(boundary.slots().len(), 2);
    }

    #[test]
    fn partial_cursor_names_every_missing_key() {
        let cursor = Cursor::key("status", "open");
        assert_eq!(
            cursor.resolve(&order()).unwrap_err(),
            Error::InsufficientConstraints {
                missing: vec!["created_at".into()]
            }
        );
    }

    #[test]
    fn empty_order_spec_fails_fast() {
        let cursor = Cursor::key("id", 1);
        assert_eq!(
            cursor.resolve(&OrderSpec::new()).unwrap_err(),
            Error::InsufficientConstraints { missing: vec![] }
        );
    }

    #[test]
    fn explicit_null_counts_as_present() {
        let cursor = Cursor::Keys(BTreeMap::from([
            ("status".to_string(), Value::Null),
            ("created_at".to_string(), Value::Int(1)),
        ]));
        assert!(cursor.resolve(&order()).is_ok());
    }

    #[test]
    fn canonical_order_puts_null_lowest() {
        assert_eq!(canonical_cmp(&Value::Null, &Value::Int(i64::MIN)), Ordering::Less);
        assert_eq!(canonical_cmp(&Value::Null, &Value::Null), Ordering::Equal);
    }

    #[test]
    fn canonical_order_compares_int_and_float_numerically() {
        assert_eq!(canonical_cmp(&Value::Int(2), &Value::Float(2.5)), Ordering::Less);
        assert_eq!(canonical_cmp(&Value::Float(3.0), &Value::Int(2)), Ordering::Greater);
    }

    #[test]
    fn cursor_round_trips_through_serde() {
        let cursor = Cursor::key("id", 42);
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(serde_json::from_str::<Cursor>(&json).unwrap(), cursor);
    }
}
