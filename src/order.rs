use crate::Error;
use ::std::fmt;
use ::std::str::FromStr;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// The SQL keyword form, used when rendering an ORDER BY clause.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        match text.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(Error::BadOrder(text.trim().to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One ordering key: a stable column or expression identity plus a
/// direction. The identity's rendered form must be reusable as a filter
/// target by the host.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SortKey {
    pub identity: String,
    pub direction: SortDirection,
}

/// Ordered, lexicographic-tie-break sequence of sort keys.
///
/// An empty spec is constructible (it starts empty) but requesting a
/// predicate or plan from one fails with
/// [`Error::InsufficientConstraints`]: pagination without at least one
/// ordering key is ill-defined.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    keys: Vec<SortKey>,
}

impl OrderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort key. Re-adding an identity already present replaces
    /// its direction in place: last write wins, position preserved at the
    /// first occurrence.
    pub fn add(&mut self, identity: impl Into<String>, direction: SortDirection) -> &mut Self {
        let identity = identity.into();
        match self.keys.iter_mut().find(|key| key.identity == identity) {
            Some(existing) => existing.direction = direction,
            None => self.keys.push(SortKey { identity, direction }),
        }
        self
    }

    /// Like [`add`](Self::add), but an overwritten identity also moves to
    /// the end of the spec (overwrite-and-reorder).
    pub fn add_last(&mut self, identity: impl Into<String>, direction: SortDirection) -> &mut Self {
        let identity = identity.into();
        self.keys.retain(|key| key.identity != identity);
        self.keys.push(SortKey { identity, direction });
        self
    }

    /// Appends a key from an identity plus direction text (`"ASC"` /
    /// `"DESC"`, case-insensitive).
    pub fn add_text(&mut self, identity: impl Into<String>, direction: &str) -> Result<&mut Self, Error> {
        let direction = direction.parse()?;
        Ok(self.add(identity, direction))
    }

    /// Appends a key parsed from a raw order expression such as
    /// `"created_at DESC"` or `"lower(name) asc"`. The direction must be
    /// an unambiguous trailing keyword; anything else fails with
    /// [`Error::BadKeyword`] before any predicate can be built.
    pub fn add_raw(&mut self, expr: &str) -> Result<&mut Self, Error> {
        let expr = expr.trim();
        let (identity, keyword) = expr
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| Error::BadKeyword(expr.to_string()))?;
        let direction = keyword
            .parse()
            .map_err(|_| Error::BadKeyword(keyword.to_string()))?;
        Ok(self.add(identity.trim_end(), direction))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// The same keys with every direction flipped; this is the effective
    /// fetch order for backward traversal.
    pub fn reversed(&self) -> Self {
        self.keys
            .iter()
            .map(|key| SortKey {
                identity: key.identity.clone(),
                direction: key.direction.reversed(),
            })
            .collect()
    }
}

impl FromIterator<SortKey> for OrderSpec {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        let mut spec = Self::new();
        for key in iter {
            spec.add(key.identity, key.direction);
        }
        spec
    }
}
