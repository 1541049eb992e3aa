use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter expression over a document's JSON content.
///
/// Field names are dotted paths (`author.email`) into nested objects. A
/// missing field compares equal to `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Everything,
    Eq(String, Value),
    Neq(String, Value),
    Defined(String),
    /// Case-insensitive substring match against any of the listed string
    /// fields. A blank term matches every document.
    Contains {
        fields: Vec<String>,
        term: String,
    },
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Neq(field.into(), value.into())
    }

    pub fn defined(field: impl Into<String>) -> Self {
        Filter::Defined(field.into())
    }

    pub fn contains<I, S>(fields: I, term: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Contains {
            fields: fields.into_iter().map(Into::into).collect(),
            term: term.into(),
        }
    }

    /// Conjunction. `Everything` is the identity, so chaining onto an
    /// unfiltered query does not grow the tree.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::Everything, f) | (f, Filter::Everything) => f,
            (a, b) => Filter::And(Box::new(a), Box::new(b)),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        Filter::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Self {
        Filter::Not(Box::new(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// What to sort by. Timestamps are store metadata, not content fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKey {
    CreatedAt,
    UpdatedAt,
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub key: OrderKey,
    pub direction: Direction,
}

/// A query against one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub collection: String,
    pub filter: Filter,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filter: Filter::Everything,
            order: Vec::new(),
            limit: None,
        }
    }

    /// Narrow the query; repeated calls are combined with `and`.
    pub fn filter(mut self, filter: Filter) -> Self {
        let current = std::mem::replace(&mut self.filter, Filter::Everything);
        self.filter = current.and(filter);
        self
    }

    pub fn order_by(mut self, key: OrderKey, direction: Direction) -> Self {
        self.order.push(Order { key, direction });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
