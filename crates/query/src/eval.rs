// In-memory query evaluation.

use std::cmp::Ordering;

use serde_json::Value;

use crate::ast::{Direction, Filter, Order, OrderKey, Query};
use crate::text::contains_ci;

/// Read access the evaluator needs from a stored document.
pub trait Document {
    /// Resolve a dotted path into the document content.
    fn field(&self, path: &str) -> Option<&Value>;
    /// Creation time in microseconds since the Unix epoch.
    fn created_at_micros(&self) -> i64;
    /// Last update time in microseconds since the Unix epoch.
    fn updated_at_micros(&self) -> i64;
}

/// Resolve a dotted path (`a.b.c`) inside a JSON value. Explicit `null`
/// is reported as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

pub fn eval_filter<D: Document + ?Sized>(filter: &Filter, doc: &D) -> bool {
    match filter {
        Filter::Everything => true,
        Filter::Eq(field, expected) => doc.field(field).unwrap_or(&Value::Null) == expected,
        Filter::Neq(field, expected) => doc.field(field).unwrap_or(&Value::Null) != expected,
        Filter::Defined(field) => doc.field(field).is_some(),
        Filter::Contains { fields, term } => {
            term.trim().is_empty()
                || fields.iter().any(|f| match doc.field(f) {
                    Some(Value::String(s)) => contains_ci(s, term),
                    _ => false,
                })
        }
        Filter::And(l, r) => eval_filter(l, doc) && eval_filter(r, doc),
        Filter::Or(l, r) => eval_filter(l, doc) || eval_filter(r, doc),
        Filter::Not(inner) => !eval_filter(inner, doc),
    }
}

/// Compare two documents under an ordering. Documents missing an ordered
/// field sort after those that have it, whatever the direction.
pub fn compare_documents<D: Document + ?Sized>(a: &D, b: &D, order: &[Order]) -> Ordering {
    for o in order {
        let ord = match &o.key {
            OrderKey::CreatedAt => directed(a.created_at_micros().cmp(&b.created_at_micros()), o.direction),
            OrderKey::UpdatedAt => directed(a.updated_at_micros().cmp(&b.updated_at_micros()), o.direction),
            OrderKey::Field(path) => match (a.field(path), b.field(path)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => directed(compare_values(x, y), o.direction),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn directed(ord: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Run a query over an in-memory set of documents belonging to the
/// query's collection. Ties keep their input order.
pub fn execute<'a, D, I>(query: &Query, docs: I) -> Vec<D>
where
    D: Document + Clone + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let mut matched: Vec<D> = docs
        .into_iter()
        .filter(|d| eval_filter(&query.filter, *d))
        .cloned()
        .collect();
    matched.sort_by(|a, b| compare_documents(a, b, &query.order));
    if let Some(limit) = query.limit {
        matched.truncate(limit);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug)]
    struct TestDoc {
        content: Value,
        created: i64,
    }

    impl Document for TestDoc {
        fn field(&self, path: &str) -> Option<&Value> {
            lookup(&self.content, path)
        }
        fn created_at_micros(&self) -> i64 {
            self.created
        }
        fn updated_at_micros(&self) -> i64 {
            self.created
        }
    }

    fn doc(content: Value, created: i64) -> TestDoc {
        TestDoc { content, created }
    }

    #[test]
    fn eval_simple_eq() {
        let d = doc(json!({"status": "published"}), 1);
        assert!(eval_filter(&Filter::eq("status", "published"), &d));
        assert!(!eval_filter(&Filter::eq("status", "draft"), &d));
    }

    #[test]
    fn eval_and() {
        let f = Filter::eq("status", "published").and(Filter::eq("locale", "he"));
        assert!(eval_filter(&f, &doc(json!({"status": "published", "locale": "he"}), 1)));
        assert!(!eval_filter(&f, &doc(json!({"status": "published", "locale": "en"}), 1)));
    }

    #[test]
    fn eval_dot_access() {
        let f = Filter::eq("image.path", "blog-images/1-a.png");
        let d = doc(json!({"image": {"url": "/u/x", "path": "blog-images/1-a.png"}}), 1);
        assert!(eval_filter(&f, &d));
    }

    #[test]
    fn missing_field_equals_null() {
        let d = doc(json!({"title": "x"}), 1);
        assert!(eval_filter(&Filter::eq("featuredImage", Value::Null), &d));
        assert!(!eval_filter(&Filter::defined("featuredImage"), &d));
        assert!(eval_filter(&Filter::neq("status", "published"), &d));
    }

    #[test]
    fn contains_matches_any_field() {
        let f = Filter::contains(["title", "excerpt"], "SERIES a");
        assert!(eval_filter(&f, &doc(json!({"title": "Raising", "excerpt": "Your Series A"}), 1)));
        assert!(!eval_filter(&f, &doc(json!({"title": "Raising", "excerpt": "Seed"}), 1)));
        assert!(eval_filter(&Filter::contains(["title"], ""), &doc(json!({}), 1)));
    }

    #[test]
    fn execute_orders_newest_first_and_limits() {
        let docs = vec![
            doc(json!({"n": "old", "status": "published"}), 10),
            doc(json!({"n": "draft", "status": "draft"}), 30),
            doc(json!({"n": "new", "status": "published"}), 20),
        ];
        let q = Query::collection("blog_posts")
            .filter(Filter::eq("status", "published"))
            .order_by(OrderKey::CreatedAt, Direction::Desc);

        let out = execute(&q, &docs);
        let names: Vec<_> = out.iter().map(|d| d.content["n"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["new", "old"]);

        let out = execute(&q.limit(1), &docs);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn field_order_puts_missing_last() {
        let docs = vec![
            doc(json!({"order": 3}), 1),
            doc(json!({}), 2),
            doc(json!({"order": 1}), 3),
        ];
        let q = Query::collection("x").order_by(OrderKey::Field("order".into()), Direction::Desc);
        let out = execute(&q, &docs);
        assert_eq!(out[0].content["order"], json!(3));
        assert_eq!(out[1].content["order"], json!(1));
        assert!(out[2].content.get("order").is_none());
    }
}
