// Lowering of queries to PostgreSQL over the `documents` table:
//
//   documents(collection TEXT, id TEXT, content JSONB,
//             created_at TIMESTAMPTZ, updated_at TIMESTAMPTZ)

use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::ast::{Direction, Filter, Order, OrderKey, Query};
use crate::text::{like_pattern, path_segments};

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlBind {
    Json(Value),
    Text(String),
    /// A `text[]` path for the `#>` / `#>>` operators.
    Path(Vec<String>),
}

/// SQL text plus the values for its `$n` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlFragment {
    pub sql: String,
    pub binds: Vec<SqlBind>,
}

impl SqlFragment {
    fn bind(&mut self, value: SqlBind, first_placeholder: usize) -> usize {
        self.binds.push(value);
        first_placeholder + self.binds.len() - 1
    }
}

/// Lower a filter to a boolean SQL expression. Placeholders are numbered
/// from `first_placeholder`.
pub fn filter_to_sql(filter: &Filter, first_placeholder: usize) -> SqlFragment {
    let mut out = SqlFragment::default();
    let sql = lower(filter, &mut out, first_placeholder);
    out.sql = sql;
    out
}

fn lower(filter: &Filter, out: &mut SqlFragment, base: usize) -> String {
    match filter {
        Filter::Everything => "TRUE".to_string(),
        Filter::Eq(field, Value::Null) => lower(&Filter::defined(field.clone()).negate(), out, base),
        Filter::Neq(field, Value::Null) => lower(&Filter::defined(field.clone()), out, base),
        Filter::Eq(field, value) => {
            let n = out.bind(SqlBind::Json(nest(field, value.clone())), base);
            format!("content @> ${n}::jsonb")
        }
        Filter::Neq(field, value) => {
            let n = out.bind(SqlBind::Json(nest(field, value.clone())), base);
            format!("NOT (content @> ${n}::jsonb)")
        }
        Filter::Defined(field) => {
            let n = out.bind(SqlBind::Path(path_segments(field)), base);
            format!("(content #> ${n}::text[] IS NOT NULL AND jsonb_typeof(content #> ${n}::text[]) <> 'null')")
        }
        Filter::Contains { fields, term } => {
            if term.trim().is_empty() || fields.is_empty() {
                return "TRUE".to_string();
            }
            let pattern = out.bind(SqlBind::Text(like_pattern(term)), base);
            let mut parts = Vec::with_capacity(fields.len());
            for field in fields {
                let n = out.bind(SqlBind::Path(path_segments(field)), base);
                parts.push(format!("content #>> ${n}::text[] ILIKE ${pattern}"));
            }
            format!("({})", parts.join(" OR "))
        }
        Filter::And(l, r) => {
            let l = lower(l, out, base);
            let r = lower(r, out, base);
            format!("({l} AND {r})")
        }
        Filter::Or(l, r) => {
            let l = lower(l, out, base);
            let r = lower(r, out, base);
            format!("({l} OR {r})")
        }
        Filter::Not(inner) => format!("NOT ({})", lower(inner, out, base)),
    }
}

/// `a.b` = v becomes `{"a": {"b": v}}` for JSONB containment.
fn nest(path: &str, value: Value) -> Value {
    path_segments(path).into_iter().rev().fold(value, |acc, segment| {
        let mut map = Map::new();
        map.insert(segment, acc);
        Value::Object(map)
    })
}

/// Full `SELECT` for a query. `$1` is the collection name.
pub fn select_statement(query: &Query) -> SqlFragment {
    let mut out = SqlFragment {
        sql: String::new(),
        binds: vec![SqlBind::Text(query.collection.clone())],
    };
    let filter = filter_to_sql(&query.filter, 2);
    let mut sql = format!(
        "SELECT collection, id, content, created_at, updated_at FROM documents WHERE collection = $1 AND {}",
        filter.sql
    );
    out.binds.extend(filter.binds);

    let mut terms = Vec::with_capacity(query.order.len() + 1);
    for Order { key, direction } in &query.order {
        let dir = match direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        match key {
            OrderKey::CreatedAt => terms.push(format!("created_at {dir}")),
            OrderKey::UpdatedAt => terms.push(format!("updated_at {dir}")),
            OrderKey::Field(path) => {
                out.binds.push(SqlBind::Path(path_segments(path)));
                let n = out.binds.len();
                terms.push(format!("content #> ${n}::text[] {dir} NULLS LAST"));
            }
        }
    }
    terms.push("id ASC".to_string());
    let _ = write!(sql, " ORDER BY {}", terms.join(", "));
    if let Some(limit) = query.limit {
        let _ = write!(sql, " LIMIT {limit}");
    }
    out.sql = sql;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_uses_containment() {
        let frag = filter_to_sql(&Filter::eq("status", "published"), 2);
        assert_eq!(frag.sql, "content @> $2::jsonb");
        assert_eq!(frag.binds, vec![SqlBind::Json(json!({"status": "published"}))]);
    }

    #[test]
    fn nested_eq_builds_nested_object() {
        let frag = filter_to_sql(&Filter::eq("image.path", "a/b.png"), 1);
        assert_eq!(frag.binds, vec![SqlBind::Json(json!({"image": {"path": "a/b.png"}}))]);
    }

    #[test]
    fn and_numbers_placeholders_in_order() {
        let f = Filter::eq("status", "published").and(Filter::eq("locale", "he"));
        let frag = filter_to_sql(&f, 2);
        assert_eq!(frag.sql, "(content @> $2::jsonb AND content @> $3::jsonb)");
        assert_eq!(frag.binds.len(), 2);
    }

    #[test]
    fn contains_reuses_pattern_placeholder() {
        let frag = filter_to_sql(&Filter::contains(["title", "excerpt"], "Seed"), 1);
        assert_eq!(
            frag.sql,
            "(content #>> $2::text[] ILIKE $1 OR content #>> $3::text[] ILIKE $1)"
        );
        assert_eq!(frag.binds[0], SqlBind::Text("%Seed%".into()));
    }

    #[test]
    fn blank_contains_is_true() {
        let frag = filter_to_sql(&Filter::contains(["title"], "  "), 1);
        assert_eq!(frag.sql, "TRUE");
        assert!(frag.binds.is_empty());
    }

    #[test]
    fn eq_null_means_not_defined() {
        let frag = filter_to_sql(&Filter::eq("featuredImage", Value::Null), 1);
        assert!(frag.sql.starts_with("NOT ((content #> $1::text[] IS NOT NULL"));
    }

    #[test]
    fn select_orders_and_limits() {
        let q = Query::collection("blog_posts")
            .filter(Filter::eq("status", "published"))
            .order_by(OrderKey::CreatedAt, Direction::Desc)
            .limit(5);
        let frag = select_statement(&q);
        assert!(frag.sql.contains("WHERE collection = $1 AND content @> $2::jsonb"));
        assert!(frag.sql.ends_with("ORDER BY created_at DESC, id ASC LIMIT 5"));
        assert_eq!(frag.binds[0], SqlBind::Text("blog_posts".into()));
    }

    #[test]
    fn select_binds_field_order_after_filter() {
        let q = Query::collection("x")
            .filter(Filter::eq("a", 1))
            .order_by(OrderKey::Field("order".into()), Direction::Asc);
        let frag = select_statement(&q);
        assert!(frag.sql.contains("ORDER BY content #> $3::text[] ASC NULLS LAST, id ASC"));
        assert_eq!(frag.binds[2], SqlBind::Path(vec!["order".into()]));
    }
}
