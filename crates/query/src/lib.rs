//! Query model for the site's document collections.
//!
//! A [`Query`] names a collection, a [`Filter`] over the JSON content of each
//! document and an ordering. The same query is evaluated in memory by
//! [`execute`] or lowered to PostgreSQL by [`sql::select_statement`], so both
//! store backends agree on what a query means.

pub mod ast;
pub mod eval;
pub mod sql;
mod text;

pub use ast::{Direction, Filter, Order, OrderKey, Query};
pub use eval::{compare_documents, eval_filter, execute, lookup, Document};
