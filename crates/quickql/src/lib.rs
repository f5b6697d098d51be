//! # quickql
//!
//! A fluent, in-memory SQL query builder.
//!
//! ## Features
//!
//! - **Pure text assembly**: clause fragments accumulate through chained
//!   calls and render in standard clause order (no parsing, no parameter
//!   binding, no execution, no database connection)
//! - **Accumulating clauses**: repeated `select`/`from`/`group_by`/
//!   `order_by` calls extend the comma list; repeated `and_where`/
//!   `and_having` calls narrow the result (AND-joined); `limit` is
//!   last-write-wins
//! - **CTE support**: `with(name, query)` entries render under a single
//!   `WITH` clause in registration order
//! - **Escape hatch**: `add("LEFT JOIN", ...)` handles clauses without a
//!   dedicated mutator, rendered between FROM and WHERE
//! - **Fail-fast mutators**: invalid flags and CTE names error at the call
//!   site; rendering never fails
//!
//! ## Example
//!
//! ```
//! use quickql::query;
//!
//! # fn main() -> Result<(), quickql::QueryError> {
//! let q = query()
//!     .select(&["u.name"])
//!     .select_as("COUNT(o.id)", "order_count")
//!     .from(&["users u"])
//!     .add("LEFT JOIN", &["orders o ON o.user_id = u.id"])?
//!     .and_where("u.active = 1")
//!     .group_by(&["u.name"])
//!     .order_by(&["order_count DESC"])
//!     .limit(20);
//!
//! println!("{q}");
//! # Ok(())
//! # }
//! ```
//!
//! The rendered text is plain SQL with each clause keyword on its own line
//! and the clause body indented beneath it. Fragments pass through as-is
//! (after whitespace normalization); whether they are valid SQL is the
//! downstream engine's concern.

mod clause;
pub mod error;
pub mod ident;
pub mod keyword;
pub mod query;

pub use error::{QueryError, QueryResult};
pub use ident::{Ident, IntoIdent};
pub use keyword::{ClauseKind, Flag, Keyword};
pub use query::Query;

/// Create an empty [`Query`] builder.
///
/// # Example
/// ```
/// let q = quickql::query().select(&["*"]).from(&["users"]);
/// assert_eq!(q.to_sql(), "SELECT\n    *\nFROM\n    users");
/// ```
pub fn query() -> Query {
    Query::new()
}
