//! The fluent query builder and its render routine.

use crate::clause::{Clause, Cte, CustomClause, indent, normalize};
use crate::error::{QueryError, QueryResult};
use crate::ident::IntoIdent;
use crate::keyword::{ClauseKind, Flag, Keyword};
use std::fmt;

/// A fluent SQL query builder that assembles a statement through method
/// chaining.
///
/// Clause calls accumulate in any order; [`Query::to_sql`] renders them in
/// standard SQL clause order, one clause keyword per line with the clause
/// body indented beneath it. The builder performs no validation of SQL
/// content: fragments are opaque text assumed to be valid SQL substrings.
///
/// Repeated calls accumulate: `select`/`from`/`group_by`/`order_by`
/// extend their comma lists and `and_where`/`and_having` narrow with
/// `AND`. The exception is `limit`, where the last call wins.
///
/// # Example
/// ```
/// let q = quickql::query()
///     .select(&["id", "name"])
///     .from(&["users"])
///     .and_where("active = 1")
///     .order_by(&["name"])
///     .limit(5);
///
/// assert_eq!(
///     q.to_sql(),
///     "SELECT\n    id, name\nFROM\n    users\nWHERE\n    active = 1\nORDER BY\n    name\nLIMIT\n    5"
/// );
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Query {
    // Field order is render order.
    ctes: Vec<Cte>,
    select: Clause,
    from: Clause,
    custom: Vec<CustomClause>,
    where_: Clause,
    group_by: Clause,
    having: Clause,
    order_by: Clause,
    limit: Option<String>,
}

impl Query {
    /// Create an empty builder. It renders to the empty string until a
    /// clause receives content.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT ====================

    /// Append SELECT columns.
    pub fn select(mut self, cols: &[&str]) -> Self {
        for col in cols {
            self.select.push(col);
        }
        self
    }

    /// Append one aliased SELECT expression, rendered as `expr AS alias`.
    pub fn select_as(mut self, expr: &str, alias: &str) -> Self {
        self.select.push(&aliased(expr, alias));
        self
    }

    /// Set the DISTINCT flag on the SELECT clause, so the keyword renders
    /// as `SELECT DISTINCT`.
    ///
    /// Errors if the clause already carries a different flag.
    pub fn distinct(mut self) -> QueryResult<Self> {
        self.select.set_flag(Flag::Distinct)?;
        Ok(self)
    }

    // ==================== FROM ====================

    /// Append FROM tables.
    pub fn from(mut self, tables: &[&str]) -> Self {
        for table in tables {
            self.from.push(table);
        }
        self
    }

    /// Append one aliased table, rendered as `table AS alias`.
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.from.push(&aliased(table, alias));
        self
    }

    // ==================== Conditions ====================

    /// Append one WHERE condition.
    ///
    /// Conditions are joined with `AND` at render time, so each call
    /// narrows the result further. There is no disjunctive form; write
    /// `(a OR b)` as a single condition instead.
    pub fn and_where(mut self, condition: &str) -> Self {
        self.where_.push(condition);
        self
    }

    /// Append one HAVING condition, AND-joined like WHERE.
    pub fn and_having(mut self, condition: &str) -> Self {
        self.having.push(condition);
        self
    }

    // ==================== Grouping & ordering ====================

    /// Append GROUP BY columns.
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        for col in cols {
            self.group_by.push(col);
        }
        self
    }

    /// Append ORDER BY columns.
    pub fn order_by(mut self, cols: &[&str]) -> Self {
        for col in cols {
            self.order_by.push(col);
        }
        self
    }

    /// Set LIMIT. Only one LIMIT is meaningful in a statement, so the last
    /// call wins.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n.to_string());
        self
    }

    // ==================== CTEs ====================

    /// Register a common table expression.
    ///
    /// Entries accumulate in registration order and render under a single
    /// `WITH` clause as comma-separated `name AS (query)` pairs ahead of
    /// everything else. The name is validated as a SQL identifier; the
    /// query body is opaque text.
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), quickql::QueryError> {
    /// let q = quickql::query()
    ///     .with("cte1", "SELECT 1")?
    ///     .select(&["*"])
    ///     .from(&["cte1"]);
    ///
    /// assert_eq!(
    ///     q.to_sql(),
    ///     "WITH\n    cte1 AS (\n        SELECT 1\n    )\nSELECT\n    *\nFROM\n    cte1"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn with(mut self, name: impl IntoIdent, query: &str) -> QueryResult<Self> {
        let name = name.into_ident()?;
        let body = normalize(query);
        if body.is_empty() {
            return Err(QueryError::validation("CTE query cannot be empty"));
        }
        self.ctes.push(Cte { name, body });
        Ok(self)
    }

    // ==================== Escape hatch ====================

    /// Add fragments under a clause keyword given as a string.
    ///
    /// Known keywords, optionally combined with a flag token (e.g.
    /// `"SELECT DISTINCT"`), route to the corresponding clause state.
    /// Unknown keywords register a standalone clause rendered between FROM
    /// and WHERE, in the order such clauses were first introduced; adding
    /// under the same keyword again appends to the existing clause.
    ///
    /// A known keyword followed by a flag it does not accept is an error,
    /// as is routing `WITH` through here (CTEs need a name, so use
    /// [`Query::with`]).
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), quickql::QueryError> {
    /// let q = quickql::query()
    ///     .select(&["u.name", "p.title"])
    ///     .from(&["users u"])
    ///     .add("LEFT JOIN", &["posts p ON p.user_id = u.id"])?
    ///     .and_where("u.active = 1");
    /// # Ok(())
    /// # }
    /// ```
    pub fn add(mut self, keyword: &str, args: &[&str]) -> QueryResult<Self> {
        match ClauseKind::parse(keyword)? {
            ClauseKind::Known { keyword, flag } => {
                let clause = match keyword {
                    Keyword::With => {
                        return Err(QueryError::validation(
                            "WITH requires a name; use with(name, query)",
                        ));
                    }
                    Keyword::Limit => {
                        // Single-valued clause: the last value wins.
                        if let Some(value) = args.last() {
                            let value = normalize(value);
                            if !value.is_empty() {
                                self.limit = Some(value);
                            }
                        }
                        return Ok(self);
                    }
                    Keyword::Select => &mut self.select,
                    Keyword::From => &mut self.from,
                    Keyword::Where => &mut self.where_,
                    Keyword::GroupBy => &mut self.group_by,
                    Keyword::Having => &mut self.having,
                    Keyword::OrderBy => &mut self.order_by,
                };
                if let Some(flag) = flag {
                    clause.set_flag(flag)?;
                }
                for arg in args {
                    clause.push(arg);
                }
                Ok(self)
            }
            ClauseKind::Custom(keyword) => {
                let index = match self.custom.iter().position(|c| c.keyword == keyword) {
                    Some(index) => index,
                    None => {
                        self.custom.push(CustomClause::new(keyword));
                        self.custom.len() - 1
                    }
                };
                for arg in args {
                    self.custom[index].push(arg);
                }
                Ok(self)
            }
        }
    }

    // ==================== Rendering ====================

    /// True when no clause has accumulated any content.
    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
            && self.select.is_empty()
            && self.select.flag().is_none()
            && self.from.is_empty()
            && self.custom.iter().all(CustomClause::is_empty)
            && self.where_.is_empty()
            && self.group_by.is_empty()
            && self.having.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
    }

    /// Render the accumulated clauses as a SQL text block.
    ///
    /// Rendering is side-effect-free and repeatable: the same accumulated
    /// state always produces the same text, and the builder stays mutable
    /// afterwards. An empty builder renders to the empty string; otherwise
    /// a SELECT clause is always emitted, defaulting its column list to
    /// `*` when no columns were added.
    pub fn to_sql(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut parts: Vec<String> = Vec::new();

        if !self.ctes.is_empty() {
            parts.push(Keyword::With.as_sql().to_string());
            let entries: Vec<String> = self.ctes.iter().map(Cte::render).collect();
            parts.push(indent(&entries.join(", ")));
        }

        push_keyword(&mut parts, Keyword::Select, self.select.flag());
        if self.select.is_empty() {
            parts.push(indent("*"));
        } else {
            parts.push(indent(&self.select.body(Keyword::Select.separator())));
        }

        push_clause(&mut parts, Keyword::From, &self.from);

        for custom in &self.custom {
            if custom.is_empty() {
                continue;
            }
            parts.push(custom.keyword.clone());
            parts.push(indent(&custom.body()));
        }

        push_clause(&mut parts, Keyword::Where, &self.where_);
        push_clause(&mut parts, Keyword::GroupBy, &self.group_by);
        push_clause(&mut parts, Keyword::Having, &self.having);
        push_clause(&mut parts, Keyword::OrderBy, &self.order_by);

        if let Some(limit) = &self.limit {
            parts.push(Keyword::Limit.as_sql().to_string());
            parts.push(indent(limit));
        }

        let sql = parts.join("\n");

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = sql.len(), "rendered SQL query");

        sql
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn push_keyword(parts: &mut Vec<String>, keyword: Keyword, flag: Option<Flag>) {
    match flag {
        Some(flag) => parts.push(format!("{} {}", keyword.as_sql(), flag.as_sql())),
        None => parts.push(keyword.as_sql().to_string()),
    }
}

fn push_clause(parts: &mut Vec<String>, keyword: Keyword, clause: &Clause) {
    if clause.is_empty() {
        return;
    }
    push_keyword(parts, keyword, clause.flag());
    parts.push(indent(&clause.body(keyword.separator())));
}

/// `value AS alias`; a half that normalizes to nothing drops the alias.
fn aliased(value: &str, alias: &str) -> String {
    let value = normalize(value);
    if value.is_empty() {
        return value;
    }
    let alias = normalize(alias);
    if alias.is_empty() {
        return value;
    }
    format!("{value} AS {alias}")
}
