//! Per-clause fragment storage and the text helpers used at render time.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::keyword::Flag;

/// Accumulated state for one known clause: fragments in insertion order
/// plus an optional keyword flag.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clause {
    fragments: Vec<String>,
    flag: Option<Flag>,
}

impl Clause {
    /// Normalize and append one fragment. Fragments that are empty after
    /// normalization are dropped.
    pub(crate) fn push(&mut self, fragment: &str) {
        let fragment = normalize(fragment);
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    /// Set the clause flag. Setting the same flag twice is idempotent;
    /// a different flag is a conflict.
    pub(crate) fn set_flag(&mut self, flag: Flag) -> QueryResult<()> {
        match self.flag {
            Some(current) if current != flag => Err(QueryError::FlagConflict {
                current,
                requested: flag,
            }),
            _ => {
                self.flag = Some(flag);
                Ok(())
            }
        }
    }

    pub(crate) fn flag(&self) -> Option<Flag> {
        self.flag
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The fragment list joined with the clause separator.
    pub(crate) fn body(&self, separator: &str) -> String {
        self.fragments.join(separator)
    }
}

/// A common-table-expression entry, rendered as `name AS (body)` with the
/// body on its own indented lines.
#[derive(Debug, Clone)]
pub(crate) struct Cte {
    pub(crate) name: Ident,
    pub(crate) body: String,
}

impl Cte {
    pub(crate) fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 16);
        self.name.write_sql(&mut out);
        out.push_str(" AS (\n");
        out.push_str(&indent(&self.body));
        out.push_str("\n)");
        out
    }
}

/// A standalone clause registered through `add()` under an unknown keyword
/// (JOIN variants and the like). Custom clauses render between FROM and
/// WHERE in first-registration order.
#[derive(Debug, Clone)]
pub(crate) struct CustomClause {
    pub(crate) keyword: String,
    fragments: Vec<String>,
}

impl CustomClause {
    pub(crate) fn new(keyword: String) -> Self {
        Self {
            keyword,
            fragments: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, fragment: &str) {
        let fragment = normalize(fragment);
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub(crate) fn body(&self) -> String {
        self.fragments.join(", ")
    }
}

/// Normalize caller-supplied SQL text: right-trim, strip the longest
/// common leading whitespace of the non-blank lines, then trim the whole.
///
/// Multi-line fragments keep their internal relative indentation and are
/// re-indented uniformly by [`indent`] at render time.
pub(crate) fn normalize(text: &str) -> String {
    let text = text.trim_end();

    // Common leading whitespace across non-blank lines.
    let mut margin: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let stripped = line.trim_start();
        let line_margin = &line[..line.len() - stripped.len()];
        margin = Some(match margin {
            None => line_margin,
            Some(current) => {
                let common: usize = current
                    .chars()
                    .zip(line_margin.chars())
                    .take_while(|(a, b)| a == b)
                    .map(|(a, _)| a.len_utf8())
                    .sum();
                &current[..common]
            }
        });
    }
    let margin = margin.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Whitespace-only lines collapse to blank lines.
        if !line.trim().is_empty() {
            out.push_str(line.strip_prefix(margin).unwrap_or(line));
        }
    }
    out.trim().to_string()
}

/// Indent every non-blank line by four spaces.
pub(crate) fn indent(text: &str) -> String {
    const PREFIX: &str = "    ";

    let mut out = String::with_capacity(text.len() + PREFIX.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !line.trim().is_empty() {
            out.push_str(PREFIX);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_trims_whitespace() {
        let mut clause = Clause::default();
        clause.push("  name  ");
        assert_eq!(clause.body(", "), "name");
    }

    #[test]
    fn push_drops_empty_fragments() {
        let mut clause = Clause::default();
        clause.push("");
        clause.push("   ");
        clause.push("name");
        clause.push("\n\t ");
        assert_eq!(clause.body(", "), "name");
    }

    #[test]
    fn fragments_keep_insertion_order_without_dedup() {
        let mut clause = Clause::default();
        clause.push("a");
        clause.push("b");
        clause.push("a");
        assert_eq!(clause.body(", "), "a, b, a");
    }

    #[test]
    fn same_flag_twice_is_idempotent() {
        let mut clause = Clause::default();
        clause.set_flag(Flag::Distinct).unwrap();
        clause.set_flag(Flag::Distinct).unwrap();
        assert_eq!(clause.flag(), Some(Flag::Distinct));
    }

    #[test]
    fn conflicting_flag_is_rejected() {
        let mut clause = Clause::default();
        clause.set_flag(Flag::Distinct).unwrap();
        let err = clause.set_flag(Flag::All).unwrap_err();
        assert!(err.is_flag_conflict());
    }

    #[test]
    fn normalize_dedents_multiline_text() {
        let text = "
            SELECT id
            FROM users
            WHERE active = 1
        ";
        assert_eq!(normalize(text), "SELECT id\nFROM users\nWHERE active = 1");
    }

    #[test]
    fn normalize_keeps_relative_indentation() {
        let text = "
            user_id IN (
                SELECT id FROM active_users
            )
        ";
        assert_eq!(
            normalize(text),
            "user_id IN (\n    SELECT id FROM active_users\n)"
        );
    }

    #[test]
    fn normalize_collapses_blank_lines_to_empty() {
        let text = "a\n   \nb";
        assert_eq!(normalize(text), "a\n\nb");
    }

    #[test]
    fn indent_prefixes_non_blank_lines() {
        assert_eq!(indent("a\nb"), "    a\n    b");
        assert_eq!(indent("a\n\nb"), "    a\n\n    b");
    }

    #[test]
    fn cte_renders_parenthesized_body() {
        let cte = Cte {
            name: Ident::parse("cte1").unwrap(),
            body: "SELECT 1".to_string(),
        };
        assert_eq!(cte.render(), "cte1 AS (\n    SELECT 1\n)");
    }

    #[test]
    fn custom_clause_joins_with_commas() {
        let mut custom = CustomClause::new("LEFT JOIN".to_string());
        custom.push("a ON a.id = b.a_id");
        custom.push("");
        assert_eq!(custom.body(), "a ON a.id = b.a_id");
        assert!(!custom.is_empty());
    }
}
