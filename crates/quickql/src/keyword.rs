//! Clause keywords, keyword flags, and the `add()` dispatch type.

use crate::error::{QueryError, QueryResult};
use std::fmt;

/// A known SQL clause keyword.
///
/// Variants are declared in render order; [`crate::Query::to_sql`] emits
/// clauses in this sequence regardless of the order mutators were called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyword {
    With,
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
}

impl Keyword {
    /// The SQL text of the keyword.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::With => "WITH",
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Limit => "LIMIT",
        }
    }

    /// Separator placed between this clause's fragments at render time.
    ///
    /// WHERE and HAVING conditions are conjunctive; everything else is a
    /// comma list.
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Where | Self::Having => " AND ",
            _ => ", ",
        }
    }

    /// Whether this keyword accepts the given flag.
    pub const fn allows_flag(self, flag: Flag) -> bool {
        matches!((self, flag), (Self::Select, Flag::Distinct | Flag::All))
    }

    /// Match canonical keyword text (uppercase, single-spaced).
    fn parse(s: &str) -> Option<Self> {
        match s {
            "WITH" => Some(Self::With),
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP BY" => Some(Self::GroupBy),
            "HAVING" => Some(Self::Having),
            "ORDER BY" => Some(Self::OrderBy),
            "LIMIT" => Some(Self::Limit),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A clause-keyword modifier (`SELECT DISTINCT`, `SELECT ALL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Distinct,
    All,
}

impl Flag {
    /// The SQL text of the flag.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("DISTINCT") {
            Some(Self::Distinct)
        } else if s.eq_ignore_ascii_case("ALL") {
            Some(Self::All)
        } else {
            None
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The parsed form of an `add()` clause keyword.
///
/// Known keywords (optionally combined with a flag token) dispatch to the
/// builder's own clause state; anything else is a standalone custom clause
/// carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseKind {
    /// A known clause, e.g. `"WHERE"` or `"SELECT DISTINCT"`.
    Known {
        keyword: Keyword,
        flag: Option<Flag>,
    },
    /// A standalone clause keyword, e.g. `"LEFT JOIN"`.
    Custom(String),
}

impl ClauseKind {
    /// Classify a raw clause keyword string.
    ///
    /// Keyword and flag recognition is case-insensitive. A known keyword
    /// followed by anything that is not a flag it accepts is rejected here
    /// rather than smuggled into the output as a custom clause.
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(QueryError::EmptyClauseKeyword);
        }

        // Longest known-keyword prefix wins, so "GROUP BY" is not read as
        // an unknown "GROUP" clause.
        for take in (1..=tokens.len().min(2)).rev() {
            let head = tokens[..take].join(" ").to_ascii_uppercase();
            let Some(keyword) = Keyword::parse(&head) else {
                continue;
            };

            let rest = &tokens[take..];
            return match rest {
                [] => Ok(Self::Known {
                    keyword,
                    flag: None,
                }),
                [token] => match Flag::parse(token) {
                    Some(flag) if keyword.allows_flag(flag) => Ok(Self::Known {
                        keyword,
                        flag: Some(flag),
                    }),
                    _ => Err(QueryError::UnsupportedFlag {
                        clause: keyword.as_sql().to_string(),
                        flag: (*token).to_string(),
                    }),
                },
                _ => Err(QueryError::UnsupportedFlag {
                    clause: keyword.as_sql().to_string(),
                    flag: rest.join(" "),
                }),
            };
        }

        Ok(Self::Custom(tokens.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_keyword() {
        assert_eq!(
            ClauseKind::parse("WHERE").unwrap(),
            ClauseKind::Known {
                keyword: Keyword::Where,
                flag: None
            }
        );
    }

    #[test]
    fn parses_two_word_keyword() {
        assert_eq!(
            ClauseKind::parse("GROUP BY").unwrap(),
            ClauseKind::Known {
                keyword: Keyword::GroupBy,
                flag: None
            }
        );
    }

    #[test]
    fn parses_keyword_with_flag() {
        assert_eq!(
            ClauseKind::parse("SELECT DISTINCT").unwrap(),
            ClauseKind::Known {
                keyword: Keyword::Select,
                flag: Some(Flag::Distinct)
            }
        );
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        assert_eq!(
            ClauseKind::parse("select all").unwrap(),
            ClauseKind::Known {
                keyword: Keyword::Select,
                flag: Some(Flag::All)
            }
        );
    }

    #[test]
    fn unknown_keyword_is_custom() {
        assert_eq!(
            ClauseKind::parse("LEFT JOIN").unwrap(),
            ClauseKind::Custom("LEFT JOIN".to_string())
        );
    }

    #[test]
    fn custom_keyword_keeps_case_and_collapses_whitespace() {
        assert_eq!(
            ClauseKind::parse("  Left   Join ").unwrap(),
            ClauseKind::Custom("Left Join".to_string())
        );
    }

    #[test]
    fn rejects_flag_on_unflaggable_clause() {
        let err = ClauseKind::parse("FROM DISTINCT").unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedFlag { .. }));
    }

    #[test]
    fn rejects_unknown_flag_token() {
        let err = ClauseKind::parse("SELECT FANCY").unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedFlag { .. }));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(ClauseKind::parse("GROUP BY CUBE").is_err());
        assert!(ClauseKind::parse("SELECT DISTINCT ALL").is_err());
    }

    #[test]
    fn rejects_empty_keyword() {
        assert!(matches!(
            ClauseKind::parse(""),
            Err(QueryError::EmptyClauseKeyword)
        ));
        assert!(matches!(
            ClauseKind::parse("   "),
            Err(QueryError::EmptyClauseKeyword)
        ));
    }

    #[test]
    fn separators_follow_clause_kind() {
        assert_eq!(Keyword::Where.separator(), " AND ");
        assert_eq!(Keyword::Having.separator(), " AND ");
        assert_eq!(Keyword::Select.separator(), ", ");
        assert_eq!(Keyword::OrderBy.separator(), ", ");
    }

    #[test]
    fn only_select_takes_flags() {
        assert!(Keyword::Select.allows_flag(Flag::Distinct));
        assert!(Keyword::Select.allows_flag(Flag::All));
        assert!(!Keyword::From.allows_flag(Flag::Distinct));
        assert!(!Keyword::Where.allows_flag(Flag::All));
    }
}
