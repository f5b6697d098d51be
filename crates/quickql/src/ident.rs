//! Safe SQL identifier handling for CTE names.
//!
//! CTE names are the one place this crate puts caller-supplied text into a
//! structural position (`<name> AS (...)`), so they are validated instead
//! of passed through as opaque fragments:
//!
//! - Unquoted names are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted names allow any characters except NUL and escape `"` as `""`
//!
//! # Example
//! ```
//! use quickql::Ident;
//!
//! let plain = Ident::parse("active_users")?;
//! let quoted = Ident::parse(r#""Monthly Sales""#)?;
//! # Ok::<(), quickql::QueryError>(())
//! ```

use crate::error::{QueryError, QueryResult};

/// A validated SQL identifier (a CTE name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident {
    /// Unquoted identifier: must match `[A-Za-z_][A-Za-z0-9_$]*`.
    Unquoted(String),
    /// Quoted identifier: allows any characters except NUL.
    Quoted(String),
}

impl Ident {
    /// Parse an identifier string, accepting quoted and unquoted forms.
    pub fn parse(s: &str) -> QueryResult<Self> {
        if s.is_empty() {
            return Err(QueryError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(QueryError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut chars = s.chars().peekable();

        // Quoted identifier.
        if chars.peek() == Some(&'"') {
            chars.next(); // opening quote
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('"') => {
                        // Escaped quote: ""
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            name.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(c) => name.push(c),
                    None => return Err(QueryError::validation("Unclosed quoted identifier")),
                }
            }
            if chars.next().is_some() {
                return Err(QueryError::validation(
                    "Trailing characters after quoted identifier",
                ));
            }
            if name.is_empty() {
                return Err(QueryError::validation("Empty quoted identifier"));
            }
            return Ok(Self::Quoted(name));
        }

        // Unquoted identifier.
        for (i, c) in s.char_indices() {
            let valid = if i == 0 {
                c == '_' || c.is_ascii_alphabetic()
            } else {
                c == '_' || c == '$' || c.is_ascii_alphanumeric()
            };
            if !valid {
                return Err(QueryError::validation(format!(
                    "Invalid character in identifier: '{c}'"
                )));
            }
        }
        Ok(Self::Unquoted(s.to_string()))
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self {
            Self::Unquoted(s) => out.push_str(s),
            Self::Quoted(s) => {
                out.push('"');
                for ch in s.chars() {
                    if ch == '"' {
                        out.push('"');
                        out.push('"');
                    } else {
                        out.push(ch);
                    }
                }
                out.push('"');
            }
        }
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in builder APIs.
pub trait IntoIdent {
    fn into_ident(self) -> QueryResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> QueryResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> QueryResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> QueryResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> QueryResult<Ident> {
        Ident::parse(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("users").unwrap();
        assert_eq!(ident.to_sql(), "users");
    }

    #[test]
    fn ident_with_dollar() {
        let ident = Ident::parse("my_cte$1").unwrap();
        assert_eq!(ident.to_sql(), "my_cte$1");
    }

    #[test]
    fn ident_quoted() {
        let ident = Ident::parse(r#""CamelCase""#).unwrap();
        assert_eq!(ident.to_sql(), r#""CamelCase""#);
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn ident_quoted_with_space() {
        let ident = Ident::parse(r#""monthly sales""#).unwrap();
        assert_eq!(ident.to_sql(), r#""monthly sales""#);
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Ident::parse("").is_err());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Ident::parse("1cte").is_err());
    }

    #[test]
    fn ident_rejects_space() {
        assert!(Ident::parse("my cte").is_err());
    }

    #[test]
    fn ident_rejects_injection() {
        assert!(Ident::parse("users; drop table users; --").is_err());
    }

    #[test]
    fn ident_rejects_unclosed_quote() {
        assert!(Ident::parse(r#""unclosed"#).is_err());
    }

    #[test]
    fn ident_rejects_trailing_after_quote() {
        assert!(Ident::parse(r#""name"x"#).is_err());
    }
}
