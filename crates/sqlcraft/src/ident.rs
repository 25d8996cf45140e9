//! SQL identifier handling.
//!
//! [`Ident`] is a possibly-qualified name (`schema.table`, `db.dictionary`).
//! Every part is quoted at render time with the active dialect's quote
//! character; the quote character itself is escaped by doubling.
//!
//! [`Ident::parse`] accepts dotted names where each part is either bare
//! (`[A-Za-z_][A-Za-z0-9_$]*`) or already double-quoted (`"Odd Name"`).
//!
//! # Example
//! ```ignore
//! use sqlcraft::Ident;
//!
//! let ident = Ident::parse("schema1.abc")?;
//! assert_eq!(ident.to_sql(Some('"')), r#""schema1"."abc""#);
//! # Ok::<(), sqlcraft::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};

/// A SQL identifier made of one or more dot-separated parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    parts: Vec<String>,
}

impl Ident {
    /// Create a single-part identifier without validation.
    ///
    /// The name is always quoted when rendered, so any characters are allowed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parts: vec![name.into()],
        }
    }

    /// Create a qualified identifier from its parts (outermost first).
    pub fn qualified<I, S>(parts: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.is_empty() {
            return Err(SqlError::validation("Identifier cannot be empty"));
        }
        if let Some(part) = parts.iter().find(|p| p.is_empty() || p.contains('\0')) {
            return Err(SqlError::validation(format!(
                "Invalid identifier part: {part:?}"
            )));
        }
        Ok(Self { parts })
    }

    /// Parse a dotted identifier such as `schema1.abc` or `db."Odd Name"`.
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.contains('\0') {
            return Err(SqlError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut rest = s;
        loop {
            let (part, tail) = split_part(rest)?;
            parts.push(part);
            match tail.strip_prefix('.') {
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => {
                    return Err(SqlError::validation(format!(
                        "Unexpected text after identifier part: {tail:?}"
                    )));
                }
            }
        }
        Ok(Self { parts })
    }

    /// The identifier parts, outermost first.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The innermost (unqualified) name.
    pub fn name(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }

    /// Render the identifier with the given quote character.
    pub fn to_sql(&self, quote: Option<char>) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, quote);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, quote: Option<char>) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            write_quoted(out, part, quote);
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::new(name)
    }
}

/// Take one identifier part off the front of `s`, returning it and the rest.
fn split_part(s: &str) -> SqlResult<(String, &str)> {
    if let Some(quoted) = s.strip_prefix('"') {
        let mut name = String::new();
        let mut chars = quoted.char_indices();
        while let Some((i, c)) = chars.next() {
            if c != '"' {
                name.push(c);
                continue;
            }
            if quoted[i + 1..].starts_with('"') {
                chars.next();
                name.push('"');
                continue;
            }
            if name.is_empty() {
                return Err(SqlError::validation("Empty quoted identifier"));
            }
            return Ok((name, &quoted[i + 1..]));
        }
        return Err(SqlError::validation("Unclosed quoted identifier"));
    }

    let end = s.find('.').unwrap_or(s.len());
    let (name, tail) = s.split_at(end);
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(SqlError::validation("Empty identifier part")),
        Some(first) if !(first == '_' || first.is_ascii_alphabetic()) => {
            return Err(SqlError::validation(format!(
                "Identifier must start with a letter or '_': {name:?}"
            )));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
        return Err(SqlError::validation(format!(
            "Invalid character {bad:?} in identifier {name:?}"
        )));
    }
    Ok((name.to_string(), tail))
}

/// Write a single name wrapped in `quote`, doubling embedded quote characters.
pub(crate) fn write_quoted(out: &mut String, name: &str, quote: Option<char>) {
    let Some(q) = quote else {
        out.push_str(name);
        return;
    };
    out.push(q);
    for ch in name.chars() {
        if ch == q {
            out.push(q);
        }
        out.push(ch);
    }
    out.push(q);
}
