//! Render context shared by terms, criteria and clause writers.

use crate::dialect::Dialect;
use crate::ident::{Ident, write_quoted};
use crate::options::RenderOptions;

/// Operator binding strength, lowest first.
///
/// A child node is parenthesized when its precedence is strictly lower than
/// the precedence its parent renders it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Top of a clause: nothing is parenthesized.
    Lowest,
    Or,
    And,
    Not,
    Comparison,
    Additive,
    Multiplicative,
    Unary,
    /// Literals, fields, function calls.
    Atom,
}

impl Precedence {
    /// The next tighter level.
    ///
    /// Used for the right operand of non-associative operators so that
    /// `a-(b-c)` keeps its parentheses.
    pub fn tighter(self) -> Self {
        match self {
            Precedence::Lowest => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Not,
            Precedence::Not => Precedence::Comparison,
            Precedence::Comparison => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary | Precedence::Atom => Precedence::Atom,
        }
    }
}

/// How field references are qualified with their table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Bare field names (SET lists, INSERT columns, mutation predicates).
    Never,
    /// Qualify only fields whose table carries an alias.
    Aliased,
    /// Qualify every field; the query joins several tables.
    Always,
}

/// Everything a node needs to render itself.
///
/// The context is `Copy`; children receive adjusted copies via the
/// `nested`/`with_*` helpers.
#[derive(Clone, Copy)]
pub struct RenderCtx<'a> {
    pub dialect: &'a dyn Dialect,
    pub options: &'a RenderOptions,
    pub(crate) quote: Option<char>,
    pub(crate) parent: Precedence,
    pub(crate) with_alias: bool,
    pub(crate) namespace: Namespace,
}

impl<'a> RenderCtx<'a> {
    /// Create a top-level context.
    pub fn new(dialect: &'a dyn Dialect, options: &'a RenderOptions) -> Self {
        Self {
            dialect,
            options,
            quote: options.quote_char.or_else(|| dialect.quote_char()),
            parent: Precedence::Lowest,
            with_alias: false,
            namespace: Namespace::Aliased,
        }
    }

    /// Context for a child rendered under `parent`; aliases are never
    /// emitted below the top of a select item.
    pub fn nested(self, parent: Precedence) -> Self {
        Self {
            parent,
            with_alias: false,
            ..self
        }
    }

    /// Context for a clause item (select item, order entry, value).
    pub fn item(self, with_alias: bool) -> Self {
        Self {
            parent: Precedence::Lowest,
            with_alias,
            ..self
        }
    }

    pub fn with_namespace(self, namespace: Namespace) -> Self {
        Self { namespace, ..self }
    }

    pub fn quote_char(&self) -> Option<char> {
        self.quote
    }

    /// Effective ORDER BY alias policy.
    pub fn orderby_alias(&self) -> bool {
        self.options
            .orderby_alias
            .unwrap_or_else(|| self.dialect.orderby_alias())
    }

    /// Effective GROUP BY alias policy.
    pub fn groupby_alias(&self) -> bool {
        self.options
            .groupby_alias
            .unwrap_or_else(|| self.dialect.groupby_alias())
    }

    pub fn write_name(&self, out: &mut String, name: &str) {
        write_quoted(out, name, self.quote);
    }

    pub fn write_ident(&self, out: &mut String, ident: &Ident) {
        ident.write_sql(out, self.quote);
    }
}

impl std::fmt::Debug for RenderCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCtx")
            .field("dialect", &self.dialect.name())
            .field("quote", &self.quote)
            .field("parent", &self.parent)
            .field("with_alias", &self.with_alias)
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Write items separated by a bare comma, the canonical list joiner.
pub(crate) fn write_list<T, F>(out: &mut String, items: &[T], mut write: F) -> crate::SqlResult<()>
where
    F: FnMut(&T, &mut String) -> crate::SqlResult<()>,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write(item, out)?;
    }
    Ok(())
}
