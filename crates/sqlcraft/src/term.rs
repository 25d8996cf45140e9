//! Expression terms: literals, fields, tables, function calls and arithmetic.
//!
//! A [`Term`] is an immutable tree. Combinators (`eq`, `+`, `as_`, ...)
//! consume their operands and return a new node, so partially built
//! expressions can be cloned and reused freely.
//!
//! # Example
//! ```ignore
//! use sqlcraft::{Table, functions};
//!
//! let t = Table::new("abc");
//! let total = functions::sum(t.field("price") * t.field("qty")).as_("total");
//! let recent = t.field("ts").gte(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! ```

use crate::criterion::{CmpOp, Criterion, LikeOp};
use crate::error::{SqlError, SqlResult};
use crate::ident::Ident;
use crate::qb::{Order, OrderBy};
use crate::render::{Namespace, Precedence, RenderCtx, write_list};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use uuid::Uuid;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            ArithOp::Add | ArithOp::Sub => Precedence::Additive,
            ArithOp::Mul | ArithOp::Div | ArithOp::Mod => Precedence::Multiplicative,
        }
    }

    /// `a op (b op c) == (a op b) op c`
    pub fn is_associative(self) -> bool {
        matches!(self, ArithOp::Add | ArithOp::Mul)
    }
}

/// A renderable SQL expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Literal(Value),
    Field(Field),
    /// `*`, or `"table".*` when qualified.
    Star(Option<Table>),
    Function(Function),
    Arithmetic {
        op: ArithOp,
        left: Box<Term>,
        right: Box<Term>,
    },
    /// Unary minus.
    Negative(Box<Term>),
    /// A boolean criterion used as a value (e.g. a computed flag column).
    Criterion(Box<Criterion>),
    /// Alias wrapper; the alias only renders at the top of a select item.
    Aliased { term: Box<Term>, alias: String },
}

impl Term {
    /// Create a literal term.
    pub fn literal(value: impl Into<Value>) -> Self {
        Term::Literal(value.into())
    }

    /// The `NULL` literal.
    pub fn null() -> Self {
        Term::Literal(Value::Null)
    }

    /// Unqualified `*`.
    pub fn star() -> Self {
        Term::Star(None)
    }

    /// A field that is not bound to a table.
    pub fn field(name: impl Into<String>) -> Self {
        Term::Field(Field::new(name))
    }

    /// Wrap this term with an alias, replacing any existing alias.
    pub fn as_(self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        match self {
            Term::Aliased { term, .. } => Term::Aliased { term, alias },
            term => Term::Aliased {
                term: Box::new(term),
                alias,
            },
        }
    }

    /// The alias of this term, if it was wrapped with [`Term::as_`].
    pub fn alias(&self) -> Option<&str> {
        match self {
            Term::Aliased { alias, .. } => Some(alias),
            _ => None,
        }
    }

    /// The term without its alias wrapper.
    pub fn unaliased(&self) -> &Term {
        match self {
            Term::Aliased { term, .. } => term,
            term => term,
        }
    }

    /// Binding strength of the top-level operator.
    pub fn precedence(&self) -> Precedence {
        match self {
            Term::Literal(Value::Int(n)) if *n < 0 => Precedence::Unary,
            Term::Literal(Value::Float(f)) if f.is_sign_negative() => Precedence::Unary,
            Term::Literal(_) | Term::Field(_) | Term::Star(_) | Term::Function(_) => {
                Precedence::Atom
            }
            Term::Arithmetic { op, .. } => op.precedence(),
            Term::Negative(_) => Precedence::Unary,
            Term::Criterion(c) => c.precedence(),
            Term::Aliased { term, .. } => term.precedence(),
        }
    }

    // ==================== Comparisons ====================

    /// `self = other`
    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Eq, self, other)
    }

    /// `self <> other`
    #[allow(clippy::should_implement_trait)]
    pub fn ne(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Ne, self, other)
    }

    /// `self > other`
    pub fn gt(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Gt, self, other)
    }

    /// `self >= other`
    pub fn gte(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Gte, self, other)
    }

    /// `self < other`
    pub fn lt(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Lt, self, other)
    }

    /// `self <= other`
    pub fn lte(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(CmpOp::Lte, self, other)
    }

    /// `self IN (values...)`
    pub fn isin<I, T>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Criterion::In {
            term: self,
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// `self NOT IN (values...)`
    pub fn notin<I, T>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Criterion::In {
            term: self,
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// `self BETWEEN low AND high`
    pub fn between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        Criterion::Between {
            term: self,
            low: low.into(),
            high: high.into(),
            negated: false,
        }
    }

    /// `self NOT BETWEEN low AND high`
    pub fn not_between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        Criterion::Between {
            term: self,
            low: low.into(),
            high: high.into(),
            negated: true,
        }
    }

    /// `self IS NULL`
    pub fn is_null(self) -> Criterion {
        Criterion::IsNull {
            term: self,
            negated: false,
        }
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(self) -> Criterion {
        Criterion::IsNull {
            term: self,
            negated: true,
        }
    }

    /// `self LIKE pattern`
    pub fn like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::like(LikeOp::Like, self, pattern, false)
    }

    /// `self NOT LIKE pattern`
    pub fn not_like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::like(LikeOp::Like, self, pattern, true)
    }

    /// `self ILIKE pattern` (case-insensitive)
    pub fn ilike(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::like(LikeOp::ILike, self, pattern, false)
    }

    // ==================== Ordering ====================

    /// ORDER BY entry `self ASC`.
    pub fn asc(self) -> OrderBy {
        OrderBy::new(self).order(Order::Asc)
    }

    /// ORDER BY entry `self DESC`.
    pub fn desc(self) -> OrderBy {
        OrderBy::new(self).order(Order::Desc)
    }

    // ==================== Rendering ====================

    /// Render the term, parenthesizing it if it binds looser than `ctx`'s parent.
    pub fn render(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        if let Term::Aliased { term, alias } = self {
            term.render(ctx.nested(ctx.parent), out)?;
            if ctx.with_alias {
                out.push_str(" AS ");
                ctx.write_name(out, alias);
            }
            return Ok(());
        }

        let parens = self.precedence() < ctx.parent;
        if parens {
            out.push('(');
        }
        self.render_bare(ctx, out)?;
        if parens {
            out.push(')');
        }
        Ok(())
    }

    fn render_bare(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        match self {
            Term::Literal(value) => value.write_sql(ctx.dialect, out),
            Term::Field(field) => field.render(ctx, out),
            Term::Star(table) => {
                if let Some(table) = table.as_ref().filter(|t| t.is_qualified_in(ctx.namespace)) {
                    ctx.write_name(out, table.namespace());
                    out.push('.');
                }
                out.push('*');
                Ok(())
            }
            Term::Function(func) => func.render(ctx, out),
            Term::Arithmetic { op, left, right } => {
                let prec = op.precedence();
                left.render(ctx.nested(prec), out)?;
                out.push_str(op.symbol());
                let right_prec = if op.is_associative() { prec } else { prec.tighter() };
                write_signed_operand(ctx.nested(right_prec), right, *op == ArithOp::Sub, out)
            }
            Term::Negative(inner) => {
                out.push('-');
                write_signed_operand(ctx.nested(Precedence::Unary), inner, true, out)
            }
            Term::Criterion(criterion) => criterion.render_bare(ctx, out),
            Term::Aliased { term, .. } => term.render_bare(ctx, out),
        }
    }
}

/// Render an operand that follows a `-`; a leading minus would otherwise form
/// a `--` comment, so such operands are parenthesized.
fn write_signed_operand(
    ctx: RenderCtx<'_>,
    term: &Term,
    after_minus: bool,
    out: &mut String,
) -> SqlResult<()> {
    if !after_minus {
        return term.render(ctx, out);
    }
    let mut buf = String::new();
    term.render(ctx, &mut buf)?;
    if buf.starts_with('-') {
        out.push('(');
        out.push_str(&buf);
        out.push(')');
    } else {
        out.push_str(&buf);
    }
    Ok(())
}

// ==================== Field ====================

/// A column reference, optionally bound to a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    table: Option<Table>,
}

impl Field {
    /// Create a field that is not bound to a table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    /// Create a field bound to `table`.
    pub fn of(table: &Table, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: Some(table.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub(crate) fn render(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        match &self.table {
            Some(table) if table.is_qualified_in(ctx.namespace) => {
                ctx.write_name(out, table.namespace());
                out.push('.');
            }
            None if ctx.namespace == Namespace::Always
                && ctx.dialect.requires_qualified_fields() =>
            {
                return Err(SqlError::UnqualifiedField(self.name.clone()));
            }
            _ => {}
        }
        ctx.write_name(out, &self.name);
        Ok(())
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}

impl From<&Field> for Field {
    fn from(field: &Field) -> Self {
        field.clone()
    }
}

impl TryFrom<Term> for Field {
    type Error = SqlError;

    fn try_from(term: Term) -> SqlResult<Self> {
        match term {
            Term::Field(field) => Ok(field),
            Term::Aliased { term, .. } => Field::try_from(*term),
            other => Err(SqlError::validation(format!(
                "expected a field reference, got {other:?}"
            ))),
        }
    }
}

// ==================== Table / Database ====================

/// A table reference with optional schema and alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: String,
    schema: Option<String>,
    alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
        }
    }

    /// Parse `table` or `schema.table` (parts may be double-quoted).
    pub fn parse(s: &str) -> SqlResult<Self> {
        let ident = Ident::parse(s)?;
        match ident.parts() {
            [name] => Ok(Table::new(name.clone())),
            [schema, name] => Ok(Table::new(name.clone()).in_schema(schema.clone())),
            _ => Err(SqlError::validation(format!(
                "table reference has too many parts: {s}"
            ))),
        }
    }

    /// Qualify the table with a schema (database in ClickHouse terms).
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Alias the table; its fields are then qualified with the alias.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// A field of this table.
    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::Field(Field::of(self, name))
    }

    /// `"table".*`
    pub fn star(&self) -> Term {
        Term::Star(Some(self.clone()))
    }

    /// The schema-qualified name, without alias.
    pub fn ident(&self) -> SqlResult<Ident> {
        match &self.schema {
            Some(schema) => Ident::qualified([schema.as_str(), self.name.as_str()]),
            None => Ident::qualified([self.name.as_str()]),
        }
    }

    /// The name fields are qualified with: the alias if set, else the table name.
    pub(crate) fn namespace(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn is_qualified_in(&self, namespace: Namespace) -> bool {
        match namespace {
            Namespace::Never => false,
            Namespace::Aliased => self.alias.is_some(),
            Namespace::Always => true,
        }
    }

    /// Write `"schema"."name"` and, if requested, ` AS "alias"`.
    ///
    /// Empty name parts are rejected rather than rendered as `""`.
    pub(crate) fn write_sql(
        &self,
        ctx: RenderCtx<'_>,
        out: &mut String,
        with_alias: bool,
    ) -> SqlResult<()> {
        ctx.write_ident(out, &self.ident()?);
        if with_alias {
            if let Some(alias) = &self.alias {
                out.push_str(" AS ");
                ctx.write_name(out, alias);
            }
        }
        Ok(())
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Table::new(name)
    }
}

impl From<&Table> for Table {
    fn from(table: &Table) -> Self {
        table.clone()
    }
}

/// A database reference (DDL target).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Database {
    name: String,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A table inside this database.
    pub fn table(&self, name: impl Into<String>) -> Table {
        Table::new(name).in_schema(self.name.clone())
    }
}

impl From<&str> for Database {
    fn from(name: &str) -> Self {
        Database::new(name)
    }
}

impl From<String> for Database {
    fn from(name: String) -> Self {
        Database::new(name)
    }
}

impl From<&Database> for Database {
    fn from(db: &Database) -> Self {
        db.clone()
    }
}

// ==================== Function ====================

/// A function call `NAME(arg1,arg2,...)`.
///
/// The name is emitted verbatim (ClickHouse function names are case-sensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    args: Vec<Term>,
}

impl Function {
    pub fn new<I, T>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Alias the call.
    pub fn as_(self, alias: impl Into<String>) -> Term {
        Term::from(self).as_(alias)
    }

    fn render(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        out.push_str(&self.name);
        out.push('(');
        let arg_ctx = ctx.nested(Precedence::Lowest);
        write_list(out, &self.args, |arg, out| arg.render(arg_ctx, out))?;
        out.push(')');
        Ok(())
    }
}

// ==================== Conversions ====================

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Literal(value)
    }
}

impl From<Field> for Term {
    fn from(field: Field) -> Self {
        Term::Field(field)
    }
}

impl From<Function> for Term {
    fn from(func: Function) -> Self {
        Term::Function(func)
    }
}

impl From<Criterion> for Term {
    fn from(criterion: Criterion) -> Self {
        Term::Criterion(Box::new(criterion))
    }
}

impl From<&Term> for Term {
    fn from(term: &Term) -> Self {
        term.clone()
    }
}

macro_rules! impl_term_from_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Term {
                fn from(v: $t) -> Self {
                    Term::Literal(Value::from(v))
                }
            }
        )*
    };
}

impl_term_from_literal!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    &str,
    String,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    Uuid,
    serde_json::Value,
);

#[cfg(feature = "rust_decimal")]
impl_term_from_literal!(rust_decimal::Decimal);

// ==================== Operators ====================

macro_rules! impl_arith_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Term>> $trait<T> for Term {
            type Output = Term;

            fn $method(self, rhs: T) -> Term {
                Term::Arithmetic {
                    op: $op,
                    left: Box::new(self),
                    right: Box::new(rhs.into()),
                }
            }
        }
    };
}

impl_arith_op!(Add, add, ArithOp::Add);
impl_arith_op!(Sub, sub, ArithOp::Sub);
impl_arith_op!(Mul, mul, ArithOp::Mul);
impl_arith_op!(Div, div, ArithOp::Div);
impl_arith_op!(Rem, rem, ArithOp::Mod);

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::Negative(Box::new(self))
    }
}
