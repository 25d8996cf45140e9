//! Boolean criteria: comparisons, logical combinations and predicates.
//!
//! Criteria compose with `&`, `|` and `!`, or with [`Criterion::and`] /
//! [`Criterion::or`]. Combining with the same operator flattens, so
//! `a & b & c` is a single three-operand AND.
//!
//! # Degenerate forms
//! - an empty AND renders as `1=1`, an empty OR as `1=0`
//! - `x IN ()` renders as `1=0`, `x NOT IN ()` as `1=1`

use crate::error::SqlResult;
use crate::render::{Precedence, RenderCtx, write_list};
use crate::term::Term;
use std::ops::{BitAnd, BitOr, Not};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
        }
    }
}

/// N-ary logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    fn separator(self) -> &'static str {
        match self {
            LogicOp::And => " AND ",
            LogicOp::Or => " OR ",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            LogicOp::And => Precedence::And,
            LogicOp::Or => Precedence::Or,
        }
    }

    /// Rendering of the operator with no operands (its identity element).
    fn identity(self) -> &'static str {
        match self {
            LogicOp::And => "1=1",
            LogicOp::Or => "1=0",
        }
    }
}

/// Pattern-match operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeOp {
    Like,
    /// Case-insensitive LIKE.
    ILike,
}

impl LikeOp {
    fn keyword(self, negated: bool) -> &'static str {
        match (self, negated) {
            (LikeOp::Like, false) => " LIKE ",
            (LikeOp::Like, true) => " NOT LIKE ",
            (LikeOp::ILike, false) => " ILIKE ",
            (LikeOp::ILike, true) => " NOT ILIKE ",
        }
    }
}

/// A boolean-valued expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Comparison {
        op: CmpOp,
        left: Term,
        right: Term,
    },
    Logical {
        op: LogicOp,
        operands: Vec<Criterion>,
    },
    Not(Box<Criterion>),
    Between {
        term: Term,
        low: Term,
        high: Term,
        negated: bool,
    },
    In {
        term: Term,
        values: Vec<Term>,
        negated: bool,
    },
    IsNull {
        term: Term,
        negated: bool,
    },
    Like {
        term: Term,
        pattern: Term,
        op: LikeOp,
        negated: bool,
    },
}

impl Criterion {
    /// `left <op> right`
    pub fn compare(op: CmpOp, left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Criterion::Comparison {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    pub(crate) fn like(op: LikeOp, term: Term, pattern: impl Into<Term>, negated: bool) -> Self {
        Criterion::Like {
            term,
            pattern: pattern.into(),
            op,
            negated,
        }
    }

    /// AND of all criteria; empty input renders as `1=1`.
    pub fn all<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        criteria
            .into_iter()
            .fold(Criterion::empty(LogicOp::And), Criterion::and)
    }

    /// OR of all criteria; empty input renders as `1=0`.
    pub fn any<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        criteria
            .into_iter()
            .fold(Criterion::empty(LogicOp::Or), Criterion::or)
    }

    fn empty(op: LogicOp) -> Self {
        Criterion::Logical {
            op,
            operands: Vec::new(),
        }
    }

    /// `self AND other`, flattening nested ANDs.
    pub fn and(self, other: Criterion) -> Self {
        self.combine(LogicOp::And, other)
    }

    /// `self OR other`, flattening nested ORs.
    pub fn or(self, other: Criterion) -> Self {
        self.combine(LogicOp::Or, other)
    }

    /// `NOT self`
    pub fn negate(self) -> Self {
        Criterion::Not(Box::new(self))
    }

    fn combine(self, op: LogicOp, other: Criterion) -> Self {
        let mut operands = self.into_operands(op);
        operands.extend(other.into_operands(op));
        Criterion::Logical { op, operands }
    }

    fn into_operands(self, op: LogicOp) -> Vec<Criterion> {
        match self {
            Criterion::Logical { op: inner, operands } if inner == op => operands,
            other => vec![other],
        }
    }

    /// Use the criterion as an aliased select item.
    pub fn as_(self, alias: impl Into<String>) -> Term {
        Term::from(self).as_(alias)
    }

    /// Binding strength of the top-level operator.
    pub fn precedence(&self) -> Precedence {
        match self {
            Criterion::Logical { operands, .. } if operands.is_empty() => Precedence::Comparison,
            Criterion::Logical { operands, .. } if operands.len() == 1 => operands[0].precedence(),
            Criterion::Logical { op, .. } => op.precedence(),
            Criterion::Not(_) => Precedence::Not,
            _ => Precedence::Comparison,
        }
    }

    /// Render the criterion, parenthesizing it if it binds looser than `ctx`'s parent.
    pub fn render(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
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

    pub(crate) fn render_bare(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        match self {
            Criterion::Comparison { op, left, right } => {
                let operand = ctx.nested(Precedence::Comparison.tighter());
                left.render(operand, out)?;
                out.push_str(op.symbol());
                right.render(operand, out)
            }
            Criterion::Logical { op, operands } => match operands.as_slice() {
                [] => {
                    out.push_str(op.identity());
                    Ok(())
                }
                [only] => only.render_bare(ctx, out),
                _ => {
                    let child = ctx.nested(op.precedence());
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            out.push_str(op.separator());
                        }
                        operand.render(child, out)?;
                    }
                    Ok(())
                }
            },
            Criterion::Not(inner) => {
                out.push_str("NOT ");
                inner.render(ctx.nested(Precedence::Not), out)
            }
            Criterion::Between {
                term,
                low,
                high,
                negated,
            } => {
                let operand = ctx.nested(Precedence::Comparison.tighter());
                term.render(operand, out)?;
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.render(operand, out)?;
                out.push_str(" AND ");
                high.render(operand, out)
            }
            Criterion::In {
                term,
                values,
                negated,
            } => {
                if values.is_empty() {
                    out.push_str(if *negated { "1=1" } else { "1=0" });
                    return Ok(());
                }
                term.render(ctx.nested(Precedence::Comparison.tighter()), out)?;
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                let item = ctx.nested(Precedence::Lowest);
                write_list(out, values, |value, out| value.render(item, out))?;
                out.push(')');
                Ok(())
            }
            Criterion::IsNull { term, negated } => {
                term.render(ctx.nested(Precedence::Comparison.tighter()), out)?;
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Criterion::Like {
                term,
                pattern,
                op,
                negated,
            } => {
                let operand = ctx.nested(Precedence::Comparison.tighter());
                term.render(operand, out)?;
                out.push_str(op.keyword(*negated));
                pattern.render(operand, out)
            }
        }
    }
}

impl BitAnd for Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: Criterion) -> Criterion {
        self.and(rhs)
    }
}

impl BitOr for Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: Criterion) -> Criterion {
        self.or(rhs)
    }
}

impl Not for Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        self.negate()
    }
}
