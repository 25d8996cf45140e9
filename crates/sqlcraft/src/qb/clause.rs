//! Clause value types shared by the builders: ordering, joins, sampling.

use crate::criterion::Criterion;
use crate::term::{Table, Term};
use crate::value::Value;

// ==================== ORDER BY ====================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// `WITH FILL [FROM a] [TO b] [STEP s]` modifier of an ORDER BY entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithFill {
    pub(crate) from: Option<Term>,
    pub(crate) to: Option<Term>,
    pub(crate) step: Option<Term>,
}

impl WithFill {
    /// Bare `WITH FILL`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, value: impl Into<Term>) -> Self {
        self.from = Some(value.into());
        self
    }

    pub fn to(mut self, value: impl Into<Term>) -> Self {
        self.to = Some(value.into());
        self
    }

    pub fn step(mut self, value: impl Into<Term>) -> Self {
        self.step = Some(value.into());
        self
    }

    pub fn from_bound(&self) -> Option<&Term> {
        self.from.as_ref()
    }

    pub fn to_bound(&self) -> Option<&Term> {
        self.to.as_ref()
    }

    pub fn step_size(&self) -> Option<&Term> {
        self.step.as_ref()
    }
}

/// One ORDER BY entry.
///
/// ```ignore
/// let entry = OrderBy::new(t.field("day")).asc().with_fill(WithFill::new().step(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub(crate) term: Term,
    pub(crate) order: Option<Order>,
    pub(crate) fill: Option<WithFill>,
}

impl OrderBy {
    /// Entry with no explicit direction.
    pub fn new(term: impl Into<Term>) -> Self {
        Self {
            term: term.into(),
            order: None,
            fill: None,
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn asc(self) -> Self {
        self.order(Order::Asc)
    }

    pub fn desc(self) -> Self {
        self.order(Order::Desc)
    }

    /// Attach a fill modifier (rejected by dialects without WITH FILL).
    pub fn with_fill(mut self, fill: WithFill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn direction(&self) -> Option<Order> {
        self.order
    }

    pub fn fill(&self) -> Option<&WithFill> {
        self.fill.as_ref()
    }
}

impl From<Term> for OrderBy {
    fn from(term: Term) -> Self {
        OrderBy::new(term)
    }
}

impl From<&Term> for OrderBy {
    fn from(term: &Term) -> Self {
        OrderBy::new(term.clone())
    }
}

// ==================== JOIN ====================

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// A joined table with its ON condition (absent only for CROSS JOIN).
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub(crate) table: Table,
    pub(crate) kind: JoinType,
    pub(crate) on: Option<Criterion>,
}

impl Join {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn kind(&self) -> JoinType {
        self.kind
    }

    pub fn on(&self) -> Option<&Criterion> {
        self.on.as_ref()
    }
}

// ==================== SAMPLE ====================

/// `SAMPLE n [OFFSET m]`; `n` may be a row count or a ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(crate) size: Value,
    pub(crate) offset: Option<Value>,
}

impl Sample {
    pub fn new(size: impl Into<Value>) -> Self {
        Self {
            size: size.into(),
            offset: None,
        }
    }

    pub fn offset(mut self, offset: impl Into<Value>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn size(&self) -> &Value {
        &self.size
    }

    pub fn offset_value(&self) -> Option<&Value> {
        self.offset.as_ref()
    }
}

macro_rules! impl_sample_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Sample {
                fn from(size: $t) -> Self {
                    Sample::new(size)
                }
            }
        )*
    };
}

impl_sample_from!(i32, i64, u32, u64, usize, f64);

// ==================== LIMIT BY ====================

/// `LIMIT n [OFFSET m] BY expr,...`
#[derive(Debug, Clone, PartialEq)]
pub struct LimitBy {
    pub(crate) n: u64,
    pub(crate) offset: Option<u64>,
    pub(crate) by: Vec<Term>,
}

impl LimitBy {
    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn by(&self) -> &[Term] {
        &self.by
    }
}
