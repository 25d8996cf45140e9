//! SELECT query builder.

use crate::criterion::Criterion;
use crate::dialect::{Dialect, Feature};
use crate::error::{SqlError, SqlResult};
use crate::qb::clause::{Join, JoinType, LimitBy, Order, OrderBy, Sample};
use crate::qb::delete::DeleteQb;
use crate::qb::traits::SqlQb;
use crate::qb::{QueryKind, require};
use crate::render::RenderCtx;
use crate::term::{Table, Term};
use std::sync::Arc;

/// SELECT query builder.
#[derive(Clone, Debug)]
pub struct SelectQb {
    pub(crate) dialect: Arc<dyn Dialect>,
    /// FROM table (absent for `SELECT 1+1`)
    pub(crate) from: Option<Table>,
    /// Select list; empty renders `*`
    pub(crate) selects: Vec<Term>,
    pub(crate) distinct: bool,
    pub(crate) joins: Vec<Join>,
    pub(crate) wheres: Option<Criterion>,
    pub(crate) groupbys: Vec<Term>,
    pub(crate) havings: Option<Criterion>,
    pub(crate) orderbys: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) sample: Option<Sample>,
    pub(crate) is_final: bool,
    pub(crate) limit_by: Option<LimitBy>,
}

impl SelectQb {
    pub(crate) fn new(dialect: Arc<dyn Dialect>, from: Option<Table>) -> Self {
        Self {
            dialect,
            from,
            selects: Vec::new(),
            distinct: false,
            joins: Vec::new(),
            wheres: None,
            groupbys: Vec::new(),
            havings: None,
            orderbys: Vec::new(),
            limit: None,
            offset: None,
            sample: None,
            is_final: false,
            limit_by: None,
        }
    }

    // ==================== SELECT list ====================

    /// Append terms to the select list.
    pub fn select<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.selects.extend(terms.into_iter().map(Into::into));
        self
    }

    /// `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    // ==================== JOIN ====================

    /// Add a join of any kind.
    ///
    /// CROSS JOIN must not carry a condition; every other kind needs one.
    pub fn join(
        mut self,
        table: impl Into<Table>,
        kind: JoinType,
        on: Option<Criterion>,
    ) -> SqlResult<Self> {
        match (kind, &on) {
            (JoinType::Cross, Some(_)) => {
                return Err(SqlError::illegal(
                    QueryKind::Select,
                    "CROSS JOIN does not take an ON condition",
                ));
            }
            (JoinType::Cross, None) | (_, Some(_)) => {}
            (_, None) => {
                return Err(SqlError::illegal(
                    QueryKind::Select,
                    format!("{} requires an ON condition", kind.keyword()),
                ));
            }
        }
        self.joins.push(Join {
            table: table.into(),
            kind,
            on,
        });
        Ok(self)
    }

    fn push_join(mut self, table: Table, kind: JoinType, on: Option<Criterion>) -> Self {
        self.joins.push(Join { table, kind, on });
        self
    }

    /// Add `JOIN table ON criterion`.
    pub fn inner_join(self, table: impl Into<Table>, on: Criterion) -> Self {
        self.push_join(table.into(), JoinType::Inner, Some(on))
    }

    /// Add `LEFT JOIN table ON criterion`.
    pub fn left_join(self, table: impl Into<Table>, on: Criterion) -> Self {
        self.push_join(table.into(), JoinType::Left, Some(on))
    }

    /// Add `RIGHT JOIN table ON criterion`.
    pub fn right_join(self, table: impl Into<Table>, on: Criterion) -> Self {
        self.push_join(table.into(), JoinType::Right, Some(on))
    }

    /// Add `FULL OUTER JOIN table ON criterion`.
    pub fn full_join(self, table: impl Into<Table>, on: Criterion) -> Self {
        self.push_join(table.into(), JoinType::Full, Some(on))
    }

    /// Add `CROSS JOIN table`.
    pub fn cross_join(self, table: impl Into<Table>) -> Self {
        self.push_join(table.into(), JoinType::Cross, None)
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// AND a criterion onto the WHERE clause.
    pub fn where_(mut self, criterion: Criterion) -> Self {
        self.wheres = Some(match self.wheres.take() {
            Some(existing) => existing.and(criterion),
            None => criterion,
        });
        self
    }

    /// AND a criterion onto the WHERE clause if present (None => skip).
    pub fn where_opt(self, criterion: Option<Criterion>) -> Self {
        match criterion {
            Some(c) => self.where_(c),
            None => self,
        }
    }

    /// Append GROUP BY terms.
    pub fn group_by<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.groupbys.extend(terms.into_iter().map(Into::into));
        self
    }

    /// AND a criterion onto the HAVING clause.
    pub fn having(mut self, criterion: Criterion) -> Self {
        self.havings = Some(match self.havings.take() {
            Some(existing) => existing.and(criterion),
            None => criterion,
        });
        self
    }

    // ==================== ORDER BY ====================

    /// Append an ORDER BY entry with no direction.
    pub fn order_by(mut self, term: impl Into<Term>) -> Self {
        self.orderbys.push(OrderBy::new(term));
        self
    }

    /// Append `term ASC`.
    pub fn order_by_asc(mut self, term: impl Into<Term>) -> Self {
        self.orderbys.push(OrderBy::new(term).order(Order::Asc));
        self
    }

    /// Append `term DESC`.
    pub fn order_by_desc(mut self, term: impl Into<Term>) -> Self {
        self.orderbys.push(OrderBy::new(term).order(Order::Desc));
        self
    }

    /// Append a prepared entry; fails if it carries `WITH FILL` and the
    /// dialect has no fill syntax.
    pub fn order_by_entry(mut self, entry: impl Into<OrderBy>) -> SqlResult<Self> {
        let entry = entry.into();
        if entry.fill.is_some() {
            require(self.dialect.as_ref(), Feature::WithFill)?;
        }
        self.orderbys.push(entry);
        Ok(self)
    }

    // ==================== Pagination ====================

    /// Set LIMIT (last call wins).
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET (last call wins).
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1).saturating_mul(size));
        self
    }

    // ==================== Dialect-only clauses ====================

    /// `SAMPLE n [OFFSET m]`.
    pub fn sample(mut self, sample: impl Into<Sample>) -> SqlResult<Self> {
        require(self.dialect.as_ref(), Feature::Sample)?;
        self.require_from("SAMPLE")?;
        let sample = sample.into();
        let numeric = sample.size.is_numeric()
            && sample.offset.as_ref().is_none_or(|offset| offset.is_numeric());
        if !numeric {
            return Err(SqlError::validation(
                "SAMPLE size and offset must be numeric",
            ));
        }
        self.sample = Some(sample);
        Ok(self)
    }

    /// `FROM table FINAL`.
    pub fn final_(mut self) -> SqlResult<Self> {
        require(self.dialect.as_ref(), Feature::Final)?;
        self.require_from("FINAL")?;
        self.is_final = true;
        Ok(self)
    }

    /// `LIMIT n BY terms`.
    pub fn limit_by<I, T>(self, n: u64, by: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.set_limit_by(n, None, by)
    }

    /// `LIMIT n OFFSET m BY terms`.
    pub fn limit_offset_by<I, T>(self, n: u64, offset: u64, by: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.set_limit_by(n, Some(offset), by)
    }

    fn set_limit_by<I, T>(mut self, n: u64, offset: Option<u64>, by: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        require(self.dialect.as_ref(), Feature::LimitBy)?;
        let by: Vec<Term> = by.into_iter().map(Into::into).collect();
        if by.is_empty() {
            return Err(SqlError::illegal(
                QueryKind::Select,
                "LIMIT BY requires at least one expression",
            ));
        }
        self.limit_by = Some(LimitBy { n, offset, by });
        Ok(self)
    }

    fn require_from(&self, clause: &str) -> SqlResult<()> {
        if self.from.is_none() {
            return Err(SqlError::illegal(
                QueryKind::Select,
                format!("{clause} requires a FROM table"),
            ));
        }
        Ok(())
    }

    // ==================== Transitions ====================

    /// Turn `FROM table [WHERE ...]` into a DELETE statement.
    ///
    /// Only the table and WHERE clause carry over; any other SELECT state is
    /// an error.
    pub fn delete(self) -> SqlResult<DeleteQb> {
        let Some(table) = self.from else {
            return Err(SqlError::illegal(
                QueryKind::Delete,
                "DELETE requires a FROM table",
            ));
        };
        let conflicting = [
            (!self.selects.is_empty(), "select list"),
            (self.distinct, "DISTINCT"),
            (!self.joins.is_empty(), "JOIN"),
            (!self.groupbys.is_empty(), "GROUP BY"),
            (self.havings.is_some(), "HAVING"),
            (!self.orderbys.is_empty(), "ORDER BY"),
            (self.limit.is_some(), "LIMIT"),
            (self.offset.is_some(), "OFFSET"),
            (self.sample.is_some(), "SAMPLE"),
            (self.is_final, "FINAL"),
            (self.limit_by.is_some(), "LIMIT BY"),
        ];
        if let Some((_, clause)) = conflicting.iter().find(|(set, _)| *set) {
            return Err(SqlError::illegal(
                QueryKind::Delete,
                format!("{clause} cannot be combined with DELETE"),
            ));
        }
        let mut qb = DeleteQb::new(self.dialect, table);
        qb.wheres = self.wheres;
        Ok(qb)
    }

    // ==================== Accessors ====================

    pub fn from_table(&self) -> Option<&Table> {
        self.from.as_ref()
    }

    pub fn selects(&self) -> &[Term] {
        &self.selects
    }

    pub fn wheres(&self) -> Option<&Criterion> {
        self.wheres.as_ref()
    }

    pub fn orderbys(&self) -> &[OrderBy] {
        &self.orderbys
    }
}

impl SqlQb for SelectQb {
    fn kind(&self) -> QueryKind {
        QueryKind::Select
    }

    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        ctx.dialect.write_select(ctx, self, out)
    }
}
