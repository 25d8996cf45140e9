//! UPDATE query builder.

use crate::criterion::Criterion;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::qb::QueryKind;
use crate::qb::traits::SqlQb;
use crate::render::RenderCtx;
use crate::term::{Field, Table, Term};
use std::sync::Arc;

/// UPDATE query builder.
///
/// Rendering fails with [`crate::SqlError::Incomplete`] if no assignment was
/// added.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    pub(crate) dialect: Arc<dyn Dialect>,
    pub(crate) table: Table,
    /// SET assignments, in call order
    pub(crate) sets: Vec<(Field, Term)>,
    pub(crate) wheres: Option<Criterion>,
}

impl UpdateQb {
    pub(crate) fn new(dialect: Arc<dyn Dialect>, table: Table) -> Self {
        Self {
            dialect,
            table,
            sets: Vec::new(),
            wheres: None,
        }
    }

    /// Add `field = value`.
    pub fn set(mut self, field: impl Into<Field>, value: impl Into<Term>) -> Self {
        self.sets.push((field.into(), value.into()));
        self
    }

    /// Add `field = value` if present (None => skip).
    pub fn set_opt<V: Into<Term>>(self, field: impl Into<Field>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// AND a criterion onto the WHERE clause.
    pub fn where_(mut self, criterion: Criterion) -> Self {
        self.wheres = Some(match self.wheres.take() {
            Some(existing) => existing.and(criterion),
            None => criterion,
        });
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn assignments(&self) -> &[(Field, Term)] {
        &self.sets
    }
}

impl SqlQb for UpdateQb {
    fn kind(&self) -> QueryKind {
        QueryKind::Update
    }

    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        ctx.dialect.write_update(ctx, self, out)
    }
}
