//! DELETE query builder.

use crate::criterion::Criterion;
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::qb::QueryKind;
use crate::qb::traits::SqlQb;
use crate::render::RenderCtx;
use crate::term::Table;
use std::sync::Arc;

/// DELETE query builder.
///
/// Created by [`crate::Query::delete_from`] or by
/// [`crate::SelectQb::delete`] on a `FROM table [WHERE ...]` query.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    pub(crate) dialect: Arc<dyn Dialect>,
    pub(crate) table: Table,
    pub(crate) wheres: Option<Criterion>,
}

impl DeleteQb {
    pub(crate) fn new(dialect: Arc<dyn Dialect>, table: Table) -> Self {
        Self {
            dialect,
            table,
            wheres: None,
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
}

impl SqlQb for DeleteQb {
    fn kind(&self) -> QueryKind {
        QueryKind::Delete
    }

    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        ctx.dialect.write_delete(ctx, self, out)
    }
}
