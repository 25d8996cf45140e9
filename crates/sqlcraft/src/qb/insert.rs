//! INSERT query builder.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::qb::QueryKind;
use crate::qb::traits::SqlQb;
use crate::render::RenderCtx;
use crate::term::{Field, Table, Term};
use std::sync::Arc;

/// INSERT query builder.
///
/// ```ignore
/// let sql = Query::ansi()
///     .insert_into("abc")
///     .columns(["foo", "bar"])
///     .insert([Term::from(1), Term::from("x")])?
///     .to_sql()?;
/// // INSERT INTO "abc" ("foo","bar") VALUES (1,'x')
/// ```
#[derive(Clone, Debug)]
pub struct InsertQb {
    pub(crate) dialect: Arc<dyn Dialect>,
    pub(crate) table: Table,
    pub(crate) columns: Vec<Field>,
    pub(crate) rows: Vec<Vec<Term>>,
}

impl InsertQb {
    pub(crate) fn new(dialect: Arc<dyn Dialect>, table: Table) -> Self {
        Self {
            dialect,
            table,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append target columns.
    pub fn columns<I, F>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one VALUES row.
    ///
    /// The row must match the column count (or, without columns, the width
    /// of the first row).
    pub fn insert<I, T>(mut self, row: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let row: Vec<Term> = row.into_iter().map(Into::into).collect();
        if row.is_empty() {
            return Err(SqlError::illegal(QueryKind::Insert, "VALUES row is empty"));
        }
        let expected = if self.columns.is_empty() {
            self.rows.first().map(Vec::len)
        } else {
            Some(self.columns.len())
        };
        if let Some(expected) = expected.filter(|n| *n != row.len()) {
            return Err(SqlError::validation(format!(
                "INSERT row has {} values, expected {expected}",
                row.len()
            )));
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Append several VALUES rows.
    pub fn insert_rows<R, I, T>(self, rows: R) -> SqlResult<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        rows.into_iter().try_fold(self, |qb, row| qb.insert(row))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl SqlQb for InsertQb {
    fn kind(&self) -> QueryKind {
        QueryKind::Insert
    }

    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        ctx.dialect.write_insert(ctx, self, out)
    }
}
