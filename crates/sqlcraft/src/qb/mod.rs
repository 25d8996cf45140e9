//! Query builders.
//!
//! Every query starts from a [`Query`] factory bound to a dialect. Each
//! statement kind has its own builder type, so clauses that make no sense for
//! a kind (`set` on a SELECT, `order_by` on a DROP) simply do not exist.
//! Clauses that depend on the dialect are checked when they are added and
//! return [`SqlResult`].
//!
//! Builders are consuming (`self -> Self`) and cheap to clone; clone a
//! partially built query to branch it.
//!
//! # Usage
//!
//! ```ignore
//! use sqlcraft::{Query, SqlQb, Table};
//!
//! let t = Table::new("abc");
//! let q = Query::clickhouse();
//!
//! // SELECT
//! let sql = q.from_(&t)
//!     .select([t.field("foo")])
//!     .sample(10)?
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT "foo" FROM "abc" SAMPLE 10"#);
//!
//! // UPDATE
//! let sql = q.update(&t)
//!     .set("foo", "bar")
//!     .where_(t.field("foo").eq(0))
//!     .to_sql()?;
//! assert_eq!(sql, r#"ALTER TABLE "abc" UPDATE "foo"='bar' WHERE "foo"=0"#);
//!
//! // DROP
//! let sql = q.drop_table(&t)?.if_exists()?.on_cluster("mycluster")?.to_sql()?;
//! ```

mod clause;
mod delete;
mod drop;
mod insert;
mod select;
mod traits;
mod update;

pub use clause::{Join, JoinType, LimitBy, Order, OrderBy, Sample, WithFill};
pub use delete::DeleteQb;
pub use drop::{DropKind, DropQb};
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::SqlQb;
pub use update::UpdateQb;

use crate::dialect::{self, AnsiDialect, ClickHouseDialect, Dialect, Feature};
use crate::error::{SqlError, SqlResult};
use crate::ident::Ident;
use crate::term::{Database, Table, Term};
use std::fmt;
use std::sync::Arc;

/// Statement kind of a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    /// DROP and other DDL.
    Ddl,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueryKind::Select => "SELECT",
            QueryKind::Insert => "INSERT",
            QueryKind::Update => "UPDATE",
            QueryKind::Delete => "DELETE",
            QueryKind::Ddl => "DDL",
        })
    }
}

/// Reject `feature` unless `dialect` supports it.
pub(crate) fn require(dialect: &dyn Dialect, feature: Feature) -> SqlResult<()> {
    if dialect.supports(feature) {
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlcraft::qb",
        dialect = dialect.name(),
        feature = %feature,
        "clause rejected by dialect"
    );
    Err(SqlError::unsupported(dialect.name(), feature))
}

/// Query factory bound to a dialect.
///
/// `Query` is cheap to clone and can be shared across threads; every builder
/// it creates holds a reference to the same dialect.
#[derive(Debug, Clone)]
pub struct Query {
    dialect: Arc<dyn Dialect>,
}

impl Query {
    /// Factory for a concrete dialect value.
    pub fn new<D: Dialect + 'static>(dialect: D) -> Self {
        Self {
            dialect: Arc::new(dialect),
        }
    }

    /// Factory for an already shared dialect.
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// Factory for the base dialect.
    pub fn ansi() -> Self {
        Self::new(AnsiDialect)
    }

    /// Factory for the ClickHouse dialect.
    pub fn clickhouse() -> Self {
        Self::new(ClickHouseDialect)
    }

    /// Factory for a dialect registered under `name`.
    pub fn for_dialect(name: &str) -> SqlResult<Self> {
        dialect::lookup(name).map(Self::with_dialect)
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    // ==================== SELECT / DELETE ====================

    /// `SELECT ... FROM table`. Chain `.delete()` for a DELETE statement.
    pub fn from_(&self, table: impl Into<Table>) -> SelectQb {
        SelectQb::new(self.dialect.clone(), Some(table.into()))
    }

    /// SELECT without a FROM clause (`SELECT 1+1`).
    pub fn select<I, T>(&self, terms: I) -> SelectQb
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        SelectQb::new(self.dialect.clone(), None).select(terms)
    }

    /// `DELETE FROM table`.
    pub fn delete_from(&self, table: impl Into<Table>) -> DeleteQb {
        DeleteQb::new(self.dialect.clone(), table.into())
    }

    // ==================== INSERT / UPDATE ====================

    /// `INSERT INTO table`.
    pub fn insert_into(&self, table: impl Into<Table>) -> InsertQb {
        InsertQb::new(self.dialect.clone(), table.into())
    }

    /// `UPDATE table`.
    pub fn update(&self, table: impl Into<Table>) -> UpdateQb {
        UpdateQb::new(self.dialect.clone(), table.into())
    }

    // ==================== DROP ====================

    pub fn drop_database(&self, database: impl Into<Database>) -> SqlResult<DropQb> {
        let database = database.into();
        self.drop_object(DropKind::Database, Ident::new(database.name()))
    }

    pub fn drop_table(&self, table: impl Into<Table>) -> SqlResult<DropQb> {
        self.drop_object(DropKind::Table, table.into().ident()?)
    }

    pub fn drop_dictionary(&self, name: impl Into<Ident>) -> SqlResult<DropQb> {
        self.drop_object(DropKind::Dictionary, name.into())
    }

    pub fn drop_view(&self, name: impl Into<Ident>) -> SqlResult<DropQb> {
        self.drop_object(DropKind::View, name.into())
    }

    pub fn drop_user(&self, name: impl Into<Ident>) -> SqlResult<DropQb> {
        self.drop_object(DropKind::User, name.into())
    }

    pub fn drop_quota(&self, name: impl Into<Ident>) -> SqlResult<DropQb> {
        self.drop_object(DropKind::Quota, name.into())
    }

    fn drop_object(&self, kind: DropKind, target: Ident) -> SqlResult<DropQb> {
        require(self.dialect.as_ref(), Feature::Drop(kind))?;
        Ok(DropQb::new(self.dialect.clone(), kind, target))
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::ansi()
    }
}

#[cfg(test)]
mod tests;
