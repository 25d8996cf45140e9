//! SQL dialects.
//!
//! A [`Dialect`] decides three things:
//!
//! - which optional clauses it accepts ([`Dialect::supports`]);
//! - how literals and identifiers are spelled;
//! - how each statement kind is laid out.
//!
//! Every method has a default that produces the base (ANSI-flavoured) output,
//! so a dialect only overrides what differs. The default statement writers
//! delegate to the free functions in [`clauses`], which overriding dialects
//! can also call for the parts they keep.
//!
//! Dialect-only clauses (SAMPLE, FINAL, WITH FILL, LIMIT BY, ON CLUSTER) go
//! through hook methods whose defaults return [`SqlError::Unsupported`].
//! Builders check [`Dialect::supports`] up front, so the hooks only fail for
//! dialects that claim a feature without rendering it.
//!
//! # Registry
//!
//! Dialects register themselves with `inventory`, so [`lookup`] can resolve a
//! dialect by name (for example from a config file):
//!
//! ```ignore
//! let dialect = sqlcraft::dialect::lookup("clickhouse")?;
//! let q = sqlcraft::Query::with_dialect(dialect);
//! ```

mod ansi;
pub mod clauses;
mod clickhouse;
mod registry;

pub use ansi::AnsiDialect;
pub use clickhouse::ClickHouseDialect;
pub use registry::{DialectRegistration, lookup, registered};

use crate::error::{SqlError, SqlResult};
use crate::qb::{
    DeleteQb, DropKind, DropQb, InsertQb, LimitBy, Sample, SelectQb, UpdateQb, WithFill,
};
use crate::render::RenderCtx;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::fmt::Write;

/// Optional capability a dialect may or may not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `SAMPLE n [OFFSET m]` after the FROM/JOIN section.
    Sample,
    /// `FINAL` after the FROM table.
    Final,
    /// `WITH FILL [FROM a] [TO b] [STEP s]` on ORDER BY entries.
    WithFill,
    /// `LIMIT n [OFFSET m] BY cols`.
    LimitBy,
    /// `ON CLUSTER "name"` on DDL statements.
    OnCluster,
    /// `DROP ... IF EXISTS`.
    IfExists,
    /// Dropping a given object kind.
    Drop(DropKind),
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Sample => f.write_str("SAMPLE"),
            Feature::Final => f.write_str("FINAL"),
            Feature::WithFill => f.write_str("WITH FILL"),
            Feature::LimitBy => f.write_str("LIMIT BY"),
            Feature::OnCluster => f.write_str("ON CLUSTER"),
            Feature::IfExists => f.write_str("IF EXISTS"),
            Feature::Drop(kind) => write!(f, "DROP {}", kind.keyword()),
        }
    }
}

/// Rendering rules for one SQL dialect.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Registry name, lowercase.
    fn name(&self) -> &'static str;

    /// Identifier quote character; `None` emits names bare.
    fn quote_char(&self) -> Option<char> {
        Some('"')
    }

    /// Whether the dialect accepts `feature`.
    fn supports(&self, feature: Feature) -> bool {
        matches!(
            feature,
            Feature::IfExists
                | Feature::Drop(
                    DropKind::Database | DropKind::Table | DropKind::View | DropKind::User
                )
        )
    }

    /// Default ORDER BY alias policy; [`crate::RenderOptions`] may override it.
    fn orderby_alias(&self) -> bool {
        true
    }

    /// Default GROUP BY alias policy.
    fn groupby_alias(&self) -> bool {
        true
    }

    /// Whether a field with no table is an error in a multi-table query.
    fn requires_qualified_fields(&self) -> bool {
        true
    }

    // ==================== Literals ====================

    /// Single-quoted string with `'` doubled.
    fn write_string(&self, out: &mut String, s: &str) {
        clauses::write_string_literal(out, s, false);
    }

    fn write_bool(&self, out: &mut String, value: bool) {
        out.push_str(if value { "true" } else { "false" });
    }

    fn write_date(&self, out: &mut String, date: &NaiveDate) {
        let _ = write!(out, "'{}'", date.format("%Y-%m-%d"));
    }

    fn write_datetime(&self, out: &mut String, dt: &NaiveDateTime) {
        let _ = write!(out, "'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.f"));
    }

    // ==================== Statements ====================

    fn write_select(&self, ctx: RenderCtx<'_>, query: &SelectQb, out: &mut String) -> SqlResult<()> {
        clauses::write_select(ctx, query, out)
    }

    fn write_insert(&self, ctx: RenderCtx<'_>, query: &InsertQb, out: &mut String) -> SqlResult<()> {
        clauses::write_insert(ctx, query, out)
    }

    fn write_update(&self, ctx: RenderCtx<'_>, query: &UpdateQb, out: &mut String) -> SqlResult<()> {
        clauses::write_update(ctx, query, out)
    }

    fn write_delete(&self, ctx: RenderCtx<'_>, query: &DeleteQb, out: &mut String) -> SqlResult<()> {
        clauses::write_delete(ctx, query, out)
    }

    fn write_drop(&self, ctx: RenderCtx<'_>, query: &DropQb, out: &mut String) -> SqlResult<()> {
        clauses::write_drop(ctx, query, out)
    }

    // ==================== Dialect-only clause hooks ====================

    fn write_final(&self, _ctx: RenderCtx<'_>, _out: &mut String) -> SqlResult<()> {
        Err(SqlError::unsupported(self.name(), Feature::Final))
    }

    fn write_sample(&self, _ctx: RenderCtx<'_>, _sample: &Sample, _out: &mut String) -> SqlResult<()> {
        Err(SqlError::unsupported(self.name(), Feature::Sample))
    }

    fn write_fill(&self, _ctx: RenderCtx<'_>, _fill: &WithFill, _out: &mut String) -> SqlResult<()> {
        Err(SqlError::unsupported(self.name(), Feature::WithFill))
    }

    fn write_limit_by(
        &self,
        _ctx: RenderCtx<'_>,
        _limit_by: &LimitBy,
        _out: &mut String,
    ) -> SqlResult<()> {
        Err(SqlError::unsupported(self.name(), Feature::LimitBy))
    }

    fn write_cluster(&self, _ctx: RenderCtx<'_>, _cluster: &str, _out: &mut String) -> SqlResult<()> {
        Err(SqlError::unsupported(self.name(), Feature::OnCluster))
    }
}
