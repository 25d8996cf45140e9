//! ClickHouse dialect.
//!
//! Differences from the base dialect:
//!
//! - SAMPLE, FINAL, `ORDER BY ... WITH FILL`, `LIMIT ... BY` and
//!   `ON CLUSTER` are accepted;
//! - DELETE and UPDATE are mutations: `ALTER TABLE t DELETE ...` and
//!   `ALTER TABLE t UPDATE ...`;
//! - `DROP DICTIONARY` has no cluster form, so `ON CLUSTER` is dropped for it;
//! - ORDER BY renders the full expression by default, not the select alias;
//! - string literals also escape backslashes.

use super::{Dialect, Feature, clauses};
use crate::error::SqlResult;
use crate::qb::{DeleteQb, DropKind, DropQb, LimitBy, Sample, UpdateQb, WithFill};
use crate::render::{Namespace, RenderCtx, write_list};
use chrono::NaiveDateTime;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickHouseDialect;

impl Dialect for ClickHouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn supports(&self, _feature: Feature) -> bool {
        true
    }

    fn orderby_alias(&self) -> bool {
        false
    }

    fn write_string(&self, out: &mut String, s: &str) {
        clauses::write_string_literal(out, s, true);
    }

    fn write_datetime(&self, out: &mut String, dt: &NaiveDateTime) {
        let _ = write!(out, "'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f"));
    }

    fn write_update(&self, ctx: RenderCtx<'_>, query: &UpdateQb, out: &mut String) -> SqlResult<()> {
        let ctx = ctx.with_namespace(Namespace::Never);
        out.push_str("ALTER TABLE ");
        query.table.write_sql(ctx, out, false)?;
        out.push_str(" UPDATE ");
        clauses::write_set_list(ctx, query, out)?;
        clauses::write_where(ctx, query.wheres.as_ref(), out)
    }

    fn write_delete(&self, ctx: RenderCtx<'_>, query: &DeleteQb, out: &mut String) -> SqlResult<()> {
        let ctx = ctx.with_namespace(Namespace::Never);
        out.push_str("ALTER TABLE ");
        query.table.write_sql(ctx, out, false)?;
        out.push_str(" DELETE");
        clauses::write_where(ctx, query.wheres.as_ref(), out)
    }

    fn write_drop(&self, ctx: RenderCtx<'_>, query: &DropQb, out: &mut String) -> SqlResult<()> {
        if query.kind == DropKind::Dictionary {
            #[cfg(feature = "tracing")]
            if let Some(cluster) = &query.cluster {
                tracing::debug!(
                    target: "sqlcraft::dialect",
                    cluster = %cluster,
                    "ON CLUSTER ignored for DROP DICTIONARY"
                );
            }
            return clauses::write_drop_head(ctx, query, out);
        }
        clauses::write_drop(ctx, query, out)
    }

    fn write_final(&self, _ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        out.push_str(" FINAL");
        Ok(())
    }

    fn write_sample(&self, ctx: RenderCtx<'_>, sample: &Sample, out: &mut String) -> SqlResult<()> {
        out.push_str(" SAMPLE ");
        sample.size.write_sql(ctx.dialect, out)?;
        if let Some(offset) = &sample.offset {
            out.push_str(" OFFSET ");
            offset.write_sql(ctx.dialect, out)?;
        }
        Ok(())
    }

    fn write_fill(&self, ctx: RenderCtx<'_>, fill: &WithFill, out: &mut String) -> SqlResult<()> {
        out.push_str(" WITH FILL");
        let item = ctx.item(false);
        for (keyword, bound) in [(" FROM ", &fill.from), (" TO ", &fill.to), (" STEP ", &fill.step)] {
            if let Some(term) = bound {
                out.push_str(keyword);
                term.render(item, out)?;
            }
        }
        Ok(())
    }

    fn write_limit_by(
        &self,
        ctx: RenderCtx<'_>,
        limit_by: &LimitBy,
        out: &mut String,
    ) -> SqlResult<()> {
        let _ = write!(out, " LIMIT {}", limit_by.n);
        if let Some(offset) = limit_by.offset {
            let _ = write!(out, " OFFSET {offset}");
        }
        out.push_str(" BY ");
        let item = ctx.item(false);
        write_list(out, &limit_by.by, |term, out| term.render(item, out))
    }

    fn write_cluster(&self, ctx: RenderCtx<'_>, cluster: &str, out: &mut String) -> SqlResult<()> {
        out.push_str(" ON CLUSTER ");
        ctx.write_name(out, cluster);
        Ok(())
    }
}
