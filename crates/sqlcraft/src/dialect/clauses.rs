//! Base statement writers.
//!
//! These produce the default statement shapes and are what the [`Dialect`]
//! default methods call. A dialect that overrides one statement can still
//! reuse the pieces here (`write_where`, `write_set_list`, `write_drop_head`).
//!
//! Every clause writer emits its own leading space; list items are joined
//! with a bare comma.
//!
//! [`Dialect`]: super::Dialect

use crate::criterion::Criterion;
use crate::error::{SqlError, SqlResult};
use crate::qb::{DeleteQb, DropQb, InsertQb, Join, OrderBy, QueryKind, SelectQb, UpdateQb};
use crate::render::{Namespace, RenderCtx, write_list};
use crate::term::Term;
use std::fmt::Write;

/// Write a single-quoted string literal, doubling `'` (and `\` if asked).
pub fn write_string_literal(out: &mut String, s: &str, escape_backslash: bool) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' if escape_backslash => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// ` WHERE <criterion>`, or nothing.
pub fn write_where(
    ctx: RenderCtx<'_>,
    criterion: Option<&Criterion>,
    out: &mut String,
) -> SqlResult<()> {
    if let Some(criterion) = criterion {
        out.push_str(" WHERE ");
        criterion.render(ctx.item(false), out)?;
    }
    Ok(())
}

/// `SELECT ... FROM ... [JOIN ...] [WHERE ...] [GROUP BY ...] [HAVING ...]
/// [ORDER BY ...] [LIMIT n] [OFFSET m]`, with the dialect hooks in between.
pub fn write_select(ctx: RenderCtx<'_>, query: &SelectQb, out: &mut String) -> SqlResult<()> {
    if query.from.is_none() {
        if !query.joins.is_empty() {
            return Err(SqlError::incomplete(
                QueryKind::Select,
                "JOIN requires a FROM table",
            ));
        }
        if query.selects.is_empty() {
            return Err(SqlError::incomplete(
                QueryKind::Select,
                "SELECT without FROM needs at least one term",
            ));
        }
    }

    let namespace = if query.joins.is_empty() {
        Namespace::Aliased
    } else {
        Namespace::Always
    };
    let ctx = ctx.with_namespace(namespace);
    let dialect = ctx.dialect;

    out.push_str("SELECT ");
    if query.distinct {
        out.push_str("DISTINCT ");
    }
    if query.selects.is_empty() {
        out.push('*');
    } else {
        let item = ctx.item(true);
        write_list(out, &query.selects, |term, out| term.render(item, out))?;
    }

    if let Some(table) = &query.from {
        out.push_str(" FROM ");
        table.write_sql(ctx, out, true)?;
        if query.is_final {
            dialect.write_final(ctx, out)?;
        }
    }

    for join in &query.joins {
        write_join(ctx, join, out)?;
    }

    if let Some(sample) = &query.sample {
        dialect.write_sample(ctx, sample, out)?;
    }

    write_where(ctx, query.wheres.as_ref(), out)?;

    if !query.groupbys.is_empty() {
        out.push_str(" GROUP BY ");
        let use_alias = ctx.groupby_alias();
        write_list(out, &query.groupbys, |term, out| {
            write_term_ref(ctx, &query.selects, term, use_alias, out)
        })?;
    }

    if let Some(having) = &query.havings {
        out.push_str(" HAVING ");
        having.render(ctx.item(false), out)?;
    }

    if !query.orderbys.is_empty() {
        out.push_str(" ORDER BY ");
        write_list(out, &query.orderbys, |entry, out| {
            write_order_entry(ctx, &query.selects, entry, out)
        })?;
    }

    if let Some(limit_by) = &query.limit_by {
        dialect.write_limit_by(ctx, limit_by, out)?;
    }
    if let Some(limit) = query.limit {
        let _ = write!(out, " LIMIT {limit}");
    }
    if let Some(offset) = query.offset {
        let _ = write!(out, " OFFSET {offset}");
    }
    Ok(())
}

/// ` <KIND> JOIN <table>[ ON <criterion>]`
pub fn write_join(ctx: RenderCtx<'_>, join: &Join, out: &mut String) -> SqlResult<()> {
    out.push(' ');
    out.push_str(join.kind.keyword());
    out.push(' ');
    join.table.write_sql(ctx, out, true)?;
    if let Some(on) = &join.on {
        out.push_str(" ON ");
        on.render(ctx.item(false), out)?;
    }
    Ok(())
}

/// One ORDER BY entry: reference, direction, then the fill hook.
pub fn write_order_entry(
    ctx: RenderCtx<'_>,
    selects: &[Term],
    entry: &OrderBy,
    out: &mut String,
) -> SqlResult<()> {
    write_term_ref(ctx, selects, &entry.term, ctx.orderby_alias(), out)?;
    if let Some(order) = entry.order {
        out.push(' ');
        out.push_str(order.keyword());
    }
    if let Some(fill) = &entry.fill {
        ctx.dialect.write_fill(ctx, fill, out)?;
    }
    Ok(())
}

/// Write a GROUP BY / ORDER BY reference: the bare alias when the policy
/// allows it and the alias names a select item, otherwise the expression.
fn write_term_ref(
    ctx: RenderCtx<'_>,
    selects: &[Term],
    term: &Term,
    use_alias: bool,
    out: &mut String,
) -> SqlResult<()> {
    if use_alias {
        if let Some(alias) = term.alias() {
            if selects.iter().any(|s| s.alias() == Some(alias)) {
                ctx.write_name(out, alias);
                return Ok(());
            }
        }
    }
    term.render(ctx.item(false), out)
}

/// `INSERT INTO <table>[ (<cols>)] VALUES (<row>),(<row>)`
pub fn write_insert(ctx: RenderCtx<'_>, query: &InsertQb, out: &mut String) -> SqlResult<()> {
    let Some(first) = query.rows.first() else {
        return Err(SqlError::incomplete(
            QueryKind::Insert,
            "INSERT requires at least one VALUES row",
        ));
    };
    let width = if query.columns.is_empty() {
        first.len()
    } else {
        query.columns.len()
    };
    if let Some(row) = query.rows.iter().find(|row| row.len() != width) {
        return Err(SqlError::validation(format!(
            "INSERT row has {} values, expected {width}",
            row.len()
        )));
    }

    let ctx = ctx.with_namespace(Namespace::Never);
    let item = ctx.item(false);
    out.push_str("INSERT INTO ");
    query.table.write_sql(ctx, out, false)?;
    if !query.columns.is_empty() {
        out.push_str(" (");
        write_list(out, &query.columns, |field, out| field.render(item, out))?;
        out.push(')');
    }
    out.push_str(" VALUES ");
    write_list(out, &query.rows, |row, out| {
        out.push('(');
        write_list(out, row, |value, out| value.render(item, out))?;
        out.push(')');
        Ok(())
    })
}

/// `"col"=value,...` for UPDATE statements.
pub fn write_set_list(ctx: RenderCtx<'_>, query: &UpdateQb, out: &mut String) -> SqlResult<()> {
    if query.sets.is_empty() {
        return Err(SqlError::incomplete(
            QueryKind::Update,
            "UPDATE requires at least one SET assignment",
        ));
    }
    let item = ctx.item(false);
    write_list(out, &query.sets, |(field, value), out| {
        field.render(item, out)?;
        out.push('=');
        value.render(item, out)
    })
}

/// `UPDATE <table> SET <assignments>[ WHERE ...]`
pub fn write_update(ctx: RenderCtx<'_>, query: &UpdateQb, out: &mut String) -> SqlResult<()> {
    let ctx = ctx.with_namespace(Namespace::Never);
    out.push_str("UPDATE ");
    query.table.write_sql(ctx, out, false)?;
    out.push_str(" SET ");
    write_set_list(ctx, query, out)?;
    write_where(ctx, query.wheres.as_ref(), out)
}

/// `DELETE FROM <table>[ WHERE ...]`
pub fn write_delete(ctx: RenderCtx<'_>, query: &DeleteQb, out: &mut String) -> SqlResult<()> {
    let ctx = ctx.with_namespace(Namespace::Never);
    out.push_str("DELETE FROM ");
    query.table.write_sql(ctx, out, false)?;
    write_where(ctx, query.wheres.as_ref(), out)
}

/// `DROP <KIND>[ IF EXISTS] <name>`, without any cluster suffix.
pub fn write_drop_head(ctx: RenderCtx<'_>, query: &DropQb, out: &mut String) -> SqlResult<()> {
    out.push_str("DROP ");
    out.push_str(query.kind.keyword());
    if query.if_exists {
        out.push_str(" IF EXISTS");
    }
    out.push(' ');
    ctx.write_ident(out, &query.target);
    Ok(())
}

/// Drop head followed by the dialect's ` ON CLUSTER` hook when a cluster is set.
pub fn write_drop(ctx: RenderCtx<'_>, query: &DropQb, out: &mut String) -> SqlResult<()> {
    write_drop_head(ctx, query, out)?;
    if let Some(cluster) = &query.cluster {
        ctx.dialect.write_cluster(ctx, cluster, out)?;
    }
    Ok(())
}
