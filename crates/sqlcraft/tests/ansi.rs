//! Base dialect rendering and custom dialect extension.

use sqlcraft::dialect::{self, DialectRegistration, clauses};
use sqlcraft::{
    AnsiDialect, DeleteQb, Dialect, Feature, Query, RenderCtx, SqlError, SqlQb, SqlResult, Table,
    Term, functions as fn_,
};
use std::sync::Arc;

fn abc() -> Table {
    Table::new("abc")
}

#[test]
fn select_with_everything() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo"), Term::from(fn_::count_star()).as_("n")])
        .distinct()
        .where_(t.field("bar").between(1, 10) & t.field("baz").like("x%"))
        .group_by([t.field("foo")])
        .having(Term::from(fn_::count_star()).gt(1))
        .order_by_desc(t.field("foo"))
        .limit(10)
        .offset(20)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        concat!(
            r#"SELECT DISTINCT "foo",COUNT(*) AS "n" FROM "abc""#,
            r#" WHERE "bar" BETWEEN 1 AND 10 AND "baz" LIKE 'x%'"#,
            r#" GROUP BY "foo" HAVING COUNT(*)>1 ORDER BY "foo" DESC LIMIT 10 OFFSET 20"#
        )
    );
}

#[test]
fn delete_uses_standard_form() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_(t.field("foo").eq(t.field("bar")))
        .delete()
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "abc" WHERE "foo"="bar""#);
}

#[test]
fn update_uses_standard_form() {
    let t = abc();
    let sql = Query::ansi()
        .update(&t)
        .where_(t.field("foo").eq(0))
        .set("foo", "bar")
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "abc" SET "foo"='bar' WHERE "foo"=0"#);
}

#[test]
fn aliased_table_is_not_aliased_in_dml() {
    let t = abc().as_("a");
    let sql = Query::ansi()
        .delete_from(&t)
        .where_(t.field("foo").eq(1))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "abc" WHERE "foo"=1"#);
}

#[test]
fn literal_spelling() {
    let t = abc();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let sql = Query::ansi()
        .from_(&t)
        .where_(
            t.field("flag").eq(true)
                & t.field("day").eq(day)
                & t.field("name").eq("it's")
                & t.field("gone").eq(Term::null()),
        )
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "flag"=true AND "day"='2024-02-29' AND "name"='it''s' AND "gone"=NULL"#
    );
}

#[test]
fn non_finite_float_fails_whole_render() {
    let t = abc();
    let err = Query::ansi()
        .from_(&t)
        .where_(t.field("x").eq(f64::NAN))
        .to_sql()
        .unwrap_err();
    assert!(matches!(err, SqlError::InvalidLiteral(_)));
}

// ==================== Custom dialect ====================

/// Backtick quoting, numeric booleans, and a FINAL claim without a renderer.
#[derive(Debug)]
struct Backtick;

impl Dialect for Backtick {
    fn name(&self) -> &'static str {
        "backtick"
    }

    fn quote_char(&self) -> Option<char> {
        Some('`')
    }

    fn supports(&self, feature: Feature) -> bool {
        feature == Feature::Final || AnsiDialect.supports(feature)
    }

    fn write_bool(&self, out: &mut String, value: bool) {
        out.push(if value { '1' } else { '0' });
    }

    fn write_delete(&self, ctx: RenderCtx<'_>, query: &DeleteQb, out: &mut String) -> SqlResult<()> {
        clauses::write_delete(ctx, query, out)?;
        out.push_str(" LIMIT 1");
        Ok(())
    }
}

fn build_backtick() -> Arc<dyn Dialect> {
    Arc::new(Backtick)
}

sqlcraft::inventory::submit! {
    DialectRegistration::new("backtick", build_backtick)
}

#[test]
fn custom_dialect_is_registered() {
    assert!(dialect::registered().contains(&"backtick"));
    let q = Query::for_dialect("Backtick").unwrap();
    assert_eq!(q.dialect().name(), "backtick");
}

#[test]
fn custom_dialect_overrides_only_what_it_defines() {
    let t = abc();
    let q = Query::new(Backtick);

    let sql = q
        .from_(&t)
        .select([t.field("foo")])
        .where_(t.field("flag").eq(true))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `foo` FROM `abc` WHERE `flag`=1");

    let sql = q.delete_from(&t).to_sql().unwrap();
    assert_eq!(sql, "DELETE FROM `abc` LIMIT 1");

    let sql = q.update(&t).set("flag", false).to_sql().unwrap();
    assert_eq!(sql, "UPDATE `abc` SET `flag`=0");
}

#[test]
fn claimed_feature_without_renderer_fails_at_render() {
    let q = Query::new(Backtick).from_("abc").final_().unwrap();
    let err = q.to_sql().unwrap_err();
    assert_eq!(
        err,
        SqlError::Unsupported {
            dialect: "backtick",
            feature: Feature::Final
        }
    );
}
