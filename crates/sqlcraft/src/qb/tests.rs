//! Integration tests for the qb module.

use crate::dialect::Feature;
use crate::error::SqlError;
use crate::functions::{count_star, sum};
use crate::options::RenderOptions;
use crate::qb::{DropKind, JoinType, OrderBy, Query, QueryKind, SqlQb, WithFill};
use crate::term::{Table, Term};

fn abc() -> Table {
    Table::new("abc")
}

// ==================== SELECT ====================

#[test]
fn test_select_star() {
    let sql = Query::ansi().from_("abc").to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc""#);
}

#[test]
fn test_select_without_from() {
    let sql = Query::ansi()
        .select([Term::literal(1) + 1])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT 1+1");
}

#[test]
fn test_select_where() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .where_(t.field("foo").eq(0))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "foo" FROM "abc" WHERE "foo"=0"#);
}

#[test]
fn test_where_calls_are_anded() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_(t.field("a").eq(1) | t.field("b").eq(2))
        .where_(t.field("c").eq(3))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE ("a"=1 OR "b"=2) AND "c"=3"#
    );
}

#[test]
fn test_where_opt_skips_none() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_opt(None)
        .where_opt(Some(t.field("a").is_null()))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "a" IS NULL"#);
}

#[test]
fn test_select_distinct_schema_table() {
    let t = abc().in_schema("schema1");
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .distinct()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT DISTINCT "foo" FROM "schema1"."abc""#);
}

#[test]
fn test_aliased_table_qualifies_fields() {
    let t = abc().as_("t");
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "t"."foo" FROM "abc" AS "t""#);
}

#[test]
fn test_group_by_having() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo"), sum(t.field("bar")).into()])
        .group_by([t.field("foo")])
        .having(Term::from(sum(t.field("bar"))).gt(10))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "foo",SUM("bar") FROM "abc" GROUP BY "foo" HAVING SUM("bar")>10"#
    );
}

#[test]
fn test_orderby_uses_alias_by_default() {
    let t = abc();
    let bar = t.field("bar").as_("bar01");
    let q = Query::ansi()
        .from_(&t)
        .select([sum(t.field("foo")).into(), bar.clone()])
        .order_by(&bar);

    assert_eq!(
        q.to_sql().unwrap(),
        r#"SELECT SUM("foo"),"bar" AS "bar01" FROM "abc" ORDER BY "bar01""#
    );
    assert_eq!(
        q.to_sql_with(&RenderOptions::new().with_orderby_alias(false))
            .unwrap(),
        r#"SELECT SUM("foo"),"bar" AS "bar01" FROM "abc" ORDER BY "bar""#
    );
}

#[test]
fn test_orderby_alias_needs_matching_select_item() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .order_by(t.field("bar").as_("b"))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "foo" FROM "abc" ORDER BY "bar""#);
}

#[test]
fn test_groupby_alias_policy() {
    let t = abc();
    let bar = t.field("bar").as_("b");
    let q = Query::ansi()
        .from_(&t)
        .select([bar.clone(), count_star().into()])
        .group_by([&bar]);

    assert_eq!(
        q.to_sql().unwrap(),
        r#"SELECT "bar" AS "b",COUNT(*) FROM "abc" GROUP BY "b""#
    );
    assert_eq!(
        q.to_sql_with(&RenderOptions::new().with_groupby_alias(false))
            .unwrap(),
        r#"SELECT "bar" AS "b",COUNT(*) FROM "abc" GROUP BY "bar""#
    );
}

#[test]
fn test_order_directions() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .order_by_asc(t.field("a"))
        .order_by_desc(t.field("b"))
        .order_by_entry(t.field("c").desc())
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" ORDER BY "a" ASC,"b" DESC,"c" DESC"#
    );
}

#[test]
fn test_limit_offset_last_wins() {
    let sql = Query::ansi()
        .from_("abc")
        .limit(5)
        .limit(10)
        .offset(1)
        .offset(3)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" LIMIT 10 OFFSET 3"#);
}

#[test]
fn test_paginate() {
    let sql = Query::ansi().from_("abc").paginate(3, 20).to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" LIMIT 20 OFFSET 40"#);

    let sql = Query::ansi().from_("abc").paginate(0, 0).to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" LIMIT 1 OFFSET 0"#);
}

// ==================== JOIN ====================

#[test]
fn test_join_qualifies_every_field() {
    let a = Table::new("a");
    let b = Table::new("b");
    let sql = Query::ansi()
        .from_(&a)
        .select([a.field("x"), b.field("y")])
        .inner_join(&b, a.field("id").eq(b.field("aid")))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "a"."x","b"."y" FROM "a" JOIN "b" ON "a"."id"="b"."aid""#
    );
}

#[test]
fn test_join_kinds() {
    let a = Table::new("a");
    let b = Table::new("b").as_("bb");
    let on = a.field("id").eq(b.field("aid"));
    let q = Query::ansi().from_(&a);

    let left = q.clone().left_join(&b, on.clone()).to_sql().unwrap();
    assert_eq!(
        left,
        r#"SELECT * FROM "a" LEFT JOIN "b" AS "bb" ON "a"."id"="bb"."aid""#
    );
    let right = q.clone().right_join(&b, on.clone()).to_sql().unwrap();
    assert!(right.contains(r#" RIGHT JOIN "b" AS "bb" ON "#));
    let full = q.clone().full_join(&b, on.clone()).to_sql().unwrap();
    assert!(full.contains(r#" FULL OUTER JOIN "b" AS "bb" ON "#));
    let cross = q.clone().cross_join("c").to_sql().unwrap();
    assert_eq!(cross, r#"SELECT * FROM "a" CROSS JOIN "c""#);
}

#[test]
fn test_join_condition_rules() {
    let a = Table::new("a");
    let on = a.field("id").eq(1);

    let err = Query::ansi()
        .from_(&a)
        .join("b", JoinType::Cross, Some(on))
        .unwrap_err();
    assert!(matches!(err, SqlError::IllegalClause { kind: QueryKind::Select, .. }));

    let err = Query::ansi()
        .from_(&a)
        .join("b", JoinType::Left, None)
        .unwrap_err();
    assert!(matches!(err, SqlError::IllegalClause { .. }));

    assert!(Query::ansi().from_(&a).join("b", JoinType::Cross, None).is_ok());
}

#[test]
fn test_unbound_field_in_join_fails_at_render() {
    let a = Table::new("a");
    let b = Table::new("b");
    let q = Query::ansi()
        .from_(&a)
        .select([Term::field("x")])
        .inner_join(&b, a.field("id").eq(b.field("aid")));
    let err = q.to_sql().unwrap_err();
    assert_eq!(err, SqlError::UnqualifiedField("x".into()));
    assert!(err.is_render_error());
}

// ==================== Dialect gating ====================

#[test]
fn test_ansi_rejects_clickhouse_clauses() {
    let t = abc();
    let q = Query::ansi().from_(&t);

    let err = q.clone().sample(10).unwrap_err();
    assert_eq!(
        err,
        SqlError::Unsupported {
            dialect: "ansi",
            feature: Feature::Sample
        }
    );
    assert!(q.clone().final_().unwrap_err().is_unsupported());
    assert!(q.clone().limit_by(1, [t.field("a")]).unwrap_err().is_unsupported());
    let fill = OrderBy::new(t.field("a")).with_fill(WithFill::new());
    assert!(q.clone().order_by_entry(fill).unwrap_err().is_unsupported());
}

#[test]
fn test_final_requires_from() {
    let err = Query::clickhouse()
        .select([Term::literal(1)])
        .final_()
        .unwrap_err();
    assert!(matches!(err, SqlError::IllegalClause { .. }));
}

#[test]
fn test_join_requires_from() {
    let b = Table::new("b");
    let err = Query::ansi()
        .select([Term::literal(1)])
        .inner_join(&b, b.field("id").eq(1))
        .to_sql()
        .unwrap_err();
    assert!(matches!(
        err,
        SqlError::Incomplete {
            kind: QueryKind::Select,
            ..
        }
    ));
}

#[test]
fn test_tableless_select_requires_terms() {
    let err = Query::ansi().select(Vec::<Term>::new()).to_sql().unwrap_err();
    assert!(matches!(
        err,
        SqlError::Incomplete {
            kind: QueryKind::Select,
            ..
        }
    ));

    let sql = Query::ansi().select([Term::literal(1)]).to_sql().unwrap();
    assert_eq!(sql, "SELECT 1");
}

#[test]
fn test_empty_schema_is_rejected_everywhere() {
    let t = Table::new("abc").in_schema("");
    let q = Query::ansi();

    assert!(matches!(q.drop_table(&t), Err(SqlError::Validation(_))));
    assert!(matches!(
        q.from_(&t).to_sql(),
        Err(SqlError::Validation(_))
    ));
    assert!(matches!(
        q.delete_from(&t).to_sql(),
        Err(SqlError::Validation(_))
    ));
    assert!(matches!(
        q.from_(Table::new("")).to_sql(),
        Err(SqlError::Validation(_))
    ));
}

#[test]
fn test_limit_by_requires_terms() {
    let err = Query::clickhouse()
        .from_("abc")
        .limit_by(1, Vec::<Term>::new())
        .unwrap_err();
    assert!(matches!(err, SqlError::IllegalClause { .. }));
}

// ==================== DELETE ====================

#[test]
fn test_delete_from_select() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_(t.field("foo").eq(0))
        .delete()
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "abc" WHERE "foo"=0"#);
}

#[test]
fn test_delete_from_direct() {
    let sql = Query::ansi().delete_from("abc").to_sql().unwrap();
    assert_eq!(sql, r#"DELETE FROM "abc""#);
}

#[test]
fn test_delete_rejects_select_state() {
    let t = abc();
    let err = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .delete()
        .unwrap_err();
    assert!(matches!(
        err,
        SqlError::IllegalClause {
            kind: QueryKind::Delete,
            ..
        }
    ));

    let err = Query::ansi().from_(&t).limit(1).delete().unwrap_err();
    assert!(err.to_string().contains("LIMIT"));
}

// ==================== UPDATE ====================

#[test]
fn test_update_basic() {
    let t = abc();
    let sql = Query::ansi()
        .update(&t)
        .set("foo", "bar")
        .set_opt("baz", None::<i32>)
        .where_(t.field("foo").eq(0))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "abc" SET "foo"='bar' WHERE "foo"=0"#);
}

#[test]
fn test_update_expression_value() {
    let t = abc();
    let sql = Query::ansi()
        .update(&t)
        .set("n", t.field("n") + 1)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "abc" SET "n"="n"+1"#);
}

#[test]
fn test_update_without_set_is_incomplete() {
    let err = Query::ansi().update("abc").to_sql().unwrap_err();
    assert!(matches!(
        err,
        SqlError::Incomplete {
            kind: QueryKind::Update,
            ..
        }
    ));
}

// ==================== INSERT ====================

#[test]
fn test_insert_rows() {
    let sql = Query::ansi()
        .insert_into("abc")
        .columns(["foo", "bar"])
        .insert([Term::from(1), Term::from("x")])
        .unwrap()
        .insert([Term::from(2), Term::from("y")])
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "abc" ("foo","bar") VALUES (1,'x'),(2,'y')"#
    );
}

#[test]
fn test_insert_without_columns() {
    let sql = Query::ansi()
        .insert_into("abc")
        .insert_rows([[1, 2], [3, 4]])
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "abc" VALUES (1,2),(3,4)"#);
}

#[test]
fn test_insert_arity_mismatch() {
    let err = Query::ansi()
        .insert_into("abc")
        .columns(["foo", "bar"])
        .insert([1])
        .unwrap_err();
    assert!(matches!(err, SqlError::Validation(_)));

    let err = Query::ansi()
        .insert_into("abc")
        .insert([1, 2])
        .unwrap()
        .insert([3])
        .unwrap_err();
    assert!(matches!(err, SqlError::Validation(_)));
}

#[test]
fn test_insert_without_rows_is_incomplete() {
    let err = Query::ansi()
        .insert_into("abc")
        .columns(["foo"])
        .to_sql()
        .unwrap_err();
    assert!(matches!(
        err,
        SqlError::Incomplete {
            kind: QueryKind::Insert,
            ..
        }
    ));
}

// ==================== DROP ====================

#[test]
fn test_drop_base_dialect() {
    let q = Query::ansi();
    assert_eq!(
        q.drop_table("abc").unwrap().to_sql().unwrap(),
        r#"DROP TABLE "abc""#
    );
    assert_eq!(
        q.drop_database("mydb")
            .unwrap()
            .if_exists()
            .unwrap()
            .to_sql()
            .unwrap(),
        r#"DROP DATABASE IF EXISTS "mydb""#
    );
    assert_eq!(
        q.drop_table(Table::new("abc").in_schema("s"))
            .unwrap()
            .to_sql()
            .unwrap(),
        r#"DROP TABLE "s"."abc""#
    );
}

#[test]
fn test_drop_base_dialect_rejections() {
    let q = Query::ansi();
    assert_eq!(
        q.drop_dictionary("dict").unwrap_err(),
        SqlError::Unsupported {
            dialect: "ansi",
            feature: Feature::Drop(DropKind::Dictionary)
        }
    );
    assert!(q.drop_quota("q").unwrap_err().is_unsupported());
    let err = q.drop_table("abc").unwrap().on_cluster("c").unwrap_err();
    assert_eq!(
        err.to_string(),
        "ON CLUSTER is not supported by the ansi dialect"
    );
}

// ==================== Rendering properties ====================

#[test]
fn test_render_is_idempotent() {
    let t = abc();
    let q = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .where_(t.field("foo").isin([1, 2]));
    assert_eq!(q.to_sql().unwrap(), q.to_sql().unwrap());
}

#[test]
fn test_clone_branches_independently() {
    let t = abc();
    let base = Query::ansi().from_(&t).select([t.field("foo")]);
    let limited = base.clone().limit(1);
    assert_eq!(base.to_sql().unwrap(), r#"SELECT "foo" FROM "abc""#);
    assert_eq!(limited.to_sql().unwrap(), r#"SELECT "foo" FROM "abc" LIMIT 1"#);
}

#[test]
fn test_quote_char_override() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .to_sql_with(&RenderOptions::new().with_quote_char('`'))
        .unwrap();
    assert_eq!(sql, "SELECT `foo` FROM `abc`");
}

#[test]
fn test_query_for_dialect() {
    let q = Query::for_dialect("clickhouse").unwrap();
    assert_eq!(q.dialect().name(), "clickhouse");
    assert!(matches!(
        Query::for_dialect("nope").unwrap_err(),
        SqlError::UnknownDialect(_)
    ));
    assert_eq!(Query::default().dialect().name(), "ansi");
}
