//! Rendering properties that hold across dialects.

use sqlcraft::{
    Criterion, OrderBy, Query, SqlError, SqlQb, Table, Term, WithFill, functions as fn_,
};

fn abc() -> Table {
    Table::new("abc")
}

#[test]
fn rendering_is_idempotent() {
    let t = abc();
    for q in [Query::ansi(), Query::clickhouse()] {
        let built = q
            .from_(&t)
            .select([t.field("foo"), fn_::sum(t.field("bar")).as_("s")])
            .where_((t.field("a").eq(1) | t.field("b").eq(2)) & t.field("c").isin([1, 2]))
            .group_by([t.field("foo")])
            .order_by(t.field("foo"))
            .limit(3);
        let first = built.to_sql().unwrap();
        let second = built.to_sql().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn or_inside_and_gets_parentheses() {
    let t = abc();
    let (a, b, c) = (t.field("a").eq(1), t.field("b").eq(2), t.field("c").eq(3));
    let sql = Query::ansi()
        .from_(&t)
        .where_((a | b) & c)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE ("a"=1 OR "b"=2) AND "c"=3"#);
}

#[test]
fn nested_and_flat_and_render_the_same() {
    let t = abc();
    let a = || t.field("a").eq(1);
    let b = || t.field("b").eq(2);
    let c = || t.field("c").eq(3);

    let nested = a().and(b().and(c()));
    let left_nested = a().and(b()).and(c());
    let flat = Criterion::all([a(), b(), c()]);

    let render = |crit: Criterion| Query::ansi().from_(&t).where_(crit).to_sql().unwrap();
    let expected = r#"SELECT * FROM "abc" WHERE "a"=1 AND "b"=2 AND "c"=3"#;
    assert_eq!(render(nested), expected);
    assert_eq!(render(left_nested), expected);
    assert_eq!(render(flat), expected);
}

#[test]
fn not_of_compound_keeps_parentheses() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_(!(t.field("a").eq(1) | t.field("b").eq(2)))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE NOT ("a"=1 OR "b"=2)"#);
}

#[test]
fn quoting_round_trip() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .select([t.field("foo")])
        .where_(t.field("foo").eq("it's"))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "foo" FROM "abc" WHERE "foo"='it''s'"#);
}

#[test]
fn clause_order_is_fixed() {
    let t = abc();
    // Calls deliberately out of order.
    let sql = Query::clickhouse()
        .from_(&t)
        .limit(5)
        .order_by(t.field("foo"))
        .where_(t.field("foo").gt(1))
        .sample(10)
        .unwrap()
        .final_()
        .unwrap()
        .select([t.field("foo")])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "foo" FROM "abc" FINAL SAMPLE 10 WHERE "foo">1 ORDER BY "foo" LIMIT 5"#
    );
}

#[test]
fn joins_precede_sample() {
    let a = Table::new("a");
    let b = Table::new("b");
    let sql = Query::clickhouse()
        .from_(&a)
        .sample(10)
        .unwrap()
        .inner_join(&b, a.field("id").eq(b.field("id")))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "a" JOIN "b" ON "a"."id"="b"."id" SAMPLE 10"#
    );
}

#[test]
fn base_dialect_never_emits_clickhouse_clauses() {
    let t = abc();
    let q = Query::ansi();

    assert!(matches!(
        q.from_(&t).final_(),
        Err(SqlError::Unsupported { .. })
    ));
    assert!(matches!(
        q.from_(&t).sample(10),
        Err(SqlError::Unsupported { .. })
    ));
    assert!(matches!(
        q.drop_table(&t).unwrap().on_cluster("c"),
        Err(SqlError::Unsupported { .. })
    ));
    assert!(matches!(
        q.from_(&t)
            .order_by_entry(OrderBy::new(t.field("a")).with_fill(WithFill::new())),
        Err(SqlError::Unsupported { .. })
    ));

    let sql = q
        .from_(&t)
        .select([t.field("foo")])
        .where_(t.field("foo").eq(1))
        .order_by(t.field("foo"))
        .to_sql()
        .unwrap();
    for keyword in ["FINAL", "SAMPLE", "ON CLUSTER", "WITH FILL", "ALTER"] {
        assert!(!sql.contains(keyword), "{keyword} leaked into {sql}");
    }
}

#[test]
fn arithmetic_precedence_in_select() {
    let t = abc();
    let (a, b, c) = (t.field("a"), t.field("b"), t.field("c"));
    let sql = Query::ansi()
        .from_(&t)
        .select([
            (a.clone() + b.clone()) * c.clone(),
            a.clone() + b.clone() * c.clone(),
            a.clone() - (b.clone() + c.clone()),
            a.clone() / (b.clone() / c.clone()),
            -(a.clone() + b.clone()),
        ])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT ("a"+"b")*"c","a"+"b"*"c","a"-("b"+"c"),"a"/("b"/"c"),-("a"+"b") FROM "abc""#
    );
}

#[test]
fn empty_in_list_is_constant() {
    let t = abc();
    let sql = Query::ansi()
        .from_(&t)
        .where_(t.field("a").isin(Vec::<Term>::new()))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE 1=0"#);
}

#[test]
fn queries_render_across_threads() {
    let t = abc();
    let q = Query::clickhouse()
        .from_(&t)
        .select([t.field("foo")])
        .final_()
        .unwrap();
    let expected = q.to_sql().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let q = q.clone();
            std::thread::spawn(move || q.to_sql().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
