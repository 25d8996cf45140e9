//! # sqlcraft
//!
//! A dialect-aware SQL construction library.
//!
//! ## Features
//!
//! - **Expression trees**: terms and criteria compose with `+ - * /`, `& | !`
//!   and render with the minimum parentheses that keep their meaning
//! - **Typed builders**: one builder per statement kind; clauses that do not
//!   belong to a kind cannot be called
//! - **Dialects**: one trait with a base behaviour per method; ClickHouse
//!   adds SAMPLE, FINAL, WITH FILL, LIMIT BY, ON CLUSTER and `ALTER TABLE`
//!   mutations
//! - **Safe defaults**: unsupported clauses fail when added, incomplete
//!   statements fail when rendered, and partial SQL never escapes
//!
//! ## Example
//!
//! ```ignore
//! use sqlcraft::prelude::*;
//!
//! let t = Table::new("abc");
//! let bar = t.field("bar").as_("bar01");
//!
//! let sql = Query::clickhouse()
//!     .from_(&t)
//!     .select([functions::sum(t.field("foo")).into(), bar.clone()])
//!     .order_by_entry(OrderBy::new(&bar).with_fill(WithFill::new().from(0).to(10).step(5)))?
//!     .to_sql()?;
//!
//! assert_eq!(
//!     sql,
//!     r#"SELECT SUM("foo"),"bar" AS "bar01" FROM "abc" ORDER BY "bar" WITH FILL FROM 0 TO 10 STEP 5"#
//! );
//! ```
//!
//! ## Logging
//!
//! With the default `tracing` feature, rendered statements are emitted at
//! `TRACE` level (target `sqlcraft::render`) and rejected clauses at `DEBUG`.

pub mod criterion;
pub mod dialect;
pub mod error;
pub mod functions;
pub mod ident;
pub mod options;
pub mod prelude;
pub mod qb;
pub mod render;
pub mod term;
pub mod value;

pub use criterion::{CmpOp, Criterion, LikeOp, LogicOp};
pub use dialect::{AnsiDialect, ClickHouseDialect, Dialect, Feature};
pub use error::{SqlError, SqlResult};
pub use ident::Ident;
pub use options::RenderOptions;
pub use qb::{
    DeleteQb, DropKind, DropQb, InsertQb, Join, JoinType, LimitBy, Order, OrderBy, Query,
    QueryKind, Sample, SelectQb, SqlQb, UpdateQb, WithFill,
};
pub use render::{Precedence, RenderCtx};
pub use term::{ArithOp, Database, Field, Function, Table, Term};
pub use value::Value;

// Re-export inventory for downstream dialect registration
pub use inventory;
