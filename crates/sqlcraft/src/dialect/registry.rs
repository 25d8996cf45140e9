//! Name-based dialect registry.

use super::{AnsiDialect, ClickHouseDialect, Dialect};
use crate::error::{SqlError, SqlResult};
use std::sync::Arc;

/// A dialect constructor registered under a name.
///
/// Downstream crates can register their own dialects:
///
/// ```ignore
/// fn build_mysql() -> Arc<dyn Dialect> { Arc::new(MySqlDialect) }
///
/// inventory::submit! {
///     sqlcraft::dialect::DialectRegistration::new("mysql", build_mysql)
/// }
/// ```
pub struct DialectRegistration {
    pub name: &'static str,
    pub build: fn() -> Arc<dyn Dialect>,
}

impl DialectRegistration {
    pub const fn new(name: &'static str, build: fn() -> Arc<dyn Dialect>) -> Self {
        Self { name, build }
    }
}

inventory::collect!(DialectRegistration);

fn build_ansi() -> Arc<dyn Dialect> {
    Arc::new(AnsiDialect)
}

fn build_clickhouse() -> Arc<dyn Dialect> {
    Arc::new(ClickHouseDialect)
}

inventory::submit! {
    DialectRegistration::new("ansi", build_ansi)
}

inventory::submit! {
    DialectRegistration::new("clickhouse", build_clickhouse)
}

/// Resolve a registered dialect by name (case-insensitive).
pub fn lookup(name: &str) -> SqlResult<Arc<dyn Dialect>> {
    inventory::iter::<DialectRegistration>
        .into_iter()
        .find(|reg| reg.name.eq_ignore_ascii_case(name))
        .map(|reg| (reg.build)())
        .ok_or_else(|| SqlError::UnknownDialect(name.to_string()))
}

/// Names of all registered dialects, sorted.
pub fn registered() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = inventory::iter::<DialectRegistration>
        .into_iter()
        .map(|reg| reg.name)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
