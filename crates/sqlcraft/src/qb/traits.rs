//! Trait shared by all query builders.

use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::options::RenderOptions;
use crate::qb::QueryKind;
use crate::render::RenderCtx;

/// A query that renders to a SQL string.
///
/// Rendering is pure: it never mutates the builder, so calling
/// [`SqlQb::to_sql`] twice yields identical text.
pub trait SqlQb {
    /// Statement kind.
    fn kind(&self) -> QueryKind;

    /// Dialect the query renders with.
    fn dialect(&self) -> &dyn Dialect;

    /// Append the statement to `out`.
    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()>;

    /// Render with the dialect's default options.
    fn to_sql(&self) -> SqlResult<String> {
        self.to_sql_with(&RenderOptions::default())
    }

    /// Render with explicit options.
    ///
    /// On error nothing is returned; partial SQL never escapes.
    fn to_sql_with(&self, options: &RenderOptions) -> SqlResult<String> {
        let ctx = RenderCtx::new(self.dialect(), options);
        let mut out = String::with_capacity(128);
        let result = self.write_sql(ctx, &mut out);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(()) => tracing::trace!(
                target: "sqlcraft::render",
                dialect = self.dialect().name(),
                kind = %self.kind(),
                sql = %out,
                "rendered query"
            ),
            Err(err) => tracing::debug!(
                target: "sqlcraft::render",
                dialect = self.dialect().name(),
                kind = %self.kind(),
                error = %err,
                "render failed"
            ),
        }

        result.map(|()| out)
    }
}
