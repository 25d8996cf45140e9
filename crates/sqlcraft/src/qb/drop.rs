//! DROP statement builder.

use crate::dialect::{Dialect, Feature};
use crate::error::SqlResult;
use crate::ident::Ident;
use crate::qb::traits::SqlQb;
use crate::qb::{QueryKind, require};
use crate::render::RenderCtx;
use std::sync::Arc;

/// Kind of object a DROP statement removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropKind {
    Database,
    Table,
    Dictionary,
    View,
    User,
    Quota,
}

impl DropKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DropKind::Database => "DATABASE",
            DropKind::Table => "TABLE",
            DropKind::Dictionary => "DICTIONARY",
            DropKind::View => "VIEW",
            DropKind::User => "USER",
            DropKind::Quota => "QUOTA",
        }
    }
}

/// `DROP <KIND> [IF EXISTS] <name> [ON CLUSTER <cluster>]`.
#[derive(Clone, Debug)]
pub struct DropQb {
    pub(crate) dialect: Arc<dyn Dialect>,
    pub(crate) kind: DropKind,
    pub(crate) target: Ident,
    pub(crate) if_exists: bool,
    pub(crate) cluster: Option<String>,
}

impl DropQb {
    pub(crate) fn new(dialect: Arc<dyn Dialect>, kind: DropKind, target: Ident) -> Self {
        Self {
            dialect,
            kind,
            target,
            if_exists: false,
            cluster: None,
        }
    }

    /// Add `IF EXISTS`.
    pub fn if_exists(mut self) -> SqlResult<Self> {
        require(self.dialect.as_ref(), Feature::IfExists)?;
        self.if_exists = true;
        Ok(self)
    }

    /// Run the statement on every node of `cluster`.
    ///
    /// Accepted for all kinds; a dialect may still omit it for kinds that
    /// have no cluster form.
    pub fn on_cluster(mut self, cluster: impl Into<String>) -> SqlResult<Self> {
        require(self.dialect.as_ref(), Feature::OnCluster)?;
        self.cluster = Some(cluster.into());
        Ok(self)
    }

    pub fn drop_kind(&self) -> DropKind {
        self.kind
    }

    pub fn target(&self) -> &Ident {
        &self.target
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }
}

impl SqlQb for DropQb {
    fn kind(&self) -> QueryKind {
        QueryKind::Ddl
    }

    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn write_sql(&self, ctx: RenderCtx<'_>, out: &mut String) -> SqlResult<()> {
        ctx.dialect.write_drop(ctx, self, out)
    }
}
