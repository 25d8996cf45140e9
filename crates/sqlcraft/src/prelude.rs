//! Convenient imports for typical `sqlcraft` usage.
//!
//! ```ignore
//! use sqlcraft::prelude::*;
//! ```

pub use crate::functions;
pub use crate::{
    Criterion, Database, Field, JoinType, Order, OrderBy, Query, RenderOptions, Sample, SqlError,
    SqlQb, SqlResult, Table, Term, WithFill,
};
