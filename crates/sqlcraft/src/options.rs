use crate::error::SqlResult;
use serde::{Deserialize, Serialize};

/// Render-time configuration.
///
/// Every field is optional; `None` defers to the active dialect's default.
/// The struct is serde-friendly so it can be embedded in an application's own
/// configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// When true, an ORDER BY entry whose alias also appears in the select
    /// list renders as the bare alias instead of the full expression.
    pub orderby_alias: Option<bool>,
    /// Same policy for GROUP BY entries.
    pub groupby_alias: Option<bool>,
    /// Override the dialect's identifier quote character.
    pub quote_char: Option<char>,
}

impl RenderOptions {
    /// Create options that defer everything to the dialect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the ORDER BY alias policy.
    pub fn with_orderby_alias(mut self, enabled: bool) -> Self {
        self.orderby_alias = Some(enabled);
        self
    }

    /// Force the GROUP BY alias policy.
    pub fn with_groupby_alias(mut self, enabled: bool) -> Self {
        self.groupby_alias = Some(enabled);
        self
    }

    /// Quote identifiers with `quote` instead of the dialect's character.
    pub fn with_quote_char(mut self, quote: char) -> Self {
        self.quote_char = Some(quote);
        self
    }

    /// Parse options from a JSON document.
    ///
    /// ```ignore
    /// let opts = RenderOptions::from_json(r#"{"orderby_alias": false}"#)?;
    /// ```
    pub fn from_json(json: &str) -> SqlResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
