use super::Dialect;

/// The base dialect: double-quoted identifiers and standard statement shapes.
///
/// Every [`Dialect`] method keeps its default, so this is also the reference
/// output other dialects are compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Feature;
    use crate::qb::DropKind;

    #[test]
    fn base_feature_set() {
        let d = AnsiDialect;
        assert!(d.supports(Feature::IfExists));
        assert!(d.supports(Feature::Drop(DropKind::Table)));
        assert!(d.supports(Feature::Drop(DropKind::Database)));
        assert!(!d.supports(Feature::Drop(DropKind::Dictionary)));
        assert!(!d.supports(Feature::Drop(DropKind::Quota)));
        assert!(!d.supports(Feature::Sample));
        assert!(!d.supports(Feature::Final));
        assert!(!d.supports(Feature::WithFill));
        assert!(!d.supports(Feature::LimitBy));
        assert!(!d.supports(Feature::OnCluster));
    }

    #[test]
    fn base_policies() {
        let d = AnsiDialect;
        assert_eq!(d.quote_char(), Some('"'));
        assert!(d.orderby_alias());
        assert!(d.groupby_alias());
        assert!(d.requires_qualified_fields());
    }
}
