//! Rule trait for defining enforcer rules.

use crate::context::BuildContext;
use crate::error::RuleError;

/// A build-time rule run once per artifact being built.
///
/// A rule reads whatever it needs through the [`BuildContext`] and either
/// returns `Ok(())` or fails with a [`RuleError`] that aborts the build.
///
/// The caching methods describe whether a host may reuse a previous result
/// instead of running the rule again. The defaults declare that results are
/// never reusable.
///
/// # Example
///
/// ```ignore
/// use parent_version_core::{BuildContext, EnforcerRule, RuleError};
///
/// pub struct AlwaysPass;
///
/// impl EnforcerRule for AlwaysPass {
///     fn name(&self) -> &'static str { "always-pass" }
///
///     fn execute(&self, _ctx: &dyn BuildContext) -> Result<(), RuleError> {
///         Ok(())
///     }
/// }
/// ```
pub trait EnforcerRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "parent-version").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Runs the rule against the artifact described by `ctx`.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] describing the first check that failed.
    fn execute(&self, ctx: &dyn BuildContext) -> Result<(), RuleError>;

    /// Whether a result of this rule may be cached by the host.
    fn is_cacheable(&self) -> bool {
        false
    }

    /// Whether a result cached from `cached` may be reused for this rule.
    fn is_result_valid(&self, _cached: &dyn EnforcerRule) -> bool {
        false
    }

    /// Key under which the host may cache a result, if any.
    fn cache_id(&self) -> Option<String> {
        None
    }
}

/// Type alias for boxed `EnforcerRule` trait objects.
pub type RuleBox = Box<dyn EnforcerRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyMap;

    struct TestRule;

    impl EnforcerRule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }

        fn execute(&self, _ctx: &dyn BuildContext) -> Result<(), RuleError> {
            Ok(())
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "");
        assert!(!rule.is_cacheable());
        assert!(!rule.is_result_valid(&TestRule));
        assert!(rule.cache_id().is_none());
        assert!(rule.execute(&PropertyMap::new()).is_ok());
    }

    #[test]
    fn boxed_rule() {
        let rules: Vec<RuleBox> = vec![Box::new(TestRule)];
        assert_eq!(rules[0].name(), "test-rule");
    }
}
