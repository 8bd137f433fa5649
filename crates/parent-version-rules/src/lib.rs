//! # parent-version-rules
//!
//! Built-in enforcer rules for multi-module builds.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `parent-version` | Module version must equal the effective parent version, which must equal the parent version in the module's pom |
//!
//! ## Usage
//!
//! ```ignore
//! use parent_version_core::{EnforcerRule, PropertyMap};
//! use parent_version_rules::ParentVersionRule;
//!
//! let rule = ParentVersionRule::new().with_ignore(["cxp-parent"]);
//! rule.execute(&ctx)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ignore;
mod parent_version;

pub use ignore::{ArtifactCoordinates, IgnoreEntry, IgnoreList};
pub use parent_version::{
    ParentVersionConfig, ParentVersionRule, ARTIFACT_ID, GROUP_ID, NAME as PARENT_VERSION_RULE,
    PARENT_VERSION, POM_PARENT_VERSION, PROJECT_VERSION, UNKNOWN_ARTIFACT,
    UNKNOWN_PARENT_VERSION, UNKNOWN_POM_PARENT_VERSION, UNKNOWN_PROJECT_VERSION,
};

use parent_version_core::{Config, ConfigError, RuleBox};

/// Re-export core types for convenience.
pub use parent_version_core::{BuildContext, EnforcerRule, RuleError};

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ParentVersionRule::new())]
}

/// Returns the rules enabled in `config`, configured from their sections.
///
/// # Errors
///
/// Returns an error if a rule section holds invalid options.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let mut rules: Vec<RuleBox> = Vec::new();

    if config.is_rule_enabled(PARENT_VERSION_RULE) {
        rules.push(Box::new(ParentVersionRule::from_rule_config(config)?));
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules() {
        let names: Vec<&str> = all_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["parent-version"]);
    }

    #[test]
    fn configured_rules_respects_enabled() {
        let config = Config::parse("[rules.parent-version]\nenabled = false\n").unwrap();
        assert!(configured_rules(&config).unwrap().is_empty());

        assert_eq!(configured_rules(&Config::default()).unwrap().len(), 1);
    }
}
