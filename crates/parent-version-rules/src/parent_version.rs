//! Rule verifying that a module's version matches its parent's.
//!
//! # Rationale
//!
//! In a multi-module build every module is expected to carry the same
//! version as its parent. When a module's descriptor drifts (for example the
//! `<parent>` version is bumped but the module version is not), the build
//! happily publishes inconsistent artifacts. This rule catches that before
//! publishing by checking, in order:
//!
//! 1. the artifact's version equals the effective parent version, and
//! 2. the effective parent version equals the parent version listed in the
//!    artifact's own descriptor.
//!
//! # Configuration
//!
//! - `ignore`: artifacts to skip, each `artifactId` or `groupId:artifactId`
//!   (default: empty). The top-level pom of a hierarchy whose own parent has
//!   a different version is the usual entry.
//! - `ignore_missing_parent`: skip artifacts without a parent (default: true)
//!
//! ```toml
//! [rules.parent-version]
//! ignore = ["cxp-parent"]
//! ignore_missing_parent = true
//! ```
//!
//! # Absent properties
//!
//! Absent properties are replaced by sentinel strings such as
//! `unknown-project-parent-version`, and the missing-parent check compares
//! against that sentinel. An artifact whose parent version is literally that
//! string is therefore treated as having no parent.

use crate::ignore::{ArtifactCoordinates, IgnoreList};
use parent_version_core::{
    resolve_property, BuildContext, Config, ConfigError, EnforcerRule, EvaluationError, RuleError,
};
use serde::Deserialize;

/// Rule name for parent-version.
pub const NAME: &str = "parent-version";

/// Property holding the artifact id of the artifact being built.
pub const ARTIFACT_ID: &str = "project.artifact.artifactId";
/// Property holding the group id of the artifact being built.
pub const GROUP_ID: &str = "project.artifact.groupId";
/// Property holding the version of the artifact being built.
pub const PROJECT_VERSION: &str = "project.version";
/// Property holding the effective parent version in this build.
pub const PARENT_VERSION: &str = "project.parent.version";
/// Property holding the parent version listed in the artifact's descriptor.
pub const POM_PARENT_VERSION: &str = "project.parentArtifact.version";

/// Stand-in for an absent group or artifact id.
pub const UNKNOWN_ARTIFACT: &str = "unknown-artifact";
/// Stand-in for an absent project version.
pub const UNKNOWN_PROJECT_VERSION: &str = "unknown-project-version";
/// Stand-in for an absent effective parent version.
pub const UNKNOWN_PARENT_VERSION: &str = "unknown-project-parent-version";
/// Stand-in for an absent descriptor parent version.
pub const UNKNOWN_POM_PARENT_VERSION: &str = "unknown-parent-version-from-pom";

/// Options accepted by [`ParentVersionRule`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParentVersionConfig {
    /// Artifacts to skip, each `artifactId` or `groupId:artifactId`.
    pub ignore: Vec<String>,
    /// Whether to skip artifacts that have no parent.
    pub ignore_missing_parent: bool,
}

impl Default for ParentVersionConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            ignore_missing_parent: true,
        }
    }
}

/// Checks that an artifact's version matches its parent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentVersionRule {
    ignore: IgnoreList,
    ignore_missing_parent: bool,
}

impl Default for ParentVersionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ParentVersionRule {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ParentVersionConfig::default())
    }

    /// Creates a rule from explicit options.
    #[must_use]
    pub fn from_config(config: ParentVersionConfig) -> Self {
        Self {
            ignore: config.ignore.into_iter().collect(),
            ignore_missing_parent: config.ignore_missing_parent,
        }
    }

    /// Creates a rule from the `[rules.parent-version]` section of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the section holds unknown or mistyped options.
    pub fn from_rule_config(config: &Config) -> Result<Self, ConfigError> {
        config
            .rule_options::<ParentVersionConfig>(NAME)
            .map(Self::from_config)
    }

    /// Sets the ignore list.
    #[must_use]
    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_ignore(ignore);
        self
    }

    /// Sets whether artifacts without a parent are skipped.
    #[must_use]
    pub fn with_ignore_missing_parent(mut self, ignore: bool) -> Self {
        self.ignore_missing_parent = ignore;
        self
    }

    /// Replaces the ignore list.
    pub fn set_ignore<I, S>(&mut self, ignore: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ignore.into_iter().collect();
    }

    /// Sets whether artifacts without a parent are skipped.
    pub fn set_ignore_missing_parent(&mut self, ignore: bool) {
        self.ignore_missing_parent = ignore;
    }

    /// Returns the ignore list.
    #[must_use]
    pub fn ignore(&self) -> &IgnoreList {
        &self.ignore
    }

    /// Returns whether artifacts without a parent are skipped.
    #[must_use]
    pub fn ignore_missing_parent(&self) -> bool {
        self.ignore_missing_parent
    }

    /// Returns the options this rule was configured with.
    #[must_use]
    pub fn config(&self) -> ParentVersionConfig {
        ParentVersionConfig {
            ignore: self.ignore.patterns().into_iter().map(String::from).collect(),
            ignore_missing_parent: self.ignore_missing_parent,
        }
    }

    /// Returns true if the artifact being built is on the ignore list.
    fn check_ignore(&self, ctx: &dyn BuildContext) -> Result<bool, EvaluationError> {
        let artifact_id = resolve_property(ctx, ARTIFACT_ID, UNKNOWN_ARTIFACT)?;
        let group_id = resolve_property(ctx, GROUP_ID, UNKNOWN_ARTIFACT)?;
        let artifact = ArtifactCoordinates::new(group_id, artifact_id);

        let log = ctx.log();
        log.debug(&format!(
            "checking ignore of <group>:<artifact>={}",
            artifact.combined()
        ));

        Ok(self.ignore.find(&artifact, log).is_some())
    }
}

impl EnforcerRule for ParentVersionRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks that an artifact's version matches its parent's, and that the parent version in its pom is the effective one"
    }

    fn execute(&self, ctx: &dyn BuildContext) -> Result<(), RuleError> {
        if self.check_ignore(ctx).map_err(RuleError::IgnoreList)? {
            ctx.log()
                .debug("ignoring this artifact; it matches the ignore list");
            return Ok(());
        }

        let project_version = resolve_property(ctx, PROJECT_VERSION, UNKNOWN_PROJECT_VERSION)
            .map_err(RuleError::ProjectVersion)?;

        let parent_version = resolve_property(ctx, PARENT_VERSION, UNKNOWN_PARENT_VERSION)
            .map_err(RuleError::ParentVersion)?;

        if self.ignore_missing_parent && parent_version == UNKNOWN_PARENT_VERSION {
            ctx.log()
                .debug("ignoring this artifact due to no/missing parent");
            return Ok(());
        }

        let pom_parent_version =
            resolve_property(ctx, POM_PARENT_VERSION, UNKNOWN_POM_PARENT_VERSION)
                .map_err(RuleError::PomParentVersion)?;

        if project_version != parent_version {
            return Err(RuleError::ProjectParentMismatch {
                project: project_version,
                parent: parent_version,
            });
        }

        if pom_parent_version != parent_version {
            return Err(RuleError::PomParentMismatch {
                parent: parent_version,
                pom: pom_parent_version,
            });
        }

        Ok(())
    }

    fn is_cacheable(&self) -> bool {
        false
    }

    fn is_result_valid(&self, _cached: &dyn EnforcerRule) -> bool {
        false
    }

    fn cache_id(&self) -> Option<String> {
        None
    }
}
