//! Check command implementation.

use anyhow::{Context, Result};
use parent_version_core::{PropertyMap, RuleBox, RuleError};
use parent_version_rules::{configured_rules, ARTIFACT_ID, GROUP_ID, UNKNOWN_ARTIFACT};
use serde::Serialize;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Outcome of one rule for the checked artifact.
#[derive(Debug, Serialize)]
pub struct RuleOutcome {
    /// Rule name.
    pub rule: &'static str,
    /// Whether the rule passed.
    pub passed: bool,
    /// Failure message, if the rule failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Underlying evaluation failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// The failure itself, for diagnostic rendering.
    #[serde(skip)]
    pub error: Option<RuleError>,
}

/// Result of running every configured rule against one artifact.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// `groupId:artifactId` of the checked artifact.
    pub artifact: String,
    /// Per-rule outcomes, in rule order.
    pub results: Vec<RuleOutcome>,
}

impl CheckReport {
    /// Runs `rules` against `ctx`. Each rule runs even if an earlier one failed.
    #[must_use]
    pub fn run(rules: &[RuleBox], ctx: &PropertyMap) -> Self {
        let results = rules
            .iter()
            .map(|rule| {
                let outcome = rule.execute(ctx);
                match outcome {
                    Ok(()) => RuleOutcome {
                        rule: rule.name(),
                        passed: true,
                        message: None,
                        cause: None,
                        error: None,
                    },
                    Err(e) => RuleOutcome {
                        rule: rule.name(),
                        passed: false,
                        message: Some(e.to_string()),
                        cause: e.evaluation_error().map(ToString::to_string),
                        error: Some(e),
                    },
                }
            })
            .collect();

        Self {
            artifact: artifact_label(ctx),
            results,
        }
    }

    /// Returns true if any rule failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| !r.passed)
    }
}

fn artifact_label(ctx: &PropertyMap) -> String {
    let id = |name: &str| {
        ctx.get(name)
            .map_or_else(|| UNKNOWN_ARTIFACT.to_string(), ToString::to_string)
    };
    format!("{}:{}", id(GROUP_ID), id(ARTIFACT_ID))
}

/// Runs the check command.
pub fn run(properties: &Path, format: OutputFormat, source: &ConfigSource) -> Result<()> {
    let Some(report) = check(properties, source)? else {
        return Ok(());
    };

    super::output::print(&report, format)?;

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads the configuration and properties and runs the enabled rules.
///
/// Returns `None` without touching `properties` when no rule is enabled.
fn check(properties: &Path, source: &ConfigSource) -> Result<Option<CheckReport>> {
    if let Some(p) = source.path() {
        tracing::info!("Using config: {}", p.display());
    }
    let config = source.load().with_context(|| match source.path() {
        Some(p) => format!("Failed to load config: {}", p.display()),
        None => "Failed to load default config".to_string(),
    })?;

    let rules = configured_rules(&config).context("Invalid rule configuration")?;
    if rules.is_empty() {
        tracing::info!("No rules enabled; nothing to check");
        return Ok(None);
    }

    let props = PropertyMap::from_file(properties)
        .with_context(|| format!("Failed to load properties: {}", properties.display()))?;

    tracing::info!(
        "Checking {} ({} properties) with {} rule(s)",
        properties.display(),
        props.len(),
        rules.len()
    );

    Ok(Some(CheckReport::run(&rules, &props)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parent_version_rules::ParentVersionRule;
    use std::fs;
    use tempfile::TempDir;

    fn rules() -> Vec<RuleBox> {
        vec![Box::new(ParentVersionRule::new())]
    }

    #[test]
    fn report_passes_for_consistent_versions() {
        let ctx = PropertyMap::new()
            .with(GROUP_ID, "com.example")
            .with(ARTIFACT_ID, "widget")
            .with("project.version", "1.0.0")
            .with("project.parent.version", "1.0.0")
            .with("project.parentArtifact.version", "1.0.0");

        let report = CheckReport::run(&rules(), &ctx);
        assert_eq!(report.artifact, "com.example:widget");
        assert!(!report.has_failures());
        assert!(report.results[0].passed);
    }

    #[test]
    fn report_records_failure_and_cause() {
        let ctx = PropertyMap::new().fail_on("project.version", "boom");

        let report = CheckReport::run(&rules(), &ctx);
        assert!(report.has_failures());

        let outcome = &report.results[0];
        assert_eq!(outcome.rule, "parent-version");
        assert_eq!(
            outcome.message.as_deref(),
            Some("unable to determine the project version")
        );
        assert_eq!(
            outcome.cause.as_deref(),
            Some("failed to evaluate '${project.version}': boom")
        );
        assert_eq!(report.artifact, "unknown-artifact:unknown-artifact");
    }

    #[test]
    fn report_serializes_without_empty_fields() {
        let report = CheckReport::run(&rules(), &PropertyMap::new());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["results"][0]["passed"], true);
        assert!(json["results"][0].get("message").is_none());
        assert!(json["results"][0].get("error").is_none());
    }

    #[test]
    fn disabled_rule_skips_loading_properties() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("parent-version.toml"),
            "[rules.parent-version]\nenabled = false\n",
        )
        .unwrap();
        let properties = tmp.path().join("properties.toml");
        let source = crate::config_resolver::resolve(&properties, None);

        assert!(check(&properties, &source).unwrap().is_none());
    }

    #[test]
    fn enabled_rule_requires_properties() {
        let tmp = TempDir::new().unwrap();
        let properties = tmp.path().join("properties.toml");
        let source = crate::config_resolver::resolve(&properties, None);

        let err = check(&properties, &source).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load properties"));
    }

    #[test]
    fn check_uses_config_beside_properties() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("parent-version.toml"),
            "[rules.parent-version]\nignore = [\"widget\"]\n",
        )
        .unwrap();
        let properties = tmp.path().join("properties.toml");
        fs::write(
            &properties,
            r#"
"project.artifact.groupId" = "com.example"
"project.artifact.artifactId" = "widget"
"project.version" = "1.0.0"
"project.parent.version" = "2.0.0"
"#,
        )
        .unwrap();
        let source = crate::config_resolver::resolve(&properties, None);

        let report = check(&properties, &source).unwrap().unwrap();
        assert_eq!(report.artifact, "com.example:widget");
        assert!(!report.has_failures());
    }
}
