//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# parent-version configuration

[rules.parent-version]
enabled = true

# Artifacts to skip, each "artifactId" or "groupId:artifactId".
# The top-level pom of a hierarchy whose own parent has a different
# version usually belongs here.
ignore = []

# Skip artifacts that have no parent at all.
ignore_missing_parent = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(crate::config_resolver::PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure the ignore list", config_path.display());
    println!("  2. Run: parent-version check --properties properties.toml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parent_version_core::Config;
    use parent_version_rules::ParentVersionRule;

    #[test]
    fn default_config_yields_default_rule() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("parent-version"));

        let rule = ParentVersionRule::from_rule_config(&config).unwrap();
        assert_eq!(rule, ParentVersionRule::new());
    }
}
