//! List rules command implementation.

use parent_version_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<20} Description", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!("{:<20} {}", rule.name(), rule.description());
    }

    println!("\nConfigure rules in parent-version.toml, e.g.:");
    println!("  [rules.parent-version]");
    println!("  ignore = [\"my-parent\"]");
}
