//! # parent-version-core
//!
//! Core framework for build-time enforcer rules that inspect the properties
//! of the artifact currently being built.
//!
//! This crate provides the foundational traits and types:
//!
//! - [`EnforcerRule`] trait implemented by every rule
//! - [`BuildContext`] trait through which a rule reads build properties
//! - [`PropertyMap`], an in-memory context backed by a static property table
//! - [`RuleError`] describing why a rule failed
//! - [`Config`] for loading rule configuration from TOML
//!
//! ## Example
//!
//! ```ignore
//! use parent_version_core::{EnforcerRule, PropertyMap};
//!
//! let ctx = PropertyMap::new()
//!     .with("project.version", "1.0.0")
//!     .with("project.parent.version", "1.0.0");
//!
//! rule.execute(&ctx)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod property_map;
mod rule;

pub use config::{Config, ConfigError, RuleConfig};
pub use context::{
    resolve_property, BuildContext, EvaluationError, PropertyValue, RecordingLog, RuleLog,
    TracingLog, LOG_TARGET,
};
pub use error::RuleError;
pub use property_map::{PropertyMap, PropertyMapError};
pub use rule::{EnforcerRule, RuleBox};
