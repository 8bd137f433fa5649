//! Rule failure type.

use crate::context::EvaluationError;
use miette::Diagnostic;

/// Reason an enforcer rule failed for the artifact being built.
///
/// The `Display` form of each variant is the exact message reported to the
/// build. Resolution failures keep the context's [`EvaluationError`] as their
/// [`source`](std::error::Error::source).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum RuleError {
    /// Artifact coordinates could not be read while matching the ignore list.
    #[error("error while checking the ignore list")]
    #[diagnostic(code(parent_version::ignore_list))]
    IgnoreList(#[source] EvaluationError),

    /// `project.version` could not be read.
    #[error("unable to determine the project version")]
    #[diagnostic(code(parent_version::project_version))]
    ProjectVersion(#[source] EvaluationError),

    /// `project.parent.version` could not be read.
    #[error("unable to determine the parent version")]
    #[diagnostic(code(parent_version::parent_version))]
    ParentVersion(#[source] EvaluationError),

    /// `project.parentArtifact.version` could not be read.
    #[error("unable to determine the version of the parent specified in the pom")]
    #[diagnostic(code(parent_version::pom_parent_version))]
    PomParentVersion(#[source] EvaluationError),

    /// The artifact's version differs from the effective parent version.
    #[error("parent and project version mismatch: project={project}; parent={parent}")]
    #[diagnostic(
        code(parent_version::project_parent_mismatch),
        help("set the module version to the parent version, or add the module to the ignore list")
    )]
    ProjectParentMismatch {
        /// Version of the artifact being built.
        project: String,
        /// Effective parent version in this build.
        parent: String,
    },

    /// The effective parent version differs from the one recorded in the descriptor.
    #[error(
        "actual parent version does not match the one listed in the pom: \
         actual parent version={parent}; version from pom={pom}"
    )]
    #[diagnostic(
        code(parent_version::pom_parent_mismatch),
        help("update the <parent> version in the module's pom")
    )]
    PomParentMismatch {
        /// Effective parent version in this build.
        parent: String,
        /// Parent version recorded in the module's descriptor.
        pom: String,
    },
}

impl RuleError {
    /// Returns the evaluation failure behind this error, if any.
    #[must_use]
    pub fn evaluation_error(&self) -> Option<&EvaluationError> {
        match self {
            Self::IgnoreList(e)
            | Self::ProjectVersion(e)
            | Self::ParentVersion(e)
            | Self::PomParentVersion(e) => Some(e),
            Self::ProjectParentMismatch { .. } | Self::PomParentMismatch { .. } => None,
        }
    }
}
