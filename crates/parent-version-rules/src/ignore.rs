//! Ignore-list matching for artifacts exempt from version checks.
//!
//! An entry is either a bare `artifactId`, matched against the artifact id
//! alone, or `groupId:artifactId`, matched against the full coordinates.
//! The presence of `:` alone decides which.

use parent_version_core::RuleLog;

/// Group and artifact id of the artifact being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinates {
    group_id: String,
    artifact_id: String,
    combined: String,
}

impl ArtifactCoordinates {
    /// Creates coordinates from a group id and artifact id.
    #[must_use]
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        let combined = format!("{group_id}:{artifact_id}");
        Self {
            group_id,
            artifact_id,
            combined,
        }
    }

    /// Returns the group id.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Returns the artifact id.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Returns `groupId:artifactId`.
    #[must_use]
    pub fn combined(&self) -> &str {
        &self.combined
    }
}

/// One entry of the ignore list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreEntry {
    /// Bare artifact id.
    Artifact(String),
    /// `groupId:artifactId`.
    Coordinates(String),
}

impl IgnoreEntry {
    /// Classifies a raw ignore-list entry.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.contains(':') {
            Self::Coordinates(raw)
        } else {
            Self::Artifact(raw)
        }
    }

    /// Returns the entry as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Artifact(s) | Self::Coordinates(s) => s,
        }
    }

    /// Exact-match test against the artifact being built.
    #[must_use]
    pub fn matches(&self, artifact: &ArtifactCoordinates) -> bool {
        match self {
            Self::Artifact(id) => id == artifact.artifact_id(),
            Self::Coordinates(coords) => coords == artifact.combined(),
        }
    }
}

impl std::fmt::Display for IgnoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of ignore entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreList {
    /// Creates an empty ignore list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &IgnoreEntry> {
        self.entries.iter()
    }

    /// Returns the entries as configured strings.
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        self.entries.iter().map(IgnoreEntry::as_str).collect()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the first entry matching `artifact`, if any.
    ///
    /// Each comparison is logged to `log` as it is made, so entries after
    /// the first match are never mentioned.
    pub fn find(&self, artifact: &ArtifactCoordinates, log: &dyn RuleLog) -> Option<&IgnoreEntry> {
        self.entries.iter().find(|entry| {
            log.debug(&format!(
                "checking ignore of {} against {entry}",
                artifact.combined()
            ));
            entry.matches(artifact)
        })
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(IgnoreEntry::parse).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parent_version_core::RecordingLog;

    fn matches(list: &IgnoreList, group_id: &str, artifact_id: &str) -> bool {
        let artifact = ArtifactCoordinates::new(group_id, artifact_id);
        list.find(&artifact, &RecordingLog::new()).is_some()
    }

    fn sample() -> IgnoreList {
        ["x-ignore-artifact1-x", "x-ignore-group2-x:x-ignore-artifact2-x"]
            .into_iter()
            .collect()
    }

    #[test]
    fn entry_kind_depends_on_colon() {
        assert_eq!(
            IgnoreEntry::parse("widget"),
            IgnoreEntry::Artifact("widget".into())
        );
        assert_eq!(
            IgnoreEntry::parse("com.example:widget"),
            IgnoreEntry::Coordinates("com.example:widget".into())
        );
        assert_eq!(IgnoreEntry::parse(":"), IgnoreEntry::Coordinates(":".into()));
    }

    #[test]
    fn matches_by_artifact_id_in_any_group() {
        let list = sample();
        assert!(matches(&list, "x-ignore-group1-x", "x-ignore-artifact1-x"));
        assert!(matches(&list, "some-other-group", "x-ignore-artifact1-x"));
    }

    #[test]
    fn matches_by_full_coordinates() {
        let list = sample();
        assert!(matches(&list, "x-ignore-group2-x", "x-ignore-artifact2-x"));
    }

    #[test]
    fn coordinates_entry_needs_both_parts() {
        let list = sample();
        // Artifact id alone does not satisfy a group:artifact entry.
        assert!(!matches(&list, "other-group", "x-ignore-artifact2-x"));
    }

    #[test]
    fn artifact_entry_never_matches_group() {
        let list: IgnoreList = ["x-group-x"].into_iter().collect();
        assert!(!matches(&list, "x-group-x", "x-artifact-x"));
    }

    #[test]
    fn matching_is_exact() {
        let list: IgnoreList = ["widget"].into_iter().collect();
        assert!(!matches(&list, "g", "widget-core"));
        assert!(!matches(&list, "g", "Widget"));
        assert!(!matches(&list, "g", ""));
    }

    #[test]
    fn find_returns_first_match_in_order() {
        let list: IgnoreList = ["g:widget", "widget"].into_iter().collect();
        let artifact = ArtifactCoordinates::new("g", "widget");
        let log = RecordingLog::new();

        assert_eq!(
            list.find(&artifact, &log).map(IgnoreEntry::as_str),
            Some("g:widget")
        );
        assert_eq!(log.messages(), vec!["checking ignore of g:widget against g:widget"]);
    }

    #[test]
    fn find_logs_each_comparison_until_match() {
        let list: IgnoreList = ["other", "g:other", "widget", "never-reached"]
            .into_iter()
            .collect();
        let log = RecordingLog::new();

        let found = list.find(&ArtifactCoordinates::new("g", "widget"), &log);
        assert_eq!(found, Some(&IgnoreEntry::Artifact("widget".into())));
        assert_eq!(
            log.messages(),
            vec![
                "checking ignore of g:widget against other",
                "checking ignore of g:widget against g:other",
                "checking ignore of g:widget against widget",
            ]
        );
    }

    #[test]
    fn empty_list_matches_nothing() {
        let list = IgnoreList::new();
        assert!(list.is_empty());
        assert!(!matches(&list, "g", "a"));
    }

    #[test]
    fn patterns_preserve_order() {
        assert_eq!(
            sample().patterns(),
            vec!["x-ignore-artifact1-x", "x-ignore-group2-x:x-ignore-artifact2-x"]
        );
        assert_eq!(sample().len(), 2);
    }
}
