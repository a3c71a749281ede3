//! Version windowing
//!
//! Splits a newest-first commit history into version windows, one per tag.
//! A tagged commit opens a new window and belongs to it; untagged commits
//! belong to the window above them.

use chronicle_core::config::{ChangelogConfig, VersionSelector};
use chronicle_core::error::ConfigError;
use chronicle_core::Result;
use chronicle_git::CommitInfo;
use tracing::{debug, instrument};

use crate::tag_index::TagIndex;
use crate::types::{Tag, VersionRecord};

/// Which versions to cut from history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSelection {
    /// Where the first window starts
    pub from: VersionSelector,
    /// Tag of the last window to include
    pub to: Option<String>,
    /// Maximum number of tagged versions, 0 for no limit
    pub max_versions: usize,
}

impl WindowSelection {
    /// Take the selection from a changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            from: config.from_version.clone(),
            to: config.to_version.clone(),
            max_versions: config.number_of_versions,
        }
    }

    fn closes_at(&self, tag: &Tag, real_tags: usize) -> bool {
        self.to.as_deref() == Some(tag.name.as_str())
            || (self.max_versions > 0 && real_tags >= self.max_versions)
    }
}

/// Partition commits into version windows, newest first.
///
/// `commits` must be newest first. The returned windows are contiguous and
/// together hold exactly the selected range of history.
#[instrument(skip(commits, tags), fields(commits = commits.len(), tags = tags.len()))]
pub fn build_windows(
    commits: &[CommitInfo],
    tags: &TagIndex,
    selection: &WindowSelection,
) -> Result<Vec<VersionRecord>> {
    if commits.is_empty() {
        return Err(ConfigError::EmptySelection.into());
    }

    let start = match &selection.from {
        VersionSelector::LatestCommit => 0,
        selector => commits
            .iter()
            .position(|c| tags.get(&c.hash).is_some_and(|t| selector.matches(&t.name)))
            .ok_or_else(|| ConfigError::VersionNotFound {
                field: "changelog.from_version".to_string(),
                version: selector.to_string(),
            })?,
    };

    let first = &commits[start];
    let first_tag = tags
        .get(&first.hash)
        .cloned()
        .unwrap_or_else(|| Tag::pseudo(first));
    let mut real_tags = usize::from(!first_tag.is_pseudo());
    let mut closing = selection.closes_at(&first_tag, real_tags);

    let mut windows = Vec::new();
    let mut current = VersionRecord::new(first_tag);
    current.add_commit(first.clone());

    for commit in &commits[start + 1..] {
        if let Some(tag) = tags.get(&commit.hash) {
            if closing {
                break;
            }
            real_tags += 1;
            closing = selection.closes_at(tag, real_tags);
            windows.push(std::mem::replace(
                &mut current,
                VersionRecord::new(tag.clone()),
            ));
        }
        current.add_commit(commit.clone());
    }
    windows.push(current);

    if let Some(to) = &selection.to {
        let reached = windows.iter().any(|w| &w.tag.name == to);
        let counted_out = selection.max_versions > 0 && real_tags >= selection.max_versions;
        if !reached && !counted_out {
            return Err(ConfigError::VersionNotFound {
                field: "changelog.to_version".to_string(),
                version: to.clone(),
            }
            .into());
        }
    }

    debug!(
        windows = windows.len(),
        start,
        real_tags,
        "partitioned history into version windows"
    );
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{commit, commit_on, tag};
    use crate::types::{TagKind, PSEUDO_TAG_NAME};
    use chronicle_core::ChronicleError;
    use chronicle_git::TagInfo;

    /// History newest first, with tags given as (commit index, name)
    fn history(len: usize, tagged: &[(usize, &str)]) -> (Vec<CommitInfo>, TagIndex) {
        let commits: Vec<CommitInfo> = (0..len)
            .map(|i| commit_on(&format!("c{}", len - i), &format!("commit {}", len - i), 1))
            .collect();
        let tag_infos: Vec<TagInfo> = tagged
            .iter()
            .map(|(idx, name)| tag(name, &commits[*idx]))
            .collect();
        let index = TagIndex::build(&commits, &tag_infos);
        (commits, index)
    }

    fn shape(windows: &[VersionRecord]) -> Vec<(String, Vec<String>)> {
        windows
            .iter()
            .map(|w| {
                (
                    w.tag.name.clone(),
                    w.commits.iter().map(|c| c.hash.clone()).collect(),
                )
            })
            .collect()
    }

    fn select(from: &str, to: Option<&str>, max: usize) -> WindowSelection {
        WindowSelection {
            from: VersionSelector::from(from),
            to: to.map(String::from),
            max_versions: max,
        }
    }

    #[test]
    fn test_tagged_head() {
        let (commits, index) = history(3, &[(0, "T2"), (2, "T1")]);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();

        // Untagged commits belong to the window of the newer tag above them
        assert_eq!(
            shape(&windows),
            vec![
                ("T2".to_string(), vec!["c3".to_string(), "c2".to_string()]),
                ("T1".to_string(), vec!["c1".to_string()]),
            ]
        );
    }

    #[test]
    fn test_untagged_head_gets_pseudo_tag() {
        let (commits, index) = history(4, &[(1, "v2"), (3, "v1")]);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();

        assert_eq!(windows.len(), 3);
        let head = &windows[0].tag;
        assert_eq!(head.name, PSEUDO_TAG_NAME);
        assert_eq!(head.kind, TagKind::Pseudo);
        assert_eq!(head.tagger, commits[0].committer);
        assert_eq!(head.release_date, commits[0].commit_date());
    }

    #[test]
    fn test_window_count_follows_tag_count() {
        let tagged = [(1, "v3"), (3, "v2"), (5, "v1")];
        let (commits, index) = history(6, &tagged);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();
        assert_eq!(windows.len(), tagged.len() + 1);

        let tagged = [(0, "v3"), (3, "v2"), (5, "v1")];
        let (commits, index) = history(6, &tagged);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();
        assert_eq!(windows.len(), tagged.len());
    }

    #[test]
    fn test_windows_partition_history() {
        let (commits, index) = history(7, &[(2, "v3"), (3, "v2"), (6, "v1")]);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();

        let joined: Vec<CommitInfo> = windows.into_iter().flat_map(|w| w.commits).collect();
        assert_eq!(joined, commits);
    }

    #[test]
    fn test_no_tags() {
        let (commits, index) = history(3, &[]);
        let windows = build_windows(&commits, &index, &WindowSelection::default()).unwrap();

        assert_eq!(windows.len(), 1);
        assert!(windows[0].tag.is_pseudo());
        assert_eq!(windows[0].commits.len(), 3);
    }

    #[test]
    fn test_empty_history() {
        let result = build_windows(&[], &TagIndex::default(), &WindowSelection::default());
        assert!(matches!(
            result,
            Err(ChronicleError::Config(ConfigError::EmptySelection))
        ));
    }

    #[test]
    fn test_latest_version_skips_untagged_head() {
        let (commits, index) = history(4, &[(2, "v2"), (3, "v1")]);
        let windows = build_windows(&commits, &index, &select("latest version", None, 0)).unwrap();

        assert_eq!(
            shape(&windows),
            vec![
                ("v2".to_string(), vec!["c2".to_string()]),
                ("v1".to_string(), vec!["c1".to_string()]),
            ]
        );
    }

    #[test]
    fn test_from_named_tag_to_named_tag() {
        // c6(4.0) c5 c4(3.0) c3 c2(2.0) c1(1.0)
        let (commits, index) = history(6, &[(0, "4.0"), (2, "3.0"), (4, "2.0"), (5, "1.0")]);
        let windows = build_windows(&commits, &index, &select("3.0", Some("2.0"), 0)).unwrap();

        assert_eq!(
            shape(&windows),
            vec![
                ("3.0".to_string(), vec!["c4".to_string(), "c3".to_string()]),
                ("2.0".to_string(), vec!["c2".to_string()]),
            ]
        );
    }

    #[test]
    fn test_from_to_with_tags_in_between() {
        // c8(2.0) c7 c6(2.1) c5(2.2) c4 c3(3.0) c2 c1(0.9)
        let (commits, index) = history(
            8,
            &[(0, "2.0"), (2, "2.1"), (3, "2.2"), (5, "3.0"), (7, "0.9")],
        );
        let windows = build_windows(&commits, &index, &select("2.0", Some("3.0"), 0)).unwrap();

        let names: Vec<_> = windows.iter().map(|w| w.tag.name.as_str()).collect();
        assert_eq!(names, vec!["2.0", "2.1", "2.2", "3.0"]);
        assert_eq!(
            shape(&windows)[3],
            ("3.0".to_string(), vec!["c3".to_string(), "c2".to_string()])
        );
    }

    #[test]
    fn test_to_version_stops_scan() {
        let (commits, index) = history(5, &[(0, "3.0"), (2, "2.0"), (4, "1.0")]);
        let windows = build_windows(&commits, &index, &select("latest commit", Some("3.0"), 0))
            .unwrap();

        assert_eq!(
            shape(&windows),
            vec![("3.0".to_string(), vec!["c5".to_string(), "c4".to_string()])]
        );
    }

    #[test]
    fn test_number_of_versions() {
        let (commits, index) = history(6, &[(1, "v3"), (3, "v2"), (5, "v1")]);

        // The pseudo window does not count
        let windows = build_windows(&commits, &index, &select("latest commit", None, 2)).unwrap();
        let names: Vec<_> = windows.iter().map(|w| w.tag.name.as_str()).collect();
        assert_eq!(names, vec![PSEUDO_TAG_NAME, "v3", "v2"]);

        let windows = build_windows(&commits, &index, &select("latest version", None, 1)).unwrap();
        let names: Vec<_> = windows.iter().map(|w| w.tag.name.as_str()).collect();
        assert_eq!(names, vec!["v3"]);
        assert_eq!(windows[0].commits.len(), 2);
    }

    #[test]
    fn test_count_limit_before_to_version_is_not_an_error() {
        let (commits, index) = history(4, &[(0, "v3"), (2, "v2"), (3, "v1")]);
        let windows = build_windows(&commits, &index, &select("latest commit", Some("v1"), 1))
            .unwrap();
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn test_unknown_from_version() {
        let (commits, index) = history(3, &[(1, "v1")]);
        let result = build_windows(&commits, &index, &select("v9", None, 0));

        match result {
            Err(ChronicleError::Config(ConfigError::VersionNotFound { field, version })) => {
                assert_eq!(field, "changelog.from_version");
                assert_eq!(version, "v9");
            }
            other => panic!("unexpected result: {:?}", other.map(|w| w.len())),
        }
    }

    #[test]
    fn test_latest_version_without_tags() {
        let (commits, index) = history(3, &[]);
        let result = build_windows(&commits, &index, &select("latest version", None, 0));
        assert!(matches!(
            result,
            Err(ChronicleError::Config(ConfigError::VersionNotFound { .. }))
        ));
    }

    #[test]
    fn test_unreached_to_version() {
        let (commits, index) = history(3, &[(0, "v2"), (2, "v1")]);
        let result = build_windows(&commits, &index, &select("latest commit", Some("v0"), 0));

        match result {
            Err(ChronicleError::Config(ConfigError::VersionNotFound { field, .. })) => {
                assert_eq!(field, "changelog.to_version");
            }
            other => panic!("unexpected result: {:?}", other.map(|w| w.len())),
        }
    }

    #[test]
    fn test_single_commit() {
        let only = commit("c1", "initial");
        let windows = build_windows(
            std::slice::from_ref(&only),
            &TagIndex::default(),
            &WindowSelection::default(),
        )
        .unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].commits, vec![only]);
    }
}
