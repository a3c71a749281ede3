//! Tag index: commit hash to version tag

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chronicle_git::{CommitInfo, TagInfo};
use tracing::{debug, instrument, warn};

use crate::types::Tag;

/// Version tags keyed by the hash of the commit they mark
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    tags: HashMap<String, Tag>,
}

impl TagIndex {
    /// Build the index from raw tags.
    ///
    /// Tags whose target is not a commit in `commits` are skipped. When
    /// several tags mark one commit, the lexicographically smallest name wins.
    #[instrument(skip_all, fields(commits = commits.len(), tags = tags.len()))]
    pub fn build(commits: &[CommitInfo], tags: &[TagInfo]) -> Self {
        let by_hash: HashMap<&str, &CommitInfo> =
            commits.iter().map(|c| (c.hash.as_str(), c)).collect();
        let mut index: HashMap<String, Tag> = HashMap::new();

        for info in tags {
            let Some(hash) = info.commit_hash.as_deref() else {
                debug!(tag = %info.name, "tag does not point at a commit, skipping");
                continue;
            };
            let Some(tag) = by_hash
                .get(hash)
                .and_then(|commit| Tag::from_info(info, commit))
            else {
                debug!(tag = %info.name, commit = hash, "tagged commit not in history, skipping");
                continue;
            };

            match index.entry(hash.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(tag);
                }
                Entry::Occupied(mut slot) => {
                    let dropped = if tag.name < slot.get().name {
                        slot.insert(tag).name
                    } else {
                        tag.name
                    };
                    warn!(
                        commit = hash,
                        kept = %slot.get().name,
                        dropped = %dropped,
                        "several tags on one commit, keeping the smallest name"
                    );
                }
            }
        }

        debug!(count = index.len(), "built tag index");
        Self { tags: index }
    }

    /// Tag on a commit, if any
    pub fn get(&self, hash: &str) -> Option<&Tag> {
        self.tags.get(hash)
    }

    /// Number of indexed tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if no commit is tagged
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{commit, tag};
    use crate::types::TagKind;

    #[test]
    fn test_build_index() {
        let c1 = commit("c1", "one");
        let c2 = commit("c2", "two");
        let index = TagIndex::build(&[c2.clone(), c1.clone()], &[tag("v1", &c1)]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("c1").unwrap().name, "v1");
        assert_eq!(index.get("c1").unwrap().kind, TagKind::Lightweight);
        assert!(index.get("c2").is_none());
    }

    #[test]
    fn test_skips_tags_outside_history() {
        let c1 = commit("c1", "one");
        let stray = commit("elsewhere", "other branch");
        let index = TagIndex::build(
            &[c1.clone()],
            &[tag("v9", &stray), TagInfo::dangling("broken")],
        );

        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_tags_smallest_name_wins() {
        let c1 = commit("c1", "one");
        for order in [["v1.0", "release-1"], ["release-1", "v1.0"]] {
            let tags: Vec<_> = order.iter().map(|n| tag(n, &c1)).collect();
            let index = TagIndex::build(&[c1.clone()], &tags);
            assert_eq!(index.get("c1").unwrap().name, "release-1");
        }
    }
}
