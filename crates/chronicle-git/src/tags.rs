//! Tag operations

use tracing::{debug, instrument, warn};

use crate::repository::{signature_from, GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags.
    ///
    /// Annotated tags are peeled to the commit they ultimately point at; a tag
    /// whose target is not a commit is returned with no commit hash.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::lightweight(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                let commit_hash = tag
                    .target()
                    .and_then(|target| target.peel_to_commit())
                    .map(|commit| commit.id().to_string())
                    .ok();

                let info = TagInfo {
                    name: name.clone(),
                    commit_hash,
                    annotated: true,
                    message: tag.message().map(|m| m.trim_end().to_string()),
                    tagger: tag.tagger().map(|t| signature_from(&t)),
                };
                if info.commit_hash.is_none() {
                    warn!(tag = %name, "annotated tag does not point at a commit");
                }
                tags.push(info);
            } else {
                warn!(tag = %name, "tag target is neither a commit nor a tag object");
                tags.push(TagInfo::dangling(&name));
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }
}
