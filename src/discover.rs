//! Source file discovery under a search root.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Find `file_name` anywhere under `root`.
///
/// When several files share the name, the shallowest wins, ties broken by
/// path order, so repeated runs always pick the same file.
pub fn find_source(root: &Path, file_name: &str) -> Result<PathBuf> {
    if root.as_os_str().is_empty() {
        return Err(Error::MisconfiguredJob(format!(
            "empty search root for source file `{}`",
            file_name
        )));
    }
    if file_name.is_empty() {
        return Err(Error::MisconfiguredJob("empty source file name".to_string()));
    }

    let pattern = format!(
        "{}/**/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        glob::Pattern::escape(file_name)
    );
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| Error::MisconfiguredJob(format!("invalid search pattern {}: {}", pattern, e)))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    matches.sort_by(|a, b| {
        a.components()
            .count()
            .cmp(&b.components().count())
            .then_with(|| a.cmp(b))
    });

    tracing::debug!(root = %root.display(), file_name, candidates = matches.len(), "searched for source");

    matches.into_iter().next().ok_or_else(|| Error::SourceNotFound {
        name: file_name.to_string(),
        root: root.to_path_buf(),
    })
}
