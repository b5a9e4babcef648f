//! Parse job definition.

use crate::matcher::{DescriptionExtractor, LineMatcher};
use std::fmt;
use std::path::PathBuf;

/// One source file to one generated enum file.
pub struct ParseJob {
    pub source_file_name: String,
    pub source_search_root: PathBuf,
    /// Primary enum identifier, also the output file's base name.
    pub target_enum_name: String,
    /// When set, a second enum maps each member to its description.
    pub description_enum_name: Option<String>,
    pub leading_comment: Option<String>,
    pub matcher: Box<dyn LineMatcher>,
    pub description_extractor: Option<Box<dyn DescriptionExtractor>>,
}

impl ParseJob {
    pub fn new(
        source_file_name: impl Into<String>,
        source_search_root: impl Into<PathBuf>,
        target_enum_name: impl Into<String>,
        matcher: impl LineMatcher + 'static,
    ) -> Self {
        ParseJob {
            source_file_name: source_file_name.into(),
            source_search_root: source_search_root.into(),
            target_enum_name: target_enum_name.into(),
            description_enum_name: None,
            leading_comment: None,
            matcher: Box::new(matcher),
            description_extractor: None,
        }
    }

    pub fn with_description_enum(mut self, name: impl Into<String>) -> Self {
        self.description_enum_name = Some(name.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.leading_comment = Some(comment.into());
        self
    }

    pub fn with_extractor(mut self, extractor: impl DescriptionExtractor + 'static) -> Self {
        self.description_extractor = Some(Box::new(extractor));
        self
    }

    /// Description enum name, if one is configured and non-empty.
    pub fn description_enum(&self) -> Option<&str> {
        self.description_enum_name.as_deref().filter(|n| !n.is_empty())
    }
}

impl fmt::Debug for ParseJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseJob")
            .field("source_file_name", &self.source_file_name)
            .field("source_search_root", &self.source_search_root)
            .field("target_enum_name", &self.target_enum_name)
            .field("description_enum_name", &self.description_enum_name)
            .field("leading_comment", &self.leading_comment)
            .finish_non_exhaustive()
    }
}
