//! `enumsync.toml` configuration.
//!
//! ```toml
//! output = "web/src/enums"
//! index = true
//! extra_enums = ["Currency"]
//!
//! [[jobs]]
//! source = "OrderStatus.java"
//! root = "backend/src"
//! enum_name = "OrderStatus"
//! description_enum = "OrderStatusLabel"
//! matcher = "name-with-quoted-comment"
//! ```
//!
//! Relative `output` and `root` paths resolve against the directory holding
//! the configuration file.

use crate::error::{Error, Result};
use crate::generate::{BatchOptions, DEFAULT_EXTENSION};
use crate::job::ParseJob;
use crate::matcher::{Builtin, DescriptionExtractor, PatternExtractor, PatternMatcher};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Destination directory for generated files.
    pub output: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Write `index.{extension}` after the jobs.
    #[serde(default)]
    pub index: bool,
    /// Manually maintained enums re-exported from the index.
    #[serde(default)]
    pub extra_enums: Vec<String>,
    #[serde(default)]
    pub strict: bool,
    /// Batch-wide description extractor, replacing each job's own.
    pub description_pattern: Option<String>,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub source: String,
    pub root: PathBuf,
    pub enum_name: String,
    pub description_enum: Option<String>,
    pub comment: Option<String>,
    /// Built-in strategy name. Exclusive with `pattern`.
    pub matcher: Option<String>,
    /// Caller regex with named groups. Exclusive with `matcher`.
    pub pattern: Option<String>,
    pub description_pattern: Option<String>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse `path`, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Config::parse(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
        for job in &mut self.jobs {
            if job.root.is_relative() && !job.root.as_os_str().is_empty() {
                job.root = base.join(&job.root);
            }
        }
    }

    /// Build runnable jobs. Any invalid job rejects the whole configuration.
    pub fn jobs(&self) -> Result<Vec<ParseJob>> {
        self.jobs.iter().map(JobConfig::build).collect()
    }

    pub fn batch_options(&self) -> Result<BatchOptions> {
        let extractor_override = match &self.description_pattern {
            Some(pattern) => Some(Box::new(PatternExtractor::new(pattern)?) as Box<dyn DescriptionExtractor>),
            None => None,
        };
        Ok(BatchOptions {
            extension: self.extension.clone(),
            strict: self.strict,
            extractor_override,
        })
    }
}

impl JobConfig {
    pub fn build(&self) -> Result<ParseJob> {
        let mut job = match (&self.matcher, &self.pattern) {
            (Some(name), None) => {
                let builtin: Builtin = name.parse()?;
                ParseJob::new(&self.source, &self.root, &self.enum_name, builtin)
            }
            (None, Some(pattern)) => {
                let matcher = PatternMatcher::new(pattern)?;
                ParseJob::new(&self.source, &self.root, &self.enum_name, matcher)
            }
            (Some(_), Some(_)) => {
                return Err(Error::MisconfiguredJob(format!(
                    "enum {} sets both `matcher` and `pattern`",
                    self.enum_name
                )))
            }
            (None, None) => {
                return Err(Error::MisconfiguredJob(format!(
                    "enum {} needs a `matcher` or a `pattern`",
                    self.enum_name
                )))
            }
        };

        job.description_enum_name = self.description_enum.clone();
        job.leading_comment = self.comment.clone();
        if let Some(pattern) = &self.description_pattern {
            job = job.with_extractor(PatternExtractor::new(pattern)?);
        }
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{LineMatcher, MatchResult};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
output = "generated"
index = true
extra_enums = ["Currency"]

[[jobs]]
source = "Color.java"
root = "backend"
enum_name = "Color"
description_enum = "ColorLabel"
comment = "Palette"
matcher = "name-with-quoted-comment"

[[jobs]]
source = "Status.java"
root = "/abs/backend"
enum_name = "Status"
pattern = '^\s*(?P<name>[A-Z]+)\((?P<extra>.*)\)'
description_pattern = 'label = "([^"]*)"'
"#;

    #[test]
    fn parse_sample() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.extension, "ts");
        assert!(config.index);
        assert!(!config.strict);
        assert_eq!(config.extra_enums, vec!["Currency"]);
        assert_eq!(config.jobs.len(), 2);

        let jobs = config.jobs().unwrap();
        assert_eq!(jobs[0].target_enum_name, "Color");
        assert_eq!(jobs[0].description_enum(), Some("ColorLabel"));
        assert_eq!(jobs[0].leading_comment.as_deref(), Some("Palette"));
        assert_eq!(
            jobs[0].matcher.match_line(r#"RED("Red")"#),
            Some(MatchResult::named("RED").with_comment("Red"))
        );
        assert!(jobs[1].description_extractor.is_some());
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("enumsync.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output, dir.path().join("generated"));
        assert_eq!(config.jobs[0].root, dir.path().join("backend"));
        assert_eq!(config.jobs[1].root, PathBuf::from("/abs/backend"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = Config::parse("output = \"x\"\nbogus = 1\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn job_needs_exactly_one_strategy() {
        let neither = Config::parse(
            "output = \"x\"\n[[jobs]]\nsource = \"A.java\"\nroot = \"r\"\nenum_name = \"A\"\n",
        )
        .unwrap();
        assert!(matches!(neither.jobs(), Err(Error::MisconfiguredJob(_))));

        let both = Config::parse(
            "output = \"x\"\n[[jobs]]\nsource = \"A.java\"\nroot = \"r\"\nenum_name = \"A\"\nmatcher = \"name-only\"\npattern = \"(?P<name>A)\"\n",
        )
        .unwrap();
        assert!(matches!(both.jobs(), Err(Error::MisconfiguredJob(_))));
    }

    #[test]
    fn unknown_matcher_rejected() {
        let config = Config::parse(
            "output = \"x\"\n[[jobs]]\nsource = \"A.java\"\nroot = \"r\"\nenum_name = \"A\"\nmatcher = \"fuzzy\"\n",
        )
        .unwrap();
        assert!(matches!(config.jobs(), Err(Error::MisconfiguredJob(_))));
    }

    #[test]
    fn batch_override_pattern() {
        let config = Config::parse("output = \"x\"\nextension = \"mts\"\nstrict = true\ndescription_pattern = '(\\w+)'\n").unwrap();
        let options = config.batch_options().unwrap();
        assert_eq!(options.extension, "mts");
        assert!(options.strict);
        assert!(options.extractor_override.is_some());

        let bad = Config::parse("output = \"x\"\ndescription_pattern = '('\n").unwrap();
        assert!(matches!(bad.batch_options(), Err(Error::InvalidPattern { .. })));
    }
}
