//! Batch orchestration: discover, read, match, synthesize, render, write.
//!
//! Jobs run strictly in order and the first failure aborts the batch. A job
//! whose source has no matching lines still produces an (empty) enum.

use crate::discover;
use crate::error::{Error, Result};
use crate::job::ParseJob;
use crate::lines::split_lines;
use crate::matcher::{DescriptionExtractor, MatchResult};
use crate::render;
use crate::status::Status;
use crate::synth;
use std::fs;
use std::path::Path;

/// Default extension of generated files.
pub const DEFAULT_EXTENSION: &str = "ts";

/// Settings shared by every job of a batch.
pub struct BatchOptions {
    /// Output file extension, without the dot.
    pub extension: String,
    /// Reject enums with duplicate member names instead of warning.
    pub strict: bool,
    /// Replaces each job's own description extractor.
    pub extractor_override: Option<Box<dyn DescriptionExtractor>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            extension: DEFAULT_EXTENSION.to_string(),
            strict: false,
            extractor_override: None,
        }
    }
}

/// Match every line of `content` against the job's strategy.
pub fn collect_members(job: &ParseJob, content: &str) -> Vec<MatchResult> {
    split_lines(content, true)
        .into_iter()
        .filter_map(|line| job.matcher.match_line(line))
        .collect()
}

fn check_duplicates(job: &ParseJob, records: &[MatchResult], strict: bool) -> Result<()> {
    let duplicates = synth::find_duplicates(records);
    if strict {
        if let Some(member) = duplicates.first() {
            return Err(Error::DuplicateMember {
                enum_name: job.target_enum_name.clone(),
                member: member.to_string(),
            });
        }
    }
    for member in duplicates {
        tracing::warn!(enum_name = %job.target_enum_name, member, "duplicate enum member");
    }
    Ok(())
}

/// Render the generated file for `job` from already-read source text.
///
/// Pure apart from logging: the same job and content always give the same
/// output.
pub fn render_job(job: &ParseJob, content: &str, options: &BatchOptions) -> Result<String> {
    let records = collect_members(job, content);
    tracing::debug!(
        enum_name = %job.target_enum_name,
        members = records.len(),
        "matched source lines"
    );
    check_duplicates(job, &records, options.strict)?;

    let comment_block = render::render_comment(job.leading_comment.as_deref());
    let output = match job.description_enum() {
        Some(description_name) => {
            let extractor = options
                .extractor_override
                .as_deref()
                .or(job.description_extractor.as_deref());
            let bodies = synth::synthesize_with_descriptions(&records, extractor);
            let description_block =
                render::render_description(Some(description_name), &bodies.descriptions);
            render::render_file(
                &job.target_enum_name,
                &bodies.primary,
                &comment_block,
                &description_block,
            )
        }
        None => render::render_file(
            &job.target_enum_name,
            &synth::synthesize(&records),
            &comment_block,
            "",
        ),
    };
    Ok(output)
}

fn validate(job: &ParseJob) -> Result<()> {
    if job.target_enum_name.trim().is_empty() {
        return Err(Error::MisconfiguredJob(format!(
            "empty enum name for source file `{}`",
            job.source_file_name
        )));
    }
    if job.source_search_root.as_os_str().is_empty() {
        return Err(Error::MisconfiguredJob(format!(
            "empty search root for enum {}",
            job.target_enum_name
        )));
    }
    Ok(())
}

fn write_output(dest: &Path, file_name: &str, content: &str) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    let out_path = dest.join(file_name);
    fs::write(&out_path, content).map_err(|e| Error::io(&out_path, e))?;
    tracing::debug!(path = %out_path.display(), "wrote generated file");
    Ok(())
}

/// Run one job end to end.
pub fn generate_one(job: &ParseJob, dest: &Path, options: &BatchOptions) -> Result<Status> {
    validate(job)?;
    let source = discover::find_source(&job.source_search_root, &job.source_file_name)?;
    let content = fs::read_to_string(&source).map_err(|e| Error::io(&source, e))?;
    let output = render_job(job, &content, options)?;
    let file_name = format!("{}.{}", job.target_enum_name, options.extension);
    write_output(dest, &file_name, &output)?;
    Ok(Status::Generated(job.target_enum_name.clone()))
}

/// Run every job in order, reporting each success through `on_status`.
///
/// The first error aborts the remaining jobs and is returned unchanged.
pub fn generate(
    jobs: &[ParseJob],
    dest: &Path,
    options: &BatchOptions,
    mut on_status: impl FnMut(&Status),
) -> Result<()> {
    for job in jobs {
        let _span = tracing::debug_span!("job", enum_name = %job.target_enum_name).entered();
        let status = generate_one(job, dest, options)?;
        on_status(&status);
    }
    Ok(())
}

/// Write `index.{ext}` re-exporting every job's enum and then each extra
/// name. Extras are reported as ignored since nothing generates them.
pub fn generate_index<E: AsRef<str>>(
    jobs: &[ParseJob],
    extras: &[E],
    dest: &Path,
    extension: &str,
    mut on_status: impl FnMut(&Status),
) -> Result<()> {
    let names: Vec<&str> = jobs.iter().map(|j| j.target_enum_name.as_str()).collect();
    let index = render::render_index(names.as_slice(), extras);
    write_output(dest, &format!("index.{}", extension), &index)?;

    for extra in extras {
        let extra = AsRef::<str>::as_ref(extra);
        if !names.contains(&extra) {
            on_status(&Status::Ignored(format!("{} (manually maintained)", extra)));
        }
    }
    on_status(&Status::Generated("index".to_string()));
    Ok(())
}
