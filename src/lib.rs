//! enumsync: keep TypeScript enums in step with enum declarations written
//! in another language.
//!
//! The pipeline runs leaf-first:
//!
//! 1. [`lines`] splits source text on any line-ending convention
//! 2. [`matcher`] turns one line into an optional member record
//! 3. [`synth`] renders member records into enum bodies
//! 4. [`render`] wraps bodies into complete generated files
//! 5. [`generate`] runs configured jobs in order, reading and writing files
//!
//! ```no_run
//! use enumsync::generate::{generate, BatchOptions};
//! use enumsync::job::ParseJob;
//! use enumsync::matcher::by_name_with_quoted_comment;
//!
//! let jobs = vec![ParseJob::new("Color.java", "backend/src", "Color", by_name_with_quoted_comment)
//!     .with_description_enum("ColorLabel")];
//! generate(&jobs, "web/src/enums".as_ref(), &BatchOptions::default(), |status| {
//!     println!("{status}");
//! })?;
//! # Ok::<(), enumsync::Error>(())
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod generate;
pub mod job;
pub mod lines;
pub mod matcher;
pub mod render;
pub mod status;
pub mod synth;

pub use error::{Error, Result};
