//! Documentation build orchestration for docsite.
//!
//! This crate provides [`Pipeline`], a sequential orchestrator that produces
//! a combined documentation website for a Python package out of two external
//! generators: an API-reference generator (pdoc, HTML mode) and a static-site
//! builder (mkdocs). A run performs, strictly in order:
//!
//! 1. Precondition check: both tools resolve on the search path
//! 2. Output reset: the site directory is wiped and recreated empty
//! 3. API reference generation into a temporary directory under the site dir
//! 4. Relocation of the generated API HTML to its fixed `docs/api` home
//! 5. Site assembly with the static-site builder
//!
//! There is no retry or rollback anywhere: a missing tool aborts before any
//! filesystem mutation, and a failing generator leaves the half-built site
//! directory in place for inspection.
//!
//! # Example
//!
//! ```ignore
//! use docsite_pipeline::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(PipelineOptions::new("/home/user/rlxnix", "rlxnix"));
//! let report = pipeline.run()?;
//! println!("{}", report.url());
//! ```

mod apidoc;
mod error;
mod pipeline;
mod site;
mod tools;

pub use error::PipelineError;
pub use pipeline::{BuildReport, Pipeline, PipelineOptions};
pub use tools::Toolchain;
