//! Core library for liturgist.
//!
//! Looks up a service date in a schedule, maps the row's columns to template
//! variables and renders HTML templates to HTML or PDF files.

pub mod config;
pub mod context;
pub mod dates;
pub mod export;
pub mod fields;
pub mod schedule;
pub mod templates;

pub use context::{ContextError, RenderContext, build_context, build_context_for_date};
