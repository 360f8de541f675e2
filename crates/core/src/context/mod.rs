//! Building the variables handed to the template renderer.
//!
//! The pipeline is: normalize the target date, locate its schedule row, map
//! the row's columns to template variables, then add `DATE`. The first two
//! steps can fail; nothing after a failure runs.

mod assemble;

pub use assemble::{
    ContextError, DATE_KEY, RenderContext, assemble, build_context, build_context_for_date,
};
