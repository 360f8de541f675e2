//! HTML templates in handlebars/mustache syntax.

pub mod engine;
pub mod repository;

pub use engine::{Template, TemplateRenderError, render_string};
pub use repository::{TemplateLoadError, load_template};
